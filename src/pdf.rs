//! Writes laid out pages into a PDF document with `printpdf`.
//!
//! The layout works in millimetres from the top-left corner of the page while
//! PDF coordinates grow upwards from the bottom-left corner; the conversion
//! happens here and nowhere else.

use std::collections::HashMap;
use std::io::BufWriter;

use log::debug;
use printpdf::{
    Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
    Point,
};

use crate::error::RenderError;
use crate::fonts::builtin_font;
use crate::layout::{DrawOp, PagedOutput};
use crate::style::{FontFace, LayoutConfig, Rgb};

const LAYER_NAME: &str = "Content";

const FACES: [FontFace; 4] = [
    FontFace::Regular,
    FontFace::Bold,
    FontFace::Italic,
    FontFace::Mono,
];

fn color(rgb: Rgb) -> Color {
    Color::Rgb(printpdf::Rgb::new(
        f64::from(rgb.r) / 255.0,
        f64::from(rgb.g) / 255.0,
        f64::from(rgb.b) / 255.0,
        None,
    ))
}

/// Converts a top-left based position into a `printpdf` point.
fn point(x: f64, y_from_top: f64, page_height: f64) -> Point {
    Point::new(Mm(x), Mm(page_height - y_from_top))
}

struct Fonts {
    by_face: HashMap<FontFace, IndirectFontRef>,
}

impl Fonts {
    fn install(document: &PdfDocumentReference) -> Result<Self, RenderError> {
        let mut by_face = HashMap::with_capacity(FACES.len());
        for face in FACES {
            by_face.insert(face, document.add_builtin_font(builtin_font(face))?);
        }
        Ok(Self { by_face })
    }

    fn get(&self, face: FontFace) -> &IndirectFontRef {
        &self.by_face[&face]
    }
}

/// Serializes a finalized [`PagedOutput`] into PDF bytes.
///
/// Every page of the output becomes one PDF page of the configured size; the
/// footers stamped by [`PagedOutput::finalize`] are drawn last.
pub fn write_pdf(
    output: &PagedOutput,
    config: &LayoutConfig,
    title: &str,
) -> Result<Vec<u8>, RenderError> {
    let width = Mm(config.page_width);
    let height = Mm(config.page_height);
    let (document, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let fonts = Fonts::install(&document)?;

    for (index, page) in output.pages().iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            document.add_page(width, height, LAYER_NAME)
        };
        let layer = document.get_page(page_index).get_layer(layer_index);

        for op in page.ops() {
            draw(&layer, op, &fonts, config.page_height);
        }

        if let Some(footer) = page.footer() {
            layer.set_fill_color(color(footer.style.color));
            layer.use_text(
                footer.text.as_str(),
                footer.style.size_pt,
                Mm(footer.x),
                Mm(config.page_height - footer.y),
                fonts.get(footer.style.face),
            );
        }
    }

    let mut writer = BufWriter::new(Vec::new());
    document.save(&mut writer)?;
    let bytes = writer
        .into_inner()
        .map_err(|err| RenderError::Io(err.into_error()))?;

    debug!(
        "Wrote {} page(s) into {} bytes of PDF",
        output.page_count(),
        bytes.len()
    );
    Ok(bytes)
}

fn draw(layer: &PdfLayerReference, op: &DrawOp, fonts: &Fonts, page_height: f64) {
    match op {
        DrawOp::Text { x, y, text, style } => {
            layer.set_fill_color(color(style.color));
            layer.use_text(
                text.as_str(),
                style.size_pt,
                Mm(*x),
                Mm(page_height - y),
                fonts.get(style.face),
            );
        }
        DrawOp::Rect {
            x,
            y,
            width,
            height,
            fill,
            stroke,
        } => {
            layer.set_fill_color(color(*fill));
            layer.set_outline_color(color(*stroke));
            layer.set_outline_thickness(0.5);
            let corners = [
                point(*x, *y, page_height),
                point(x + width, *y, page_height),
                point(x + width, y + height, page_height),
                point(*x, y + height, page_height),
            ];
            layer.add_shape(Line {
                points: corners.into_iter().map(|corner| (corner, false)).collect(),
                is_closed: true,
                has_fill: true,
                has_stroke: true,
                is_clipping_path: false,
            });
        }
        DrawOp::Rule {
            x1,
            x2,
            y,
            color: rule_color,
            thickness,
        } => {
            layer.set_outline_color(color(*rule_color));
            layer.set_outline_thickness(mm_to_pt(*thickness));
            layer.add_shape(Line {
                points: vec![
                    (point(*x1, *y, page_height), false),
                    (point(*x2, *y, page_height), false),
                ],
                is_closed: false,
                has_fill: false,
                has_stroke: true,
                is_clipping_path: false,
            });
        }
    }
}

/// Outline thickness in `printpdf` is expressed in points.
fn mm_to_pt(mm: f64) -> f64 {
    mm / crate::style::PT_TO_MM
}
