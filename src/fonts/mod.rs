//! Built-in font metrics for the cheatsheet layout.
//!
//! Documents are drawn with the PDF Standard 14 fonts, so no font files have
//! to be shipped or located on disk.  Line wrapping still needs glyph widths;
//! this module carries the advance widths of printable ASCII for the faces
//! the layout uses and exposes them through the [`TextMeasure`] trait.

use log::warn;
use printpdf::BuiltinFont;

use crate::style::{FontFace, PT_TO_MM};

/// Width in font units (1/1000 em) used for glyphs without a table entry.
const FALLBACK_WIDTH: u16 = 556;

/// Every Courier glyph has the same advance.
const MONO_WIDTH: u16 = 600;

/// Helvetica and Helvetica-Oblique advance widths for U+0020..=U+007E.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, //
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, //
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, //
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica-Bold advance widths for U+0020..=U+007E.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, //
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, //
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, //
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, //
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, //
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Number of spaces a tab expands to.
const TAB_WIDTH: usize = 4;

/// Measures the rendered width of text.
///
/// The layout engine only needs advance widths; implementations are free to
/// back them with real font files, fixed tables or, in tests, constants.
pub trait TextMeasure {
    /// Returns the advance width of `text` in millimetres.
    fn text_width(&self, text: &str, face: FontFace, size_pt: f64) -> f64;
}

/// Metrics of the PDF Standard 14 fonts the renderer draws with.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuiltinMetrics;

impl BuiltinMetrics {
    fn glyph_width(face: FontFace, ch: char) -> u16 {
        if face == FontFace::Mono {
            return MONO_WIDTH;
        }
        let table = match face {
            FontFace::Bold => &HELVETICA_BOLD_WIDTHS,
            _ => &HELVETICA_WIDTHS,
        };
        (ch as usize)
            .checked_sub(0x20)
            .and_then(|index| table.get(index))
            .copied()
            .unwrap_or(FALLBACK_WIDTH)
    }
}

impl TextMeasure for BuiltinMetrics {
    fn text_width(&self, text: &str, face: FontFace, size_pt: f64) -> f64 {
        let units: u32 = text
            .chars()
            .map(|ch| u32::from(Self::glyph_width(face, ch)))
            .sum();
        f64::from(units) / 1000.0 * size_pt * PT_TO_MM
    }
}

/// Returns the built-in PDF font used to draw a face.
pub fn builtin_font(face: FontFace) -> BuiltinFont {
    match face {
        FontFace::Regular => BuiltinFont::Helvetica,
        FontFace::Bold => BuiltinFont::HelveticaBold,
        FontFace::Italic => BuiltinFont::HelveticaOblique,
        FontFace::Mono => BuiltinFont::Courier,
    }
}

/// Rewrites `text` into characters the built-in fonts can draw.
///
/// Typographic punctuation is mapped onto its ASCII look-alike, tabs expand
/// to spaces and carriage returns are dropped.  Any other character outside
/// printable ASCII becomes `?`.
pub fn normalize_text(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut replaced = 0usize;

    for ch in text.chars() {
        match ch {
            '\n' | ' '..='~' => normalized.push(ch),
            '\r' => {}
            '\t' => normalized.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            '\u{00a0}' | '\u{2002}' | '\u{2003}' | '\u{2009}' => normalized.push(' '),
            '\u{2018}' | '\u{2019}' | '\u{201a}' | '\u{2032}' => normalized.push('\''),
            '\u{201c}' | '\u{201d}' | '\u{201e}' | '\u{2033}' => normalized.push('"'),
            '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => {
                normalized.push('-')
            }
            '\u{2022}' | '\u{00b7}' => normalized.push('*'),
            '\u{2026}' => normalized.push_str("..."),
            '\u{2192}' => normalized.push_str("->"),
            '\u{21d2}' => normalized.push_str("=>"),
            '\u{2264}' => normalized.push_str("<="),
            '\u{2265}' => normalized.push_str(">="),
            '\u{2260}' => normalized.push_str("!="),
            _ => {
                replaced += 1;
                normalized.push('?');
            }
        }
    }

    if replaced > 0 {
        warn!(
            "Replaced {} character(s) the built-in fonts cannot draw with '?'",
            replaced
        );
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn courier_is_fixed_width() {
        let metrics = BuiltinMetrics;
        let narrow = metrics.text_width("iiii", FontFace::Mono, 10.0);
        let wide = metrics.text_width("WWWW", FontFace::Mono, 10.0);
        assert_eq!(narrow, wide);
        assert!((narrow - 4.0 * 0.6 * 10.0 * PT_TO_MM).abs() < 1e-9);
    }

    #[test]
    fn bold_is_at_least_as_wide_as_regular() {
        let metrics = BuiltinMetrics;
        let text = "The quick brown fox jumps over the lazy dog";
        let regular = metrics.text_width(text, FontFace::Regular, 12.0);
        let bold = metrics.text_width(text, FontFace::Bold, 12.0);
        assert!(bold > regular);
        assert_eq!(
            regular,
            metrics.text_width(text, FontFace::Italic, 12.0),
            "oblique shares the regular widths"
        );
    }

    #[test]
    fn width_scales_with_size() {
        let metrics = BuiltinMetrics;
        let small = metrics.text_width("abc", FontFace::Regular, 8.0);
        let large = metrics.text_width("abc", FontFace::Regular, 16.0);
        assert!((large - small * 2.0).abs() < 1e-9);
    }

    #[test]
    fn normalize_maps_typographic_punctuation() {
        assert_eq!(
            normalize_text("\u{201c}it\u{2019}s\u{201d} \u{2014} a\tb\r\n\u{2026}"),
            "\"it's\" - a    b\n..."
        );
    }

    #[test]
    fn normalize_replaces_unsupported_characters() {
        assert_eq!(normalize_text("π ≈ 3"), "? ? 3");
    }
}
