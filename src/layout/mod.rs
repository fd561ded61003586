//! Paginated layout of measured text and code blocks.
//!
//! A [`LayoutContext`] owns the cursor of exactly one layout pass.  Every
//! block is measured first, then [`LayoutContext::ensure_space`] decides
//! whether it still fits on the current page, and only then is it drawn.
//! Blocks are never split: a block that does not fit moves whole to the top
//! of a new page.  The result is a [`PagedOutput`], a list of pages holding
//! backend-independent draw operations, which [`PagedOutput::finalize`]
//! stamps with page numbers once the final page count is known.

mod document;
mod wrap;

pub use document::render_document;
pub use wrap::wrap_text;

use log::{debug, warn};

use crate::error::RenderError;
use crate::fonts::{normalize_text, TextMeasure};
use crate::style::{BlockRole, BlockStyle, LayoutConfig, Rgb, TextStyle};

/// Baseline offset of the first line below the block top, as a fraction of the font size.
const ASCENT_RATIO: f64 = 0.8;

/// Distance of the footer baseline above the bottom edge, relative to the margin.
const FOOTER_BASELINE_OFFSET: f64 = 3.0;

/// Wrapped lines of a fragment together with the height they occupy.
#[derive(Clone, Debug, PartialEq)]
pub struct MeasuredBlock {
    /// Lines after wrapping.
    pub lines: Vec<String>,
    /// Height of the lines in millimetres.
    pub height: f64,
}

impl MeasuredBlock {
    fn empty() -> Self {
        Self {
            lines: Vec::new(),
            height: 0.0,
        }
    }

    /// Whether the block takes up no space and is skipped by the layout.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A single drawing instruction in page coordinates.
///
/// Coordinates are millimetres measured from the top-left corner of the page.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// One line of text; `y` is the baseline.
    Text {
        /// Left edge of the text.
        x: f64,
        /// Baseline position.
        y: f64,
        /// The text itself.
        text: String,
        /// Font, size and colour.
        style: TextStyle,
    },
    /// A filled and outlined rectangle.
    Rect {
        /// Left edge.
        x: f64,
        /// Top edge.
        y: f64,
        /// Width.
        width: f64,
        /// Height.
        height: f64,
        /// Fill colour.
        fill: Rgb,
        /// Outline colour.
        stroke: Rgb,
    },
    /// A horizontal line.
    Rule {
        /// Start of the line.
        x1: f64,
        /// End of the line.
        x2: f64,
        /// Vertical position.
        y: f64,
        /// Stroke colour.
        color: Rgb,
        /// Stroke width.
        thickness: f64,
    },
}

/// Record of a block placed on a page.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedBlock {
    /// What the block represents.
    pub role: BlockRole,
    /// Top edge of the block.
    pub top: f64,
    /// Height reserved for the block, including code padding.
    pub height: f64,
    /// Wrapped lines of the block.
    pub lines: Vec<String>,
}

impl PlacedBlock {
    /// Bottom edge of the block.
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// A page footer stamped by [`PagedOutput::finalize`].
#[derive(Clone, Debug, PartialEq)]
pub struct Footer {
    /// Footer text, `Page {i} of {total}`.
    pub text: String,
    /// Left edge of the centred text.
    pub x: f64,
    /// Baseline position.
    pub y: f64,
    /// Font, size and colour.
    pub style: TextStyle,
}

/// One laid out page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Page {
    ops: Vec<DrawOp>,
    blocks: Vec<PlacedBlock>,
    footer: Option<Footer>,
}

impl Page {
    /// Drawing instructions in painting order.
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Blocks placed on this page in placement order.
    pub fn blocks(&self) -> &[PlacedBlock] {
        &self.blocks
    }

    /// The footer, present once the output has been finalized.
    pub fn footer(&self) -> Option<&Footer> {
        self.footer.as_ref()
    }
}

/// The pages produced by one layout pass.
#[derive(Clone, Debug, PartialEq)]
pub struct PagedOutput {
    pages: Vec<Page>,
    group_pages: Vec<Option<usize>>,
    total_pages: Option<usize>,
}

impl PagedOutput {
    /// The laid out pages.
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// Number of pages.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// For every group, the 1-based page its title landed on, if it had one.
    pub fn group_pages(&self) -> &[Option<usize>] {
        &self.group_pages
    }

    /// The page total written into the footers, once finalized.
    pub fn total_pages(&self) -> Option<usize> {
        self.total_pages
    }

    /// Stamps a centred `Page {i} of {total}` footer on every page.
    ///
    /// This is a separate pass because the total is unknown until layout is
    /// complete; the total is taken once from the finished page list.
    pub fn finalize(mut self, config: &LayoutConfig, measure: &dyn TextMeasure) -> Self {
        let total = self.pages.len();
        let style = config.footer_style();
        let y = config.page_height - config.margin / 2.0 + FOOTER_BASELINE_OFFSET;

        for (index, page) in self.pages.iter_mut().enumerate() {
            let text = format!("Page {} of {}", index + 1, total);
            let width = measure.text_width(&text, style.face, style.size_pt);
            page.footer = Some(Footer {
                x: (config.page_width - width) / 2.0,
                y,
                text,
                style,
            });
        }

        self.total_pages = Some(total);
        self
    }
}

/// Mutable state of a single layout pass: the pages so far and the cursor.
pub struct LayoutContext<'a> {
    config: &'a LayoutConfig,
    measure: &'a dyn TextMeasure,
    pages: Vec<Page>,
    cursor_y: f64,
    group_pages: Vec<Option<usize>>,
}

impl<'a> LayoutContext<'a> {
    /// Starts a layout pass with one empty page and the cursor at the top margin.
    ///
    /// Fails when the margins leave no room for text or code.
    pub fn new(
        config: &'a LayoutConfig,
        measure: &'a dyn TextMeasure,
    ) -> Result<Self, RenderError> {
        validate_geometry(config)?;
        Ok(Self {
            config,
            measure,
            pages: vec![Page::default()],
            cursor_y: config.margin,
            group_pages: Vec::new(),
        })
    }

    /// The configuration this pass lays out with.
    pub fn config(&self) -> &'a LayoutConfig {
        self.config
    }

    /// Current vertical write position on the active page.
    pub fn cursor(&self) -> f64 {
        self.cursor_y
    }

    /// Number of pages started so far.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Moves the cursor down by `gap` millimetres without placing anything.
    pub fn advance(&mut self, gap: f64) {
        self.cursor_y += gap;
    }

    /// Wraps `text` to `max_width` and measures the height of the result.
    ///
    /// Empty or whitespace-only text yields an empty block of zero height.
    pub fn measure_block(&self, text: &str, style: &TextStyle, max_width: f64) -> MeasuredBlock {
        if text.trim().is_empty() {
            return MeasuredBlock::empty();
        }

        let text = normalize_text(text);
        let lines = wrap_text(&text, style, max_width, self.measure);
        let height = lines.len() as f64 * self.config.typography.line_height(style.size_pt);
        MeasuredBlock { lines, height }
    }

    /// Starts a new page when `required_height` does not fit below the cursor.
    ///
    /// Returns whether a page break happened.  A zero height never breaks,
    /// and neither does a page that is still empty: an oversized block is
    /// placed on it and overflows the bottom margin.
    pub fn ensure_space(&mut self, required_height: f64) -> bool {
        if required_height <= 0.0 || self.at_page_top() {
            return false;
        }
        if self.cursor_y + required_height <= self.config.content_bottom() {
            return false;
        }

        self.pages.push(Page::default());
        self.cursor_y = self.config.margin;
        debug!(
            "Page break before block of {:.2} mm; now on page {}",
            required_height,
            self.pages.len()
        );
        true
    }

    /// Measures, positions and draws a text block, then advances the cursor
    /// by its height plus the style's trailing gap.
    pub fn place_text_block(&mut self, text: &str, style: &BlockStyle) {
        let block = self.measure_block(text, &style.text, self.config.usable_width());
        if block.is_empty() {
            return;
        }

        self.ensure_space(block.height);
        self.warn_if_oversized(style.role, block.height);

        let top = self.cursor_y;
        let x = self.config.margin;
        self.push_lines(&block.lines, x, top, &style.text);
        self.push_block(style.role, top, block.height, block.lines);
        self.cursor_y += block.height + style.space_after;
    }

    /// Places a code sample inside a filled, outlined box.
    ///
    /// The text wraps at the usable width minus the horizontal padding and the
    /// box adds the vertical padding above and below it.  Empty code reserves
    /// no space.
    pub fn place_code_block(&mut self, code: &str) {
        let style = self.config.block_style(BlockRole::Code);
        let text_width = self.config.code_text_width();
        let block = self.measure_block(code, &style.text, text_width);
        if block.is_empty() {
            return;
        }

        let padding_v = self.config.code_padding_v;
        let padding_h = self.config.code_padding_h;
        let height = block.height + padding_v * 2.0;

        self.ensure_space(height);
        self.warn_if_oversized(BlockRole::Code, height);

        let config = self.config;
        let top = self.cursor_y;
        let frame = DrawOp::Rect {
            x: config.margin,
            y: top,
            width: config.usable_width(),
            height,
            fill: config.palette.code_background,
            stroke: config.palette.code_border,
        };
        self.current_page().ops.push(frame);
        self.push_lines(
            &block.lines,
            config.margin + padding_h,
            top + padding_v,
            &style.text,
        );
        self.push_block(BlockRole::Code, top, height, block.lines);
        self.cursor_y += height + style.space_after;
    }

    /// Draws a full-width horizontal rule at `y` on the current page.
    pub fn draw_rule(&mut self, y: f64, color: Rgb) {
        let config = self.config;
        self.current_page().ops.push(DrawOp::Rule {
            x1: config.margin,
            x2: config.page_width - config.margin,
            y,
            color,
            thickness: config.separator_thickness,
        });
    }

    /// Records the current page as the page of the group title just placed.
    pub(crate) fn record_group_page(&mut self, title_placed: bool) {
        let page = title_placed.then(|| self.pages.len());
        self.group_pages.push(page);
    }

    /// Ends the pass and hands over the pages, without footers.
    pub fn finish(self) -> PagedOutput {
        debug!(
            "Layout finished with {} page(s), cursor at {:.2} mm",
            self.pages.len(),
            self.cursor_y
        );
        PagedOutput {
            pages: self.pages,
            group_pages: self.group_pages,
            total_pages: None,
        }
    }

    fn at_page_top(&self) -> bool {
        self.cursor_y <= self.config.margin && self.current_page_ref().blocks.is_empty()
    }

    fn current_page(&mut self) -> &mut Page {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn current_page_ref(&self) -> &Page {
        &self.pages[self.pages.len() - 1]
    }

    fn push_lines(&mut self, lines: &[String], x: f64, top: f64, style: &TextStyle) {
        let line_height = self.config.typography.line_height(style.size_pt);
        let first_baseline = top + style.size_mm() * ASCENT_RATIO;
        let ops = &mut self.current_page().ops;

        for (index, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            ops.push(DrawOp::Text {
                x,
                y: first_baseline + line_height * index as f64,
                text: line.clone(),
                style: *style,
            });
        }
    }

    fn push_block(&mut self, role: BlockRole, top: f64, height: f64, lines: Vec<String>) {
        self.current_page().blocks.push(PlacedBlock {
            role,
            top,
            height,
            lines,
        });
    }

    fn warn_if_oversized(&self, role: BlockRole, height: f64) {
        if height > self.config.usable_height() {
            warn!(
                "{:?} block of {:.2} mm exceeds the usable page height of {:.2} mm and will overflow page {}",
                role,
                height,
                self.config.usable_height(),
                self.pages.len()
            );
        }
    }
}

fn validate_geometry(config: &LayoutConfig) -> Result<(), RenderError> {
    let values = [
        config.page_width,
        config.page_height,
        config.margin,
        config.spacing,
        config.code_padding_v,
        config.code_padding_h,
    ];
    if values.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(RenderError::InvalidGeometry(
            "page dimensions, margin, spacing and padding must be finite and non-negative"
                .to_owned(),
        ));
    }
    let t = &config.typography;
    let sizes = [
        t.h1,
        t.h2,
        t.h3,
        t.normal,
        t.code,
        t.note,
        t.footer,
        t.line_height_factor,
        config.separator_thickness,
    ];
    if sizes.iter().any(|value| !value.is_finite() || *value < 0.0) {
        return Err(RenderError::InvalidGeometry(
            "font sizes, line height factor and rule thickness must be finite and non-negative"
                .to_owned(),
        ));
    }
    if config.code_text_width() <= 0.0 || config.usable_height() <= 0.0 {
        return Err(RenderError::InvalidGeometry(format!(
            "a {} x {} mm page with a {} mm margin leaves no room for content",
            config.page_width, config.page_height, config.margin
        )));
    }
    Ok(())
}
