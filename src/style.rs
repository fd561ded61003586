//! Text styles, colours and layout configuration.
//!
//! [`LayoutConfig`] collects every knob the layout engine reads: the page
//! geometry, the [`Typography`] scale and the [`Palette`].  The defaults
//! reproduce the look of the cheatsheet export on an A4 portrait page.

use std::fmt;

/// Conversion factor from typographic points to millimetres.
pub const PT_TO_MM: f64 = 0.352778;

/// An sRGB colour with 8-bit channels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Creates a colour from its channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Black.
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// The font faces available to the layout engine.
///
/// Each face maps onto one of the built-in PDF fonts, so documents never need
/// font files on disk.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FontFace {
    /// Proportional sans-serif.
    #[default]
    Regular,
    /// Bold proportional sans-serif.
    Bold,
    /// Slanted proportional sans-serif.
    Italic,
    /// Fixed-width face used for code samples.
    Mono,
}

/// Font, size and colour for a run of text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Font face.
    pub face: FontFace,
    /// Font size in points.
    pub size_pt: f64,
    /// Fill colour of the glyphs.
    pub color: Rgb,
}

impl TextStyle {
    /// Creates a style from its parts.
    pub const fn new(face: FontFace, size_pt: f64, color: Rgb) -> Self {
        Self {
            face,
            size_pt,
            color,
        }
    }

    /// Font size converted to millimetres.
    pub fn size_mm(&self) -> f64 {
        self.size_pt * PT_TO_MM
    }
}

/// Font sizes (in points) and line metrics.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Typography {
    /// Group titles.
    pub h1: f64,
    /// Section titles.
    pub h2: f64,
    /// Entry concepts.
    pub h3: f64,
    /// Group intros and entry descriptions.
    pub normal: f64,
    /// Code samples.
    pub code: f64,
    /// Entry notes.
    pub note: f64,
    /// Page footers.
    pub footer: f64,
    /// Distance between baselines as a multiple of the font size.
    pub line_height_factor: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            h1: 16.0,
            h2: 14.0,
            h3: 12.0,
            normal: 10.5,
            code: 9.5,
            note: 10.0,
            footer: 8.0,
            line_height_factor: 1.15,
        }
    }
}

impl Typography {
    /// Height in millimetres of a single wrapped line at `size_pt`.
    pub fn line_height(&self, size_pt: f64) -> f64 {
        size_pt * self.line_height_factor * PT_TO_MM
    }
}

/// Colours used across the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Section titles and descriptions.
    pub text_primary: Rgb,
    /// Group intros.
    pub text_secondary: Rgb,
    /// Entry notes.
    pub text_note: Rgb,
    /// Entry concepts and code text.
    pub text_code: Rgb,
    /// Group titles.
    pub heading: Rgb,
    /// Code block fill.
    pub code_background: Rgb,
    /// Code block outline.
    pub code_border: Rgb,
    /// Rule between groups.
    pub separator: Rgb,
    /// Page footers.
    pub page_number: Rgb,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            text_primary: Rgb::new(0x11, 0x18, 0x27),
            text_secondary: Rgb::new(0x4b, 0x55, 0x63),
            text_note: Rgb::new(0x6b, 0x72, 0x80),
            text_code: Rgb::new(0x1f, 0x29, 0x37),
            heading: Rgb::BLACK,
            code_background: Rgb::new(0xf8, 0xf8, 0xf8),
            code_border: Rgb::new(0xe5, 0xe7, 0xeb),
            separator: Rgb::new(0xcc, 0xcc, 0xcc),
            page_number: Rgb::new(0x99, 0x99, 0x99),
        }
    }
}

/// Standard paper sizes, in millimetres (portrait).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PaperSize {
    /// ISO A4, 210 × 297 mm.
    #[default]
    A4,
    /// US Letter, 215.9 × 279.4 mm.
    Letter,
    /// Arbitrary width and height in millimetres.
    Custom {
        /// Page width.
        width: f64,
        /// Page height.
        height: f64,
    },
}

impl PaperSize {
    /// Returns `(width, height)` in millimetres.
    pub fn dimensions(self) -> (f64, f64) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::Letter => (215.9, 279.4),
            PaperSize::Custom { width, height } => (width, height),
        }
    }
}

/// Every tunable value read by the layout engine.  Lengths are millimetres.
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Page width.
    pub page_width: f64,
    /// Page height.
    pub page_height: f64,
    /// Margin applied on all four sides.
    pub margin: f64,
    /// Base unit for the fixed gaps between blocks.
    pub spacing: f64,
    /// Padding above and below the text of a code block.
    pub code_padding_v: f64,
    /// Padding left and right of the text of a code block.
    pub code_padding_h: f64,
    /// Stroke width of the rule drawn between groups.
    pub separator_thickness: f64,
    /// Font sizes and line metrics.
    pub typography: Typography,
    /// Colours.
    pub palette: Palette,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        let (page_width, page_height) = PaperSize::A4.dimensions();
        Self {
            page_width,
            page_height,
            margin: 15.0,
            spacing: 2.5,
            code_padding_v: 2.0,
            code_padding_h: 3.0,
            separator_thickness: 0.2,
            typography: Typography::default(),
            palette: Palette::default(),
        }
    }
}

impl LayoutConfig {
    /// Sets the page dimensions from a paper size and returns the updated config.
    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        let (width, height) = paper_size.dimensions();
        self.page_width = width;
        self.page_height = height;
        self
    }

    /// Sets the page margin and returns the updated config.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Width available to text blocks.
    pub fn usable_width(&self) -> f64 {
        self.page_width - self.margin * 2.0
    }

    /// Height available between the top and bottom margins.
    pub fn usable_height(&self) -> f64 {
        self.page_height - self.margin * 2.0
    }

    /// The lowest position a block may reach without overflowing the page.
    pub fn content_bottom(&self) -> f64 {
        self.page_height - self.margin
    }

    /// Width available to the text inside a code block.
    pub fn code_text_width(&self) -> f64 {
        self.usable_width() - self.code_padding_h * 2.0
    }

    /// Text style of a given block role.
    pub fn text_style(&self, role: BlockRole) -> TextStyle {
        let t = &self.typography;
        let p = &self.palette;
        match role {
            BlockRole::GroupTitle => TextStyle::new(FontFace::Bold, t.h1, p.heading),
            BlockRole::GroupIntro => TextStyle::new(FontFace::Italic, t.normal, p.text_secondary),
            BlockRole::SectionTitle => TextStyle::new(FontFace::Bold, t.h2, p.text_primary),
            BlockRole::Concept => TextStyle::new(FontFace::Bold, t.h3, p.text_code),
            BlockRole::Description => TextStyle::new(FontFace::Regular, t.normal, p.text_primary),
            BlockRole::Note => TextStyle::new(FontFace::Italic, t.note, p.text_note),
            BlockRole::Code => TextStyle::new(FontFace::Mono, t.code, p.text_code),
        }
    }

    /// Full block style (text style plus trailing gap) of a given role.
    pub fn block_style(&self, role: BlockRole) -> BlockStyle {
        let space_after = self.spacing
            * match role {
                BlockRole::GroupTitle => 0.8,
                BlockRole::GroupIntro => 1.5,
                BlockRole::SectionTitle => 0.6,
                BlockRole::Concept | BlockRole::Description | BlockRole::Note => 0.3,
                BlockRole::Code => 0.0,
            };
        BlockStyle {
            role,
            text: self.text_style(role),
            space_after,
        }
    }

    /// Footer text style.
    pub fn footer_style(&self) -> TextStyle {
        TextStyle::new(
            FontFace::Regular,
            self.typography.footer,
            self.palette.page_number,
        )
    }
}

/// What a placed block represents in the content tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BlockRole {
    /// Title of a group.
    GroupTitle,
    /// Intro text of a group.
    GroupIntro,
    /// Title of a section.
    SectionTitle,
    /// Concept of an entry.
    Concept,
    /// Description of an entry.
    Description,
    /// Note of an entry.
    Note,
    /// Code sample of an entry.
    Code,
}

/// The style a text block is placed with.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BlockStyle {
    /// Role recorded on the placed block.
    pub role: BlockRole,
    /// Font, size and colour.
    pub text: TextStyle,
    /// Gap added below the block after it is placed.
    pub space_after: f64,
}
