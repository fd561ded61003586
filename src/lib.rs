//! Core entry point for the cheatsheet_pdf crate.
//!
//! A cheatsheet is a list of [`model::Group`]s.  [`layout::render_document`]
//! paginates them into a [`layout::PagedOutput`], [`layout::PagedOutput::finalize`]
//! numbers the pages, and [`pdf::write_pdf`] serializes the result.
//! [`builder::ExportBuilder`] wires the three steps together.

pub mod builder;
pub mod error;
pub mod fonts;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod sample;
pub mod style;

#[cfg(feature = "bookmarks")]
pub mod bookmarks;

pub use builder::{ExportBuilder, ExportedPdf};
pub use error::RenderError;
pub use model::{Entry, Group, Section};

/// Exports `groups` with the default layout, dated today.
pub fn export_cheatsheet(groups: &[Group]) -> Result<ExportedPdf, RenderError> {
    ExportBuilder::new().render(groups)
}

/// Async variant of [`export_cheatsheet`] that yields once before starting.
#[cfg(feature = "async")]
pub async fn export_cheatsheet_async(groups: &[Group]) -> Result<ExportedPdf, RenderError> {
    ExportBuilder::new().render_async(groups).await
}
