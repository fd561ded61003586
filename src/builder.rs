//! Export construction helpers.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use log::debug;

use crate::error::RenderError;
use crate::fonts::BuiltinMetrics;
use crate::layout::{render_document, PagedOutput};
use crate::model::Group;
use crate::pdf;
use crate::style::{LayoutConfig, PaperSize};

/// Prefix of the suggested file name, followed by the ISO date.
pub const FILE_NAME_PREFIX: &str = "tech-cheatsheet-data";

const DEFAULT_TITLE: &str = "Tech Cheatsheet";

/// Returns the suggested file name for an export made on `date`.
pub fn file_name_for(date: NaiveDate) -> String {
    format!("{}-{}.pdf", FILE_NAME_PREFIX, date.format("%Y-%m-%d"))
}

/// A finished export: the PDF bytes and the name to offer them under.
#[derive(Clone, Debug)]
pub struct ExportedPdf {
    /// Suggested file name, `tech-cheatsheet-data-<YYYY-MM-DD>.pdf`.
    pub file_name: String,
    /// The PDF document.
    pub bytes: Vec<u8>,
    /// Number of pages in the document.
    pub page_count: usize,
}

impl ExportedPdf {
    /// Writes the document into `directory` under its suggested file name.
    pub fn save_in(&self, directory: impl AsRef<Path>) -> io::Result<PathBuf> {
        let directory = directory.as_ref();
        fs::create_dir_all(directory)?;
        let path = directory.join(&self.file_name);
        fs::write(&path, &self.bytes)?;
        Ok(path)
    }
}

/// Builder for cheatsheet exports pre-configured with the default layout.
///
/// Each call to [`ExportBuilder::render`] runs its own layout pass, so one
/// builder can serve any number of exports.
#[derive(Clone, Debug, Default)]
pub struct ExportBuilder {
    config: LayoutConfig,
    title: Option<String>,
    date: Option<NaiveDate>,
    #[cfg(feature = "bookmarks")]
    bookmarks: bool,
}

impl ExportBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the paper size.
    pub fn with_paper_size(mut self, paper_size: PaperSize) -> Self {
        self.config = self.config.with_paper_size(paper_size);
        self
    }

    /// Sets the margin applied on every side of the page, in millimetres.
    pub fn with_margin(mut self, margin: f64) -> Self {
        self.config = self.config.with_margin(margin);
        self
    }

    /// Replaces the whole layout configuration.
    pub fn with_layout_config(mut self, config: LayoutConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the document title stored in the PDF metadata.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fixes the date used in the file name instead of today's local date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Embeds an outline entry for every titled group.
    #[cfg(feature = "bookmarks")]
    pub fn with_bookmarks(mut self, bookmarks: bool) -> Self {
        self.bookmarks = bookmarks;
        self
    }

    /// Returns the layout configuration in use.
    pub fn layout_config(&self) -> &LayoutConfig {
        &self.config
    }

    /// Lays out `groups` and stamps the page footers, without producing a PDF.
    pub fn layout(&self, groups: &[Group]) -> Result<PagedOutput, RenderError> {
        let measure = BuiltinMetrics;
        let output = render_document(groups, &self.config, &measure)?;
        Ok(output.finalize(&self.config, &measure))
    }

    /// Runs the full export: layout, page numbering and PDF serialization.
    ///
    /// Any failure aborts the export; no partial document is returned.
    pub fn render(&self, groups: &[Group]) -> Result<ExportedPdf, RenderError> {
        let output = self.layout(groups)?;
        let title = self.title.as_deref().unwrap_or(DEFAULT_TITLE);
        let bytes = pdf::write_pdf(&output, &self.config, title)?;

        #[cfg(feature = "bookmarks")]
        let bytes = if self.bookmarks {
            crate::bookmarks::apply_group_bookmarks(&bytes, groups, output.group_pages())?
        } else {
            bytes
        };

        let date = self.date.unwrap_or_else(|| Local::now().date_naive());
        let file_name = file_name_for(date);
        debug!(
            "Exported {} group(s) into {} page(s) as {}",
            groups.len(),
            output.page_count(),
            file_name
        );

        Ok(ExportedPdf {
            file_name,
            bytes,
            page_count: output.page_count(),
        })
    }

    /// Like [`ExportBuilder::render`], but yields to the runtime once before
    /// starting.  After the yield the export runs to completion without
    /// further suspension.
    #[cfg(feature = "async")]
    pub async fn render_async(&self, groups: &[Group]) -> Result<ExportedPdf, RenderError> {
        tokio::task::yield_now().await;
        self.render(groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_carries_the_iso_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("valid date");
        assert_eq!(file_name_for(date), "tech-cheatsheet-data-2024-03-07.pdf");
    }

    #[test]
    fn builder_applies_paper_size_and_margin() {
        let builder = ExportBuilder::new()
            .with_paper_size(PaperSize::Letter)
            .with_margin(20.0);
        let config = builder.layout_config();
        assert_eq!(config.page_width, 215.9);
        assert_eq!(config.page_height, 279.4);
        assert_eq!(config.margin, 20.0);
    }

    #[test]
    fn layout_failure_returns_no_document() {
        let builder = ExportBuilder::new().with_margin(200.0);
        let result = builder.render(&[Group::new("Anything")]);
        assert!(matches!(result, Err(RenderError::InvalidGeometry(_))));
    }
}
