//! Error type of the cheatsheet export.

use std::io;

use thiserror::Error;

/// Failure of an export.
///
/// Layout and drawing either complete or fail as a whole; no variant ever
/// comes with a partial document.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The page geometry leaves no room for content.
    #[error("Invalid page geometry: {0}")]
    InvalidGeometry(String),

    /// The PDF backend rejected a drawing or serialization call.
    #[error("PDF backend error: {0}")]
    Pdf(#[from] printpdf::Error),

    /// Writing the finished document failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Group bookmarks could not be embedded.
    #[cfg(feature = "bookmarks")]
    #[error("Failed to embed group bookmarks: {0}")]
    Bookmarks(#[from] crate::bookmarks::BookmarkError),
}
