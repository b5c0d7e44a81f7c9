//! Error types for pdftoc library.

use std::io;
use thiserror::Error;

/// Result type alias for pdftoc operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while inferring a table of contents.
///
/// Finding no headings or no TOC lines is not an error; those cases
/// produce an empty entry list.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON encoding or decoding failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The document (or one of its collaborators) could not be read.
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Options were rejected before any processing started.
    #[error("Invalid configuration: {0}")]
    ConfigurationInvalid(String),

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Error during rendering (text, markdown, JSON).
    #[error("Rendering error: {0}")]
    Render(String),
}
