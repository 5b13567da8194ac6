//! Errors raised while reading e-reader exports

use thiserror::Error;

/// A clippings file could not be turned into validated clippings.
///
/// Every variant is fatal for the file being parsed.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("Invalid metadata format: {0}")]
    InvalidMetadata(String),

    #[error("Invalid location '{0}'")]
    InvalidLocation(String),

    #[error("Invalid date '{value}': {source}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Notes should have a single location, got '{0}'")]
    NoteWithRange(String),

    #[error("Clippings not ordered by location ({previous} then {current}); note tagging may be incorrect")]
    OutOfOrder { previous: u32, current: u32 },

    #[error("First clipping should not be a note")]
    LeadingNote,

    #[error("Export has no book title")]
    MissingTitle,

    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("HTML export could not be read: {0}")]
    Html(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
