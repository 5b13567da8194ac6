//! Error types for rekindle

use thiserror::Error;

use crate::clippings::ParseError;
use crate::epub::EpubError;

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Clippings error: {0}")]
    Parse(#[from] ParseError),

    #[error("EPUB error: {0}")]
    Epub(#[from] EpubError),

    #[error("Invalid highlight color '{value}': use a hex code or one of {valid}")]
    InvalidColor { value: String, valid: String },

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
