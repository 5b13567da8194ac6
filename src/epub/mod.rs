//! EPUB container module
//!
//! Reads an EPUB into memory with the zip crate, finds its XHTML documents
//! through `container.xml` and the OPF (parsed with roxmltree), and writes
//! the archive back out with any edited chapters.

mod opf;
mod parser;
mod types;

use thiserror::Error;

pub use opf::{find_opf_path, parse_opf, resolve_href, ParsedOpf};
pub use parser::EpubBook;
pub use types::{Chapter, ManifestItem};

#[derive(Error, Debug)]
pub enum EpubError {
    #[error("Failed to read ZIP archive: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid EPUB: {0}")]
    InvalidEpub(String),

    #[error("XML parse error: {0}")]
    XmlError(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Paragraph {index} out of range in {href} ({count} paragraphs)")]
    BlockOutOfRange {
        href: String,
        index: usize,
        count: usize,
    },
}
