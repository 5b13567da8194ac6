//! Clippings module
//!
//! Reads e-reader annotation exports into validated [`Clipping`]s.
//!
//! # Formats
//!
//! - Plain text (`My Clippings.txt`): notes are matched to highlights by
//!   title, location and date
//! - HTML notebook export: notes follow their highlight directly
//!
//! Either way the result is the list of highlights, each carrying its note.

mod error;
mod html;
mod metadata;
mod notes;
mod split;
mod txt;
mod types;

use std::path::Path;

use serde::Serialize;

pub use error::ParseError;
pub use html::parse_html_clippings;
pub use metadata::{parse_metadata, Metadata};
pub use notes::{attach_adjacent_notes, attach_notes};
pub use split::{group_by_title, split_txt_clippings_by_title, TitleGroup};
pub use txt::parse_txt_clippings;
pub use types::{Clipping, ClippingKind};

/// Highlights read from one export, plus anything worth logging
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClippingSet {
    pub highlights: Vec<Clipping>,
    /// Notes that could not be attached
    pub log: Vec<String>,
}

/// Read and parse a clippings file, choosing the format by extension
pub fn parse_clippings(path: &Path) -> Result<ClippingSet, ParseError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    let parse: fn(&str) -> Result<ClippingSet, ParseError> = match ext.as_str() {
        "txt" => parse_txt_clippings,
        "html" | "htm" => parse_html_clippings,
        _ => return Err(ParseError::UnsupportedFormat(path.display().to_string())),
    };

    let raw = std::fs::read_to_string(path)?;
    let set = parse(&raw)?;
    tracing::info!(
        "Read {} highlights from {}",
        set.highlights.len(),
        path.display()
    );
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_extension() {
        let err = parse_clippings(Path::new("notes.pdf")).unwrap_err();
        assert!(matches!(err, ParseError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_dispatch_uppercase_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Dune.TXT");
        std::fs::write(
            &path,
            "Dune\n- Your Highlight | Location 1-2\n\nhello\n==========\n",
        )
        .unwrap();

        let set = parse_clippings(&path).unwrap();
        assert_eq!(set.highlights.len(), 1);
    }
}
