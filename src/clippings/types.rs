//! Clipping types
//!
//! A clipping is one entry of an e-reader export: either a highlighted
//! passage or a free-text note the reader typed at some location.

use chrono::NaiveDateTime;
use serde::Serialize;

use super::metadata::parse_metadata;
use super::ParseError;

/// What a clipping is, together with where it sits in the book.
///
/// Highlights always cover a `start..=end` location range; notes always
/// point at a single location. The variant is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ClippingKind {
    Highlight { start: u32, end: u32 },
    Note { location: u32 },
}

/// A parsed highlight or note
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clipping {
    /// Book title as written in the export
    pub title: String,
    pub kind: ClippingKind,
    /// When the reader created it, if the export says
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<NaiveDateTime>,
    /// Highlight colour name from the export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    /// The highlighted passage, or the note text
    pub content: String,
    /// Note text attached to a highlight
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl Clipping {
    /// Build a clipping from its three export lines
    pub fn new(title: &str, metadata: &str, content: &str) -> Result<Self, ParseError> {
        let meta = parse_metadata(metadata)?;
        Ok(Self {
            title: title.to_string(),
            kind: meta.kind,
            timestamp: meta.timestamp,
            color: meta.color,
            content: content.to_string(),
            note: None,
        })
    }

    pub fn is_highlight(&self) -> bool {
        matches!(self.kind, ClippingKind::Highlight { .. })
    }

    pub fn is_note(&self) -> bool {
        matches!(self.kind, ClippingKind::Note { .. })
    }

    /// First location covered
    pub fn start_location(&self) -> u32 {
        match self.kind {
            ClippingKind::Highlight { start, .. } => start,
            ClippingKind::Note { location } => location,
        }
    }

    /// Last location covered
    pub fn end_location(&self) -> u32 {
        match self.kind {
            ClippingKind::Highlight { end, .. } => end,
            ClippingKind::Note { location } => location,
        }
    }

    /// Return this clipping with `text` attached as its note.
    ///
    /// A second note on the same highlight is appended after a blank line.
    pub fn with_note(mut self, text: &str) -> Self {
        self.note = Some(match self.note.take() {
            Some(existing) => format!("{}\n\n{}", existing, text),
            None => text.to_string(),
        });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_highlight() {
        let clip = Clipping::new(
            "Dune",
            "- Your Highlight on page 12 | Location 180-182 | Added on Monday, January 1, 2024 10:00:00 AM",
            "Fear is the mind-killer.",
        )
        .unwrap();

        assert!(clip.is_highlight());
        assert_eq!(clip.start_location(), 180);
        assert_eq!(clip.end_location(), 182);
        assert!(clip.timestamp.is_some());
        assert!(clip.note.is_none());
    }

    #[test]
    fn test_with_note_appends() {
        let clip = Clipping::new("Dune", "Highlight - Location 5", "text")
            .unwrap()
            .with_note("first")
            .with_note("second");
        assert_eq!(clip.note.as_deref(), Some("first\n\nsecond"));
    }

    #[test]
    fn test_note_locations() {
        let note = Clipping::new("Dune", "Note - Location 9", "mine").unwrap();
        assert!(note.is_note());
        assert_eq!(note.start_location(), 9);
        assert_eq!(note.end_location(), 9);
    }
}
