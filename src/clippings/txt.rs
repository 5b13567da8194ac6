//! Plain-text export (`My Clippings.txt`)
//!
//! Entries are separated by a line of ten `=` signs. Each entry is a title
//! line, a metadata line, a blank line and the clipped text.

use super::notes::attach_notes;
use super::types::Clipping;
use super::{ClippingSet, ParseError};

pub const ENTRY_SEPARATOR: &str = "==========";

/// Split raw export text into entries of trimmed, non-empty lines.
///
/// Entries with fewer than three lines (title, metadata, content) are skipped.
pub fn split_entries(raw: &str) -> Vec<Vec<&str>> {
    raw.split(ENTRY_SEPARATOR)
        .map(|entry| {
            entry
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|lines| lines.len() >= 3)
        .collect()
}

/// Parse a plain-text export into highlights with their notes attached
pub fn parse_txt_clippings(raw: &str) -> Result<ClippingSet, ParseError> {
    let raw = raw.replace('\u{feff}', "");

    let mut highlights = Vec::new();
    let mut notes = Vec::new();
    for lines in split_entries(&raw) {
        let content = lines[2..].join(" ");
        let clipping = Clipping::new(lines[0], lines[1], &content)?;
        if clipping.is_highlight() {
            highlights.push(clipping);
        } else {
            notes.push(clipping);
        }
    }

    highlights.sort_by_key(|c| c.timestamp);
    notes.sort_by_key(|c| c.timestamp);

    tracing::debug!(
        highlights = highlights.len(),
        notes = notes.len(),
        "Parsed plain-text clippings"
    );

    let (highlights, log) = attach_notes(highlights, &notes);
    Ok(ClippingSet { highlights, log })
}
