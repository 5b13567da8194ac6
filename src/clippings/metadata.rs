//! Clipping metadata line parsing
//!
//! Both export formats describe a clipping with one line such as
//!
//! ```text
//! - Your Highlight on page 12 | Location 180-182 | Added on Monday, January 1, 2024 10:00:00 AM
//! Highlight(yellow) - Page 3 · Location 45
//! ```

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

use super::types::ClippingKind;
use super::ParseError;

const DATE_FORMAT: &str = "%A, %B %d, %Y %I:%M:%S %p";

static METADATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)^(?P<type>Highlight|Note|- Your Highlight|- Your Note)",
        r"(?:\((?P<color>[^)]+)\))?",
        r".*?Location (?P<location>\d+(?:-\d+)?)",
        r"(?:.*?Added on (?P<date>.+))?$",
    ))
    .expect("metadata pattern is valid")
});

/// Fields carried by a metadata line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub kind: ClippingKind,
    pub color: Option<String>,
    pub timestamp: Option<NaiveDateTime>,
}

/// Parse one metadata line
pub fn parse_metadata(line: &str) -> Result<Metadata, ParseError> {
    let caps = METADATA
        .captures(line.trim())
        .ok_or_else(|| ParseError::InvalidMetadata(line.to_string()))?;

    let is_note = caps["type"].to_lowercase().contains("note");
    let location = &caps["location"];
    let bounds = location
        .split('-')
        .map(|n| n.parse::<u32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseError::InvalidLocation(location.to_string()))?;

    let kind = match (is_note, bounds.as_slice()) {
        (true, [at]) => ClippingKind::Note { location: *at },
        (true, _) => return Err(ParseError::NoteWithRange(location.to_string())),
        (false, [at]) => ClippingKind::Highlight { start: *at, end: *at },
        (false, [start, end]) if start <= end => ClippingKind::Highlight {
            start: *start,
            end: *end,
        },
        (false, _) => return Err(ParseError::InvalidLocation(location.to_string())),
    };

    let timestamp = caps
        .name("date")
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            NaiveDateTime::parse_from_str(s, DATE_FORMAT).map_err(|source| ParseError::InvalidDate {
                value: s.to_string(),
                source,
            })
        })
        .transpose()?;

    Ok(Metadata {
        kind,
        color: caps.name("color").map(|m| m.as_str().trim().to_string()),
        timestamp,
    })
}
