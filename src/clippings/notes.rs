//! Note attachment
//!
//! Exports list notes as standalone entries. Before alignment each note is
//! folded into the highlight it belongs to, and only highlights go on.

use super::types::Clipping;
use super::ParseError;

/// Attach date-ordered notes to date-ordered highlights.
///
/// Both slices must already be sorted by ascending timestamp. For each note,
/// oldest first, the most recent highlight with the same title whose range
/// ends at the note's location receives it. Notes nobody claims are dropped
/// and described in the returned log lines.
pub fn attach_notes(mut highlights: Vec<Clipping>, notes: &[Clipping]) -> (Vec<Clipping>, Vec<String>) {
    let mut unmatched = Vec::new();

    for note in notes {
        let owner = highlights
            .iter()
            .rposition(|h| h.title == note.title && h.end_location() == note.start_location());

        match owner {
            Some(ix) => {
                let highlight = highlights[ix].clone();
                highlights[ix] = highlight.with_note(&note.content);
            }
            None => {
                tracing::debug!(location = note.start_location(), "Note has no matching highlight");
                unmatched.push(format!(
                    "✘ Note '{}' at location {} could not be matched.",
                    note.content,
                    note.start_location()
                ));
            }
        }
    }

    (highlights, unmatched)
}

/// Attach each note to the clipping right before it, in document order.
///
/// Used for exports where a note is always written directly after the
/// highlight it annotates. Returns the highlights only.
pub fn attach_adjacent_notes(clippings: Vec<Clipping>) -> Result<Vec<Clipping>, ParseError> {
    if clippings.first().is_some_and(Clipping::is_note) {
        return Err(ParseError::LeadingNote);
    }

    let mut highlights: Vec<Clipping> = Vec::with_capacity(clippings.len());
    for clipping in clippings {
        if clipping.is_note() {
            // A note after a note lands on the highlight the previous one did.
            if let Some(previous) = highlights.pop() {
                highlights.push(previous.with_note(&clipping.content));
            }
        } else {
            highlights.push(clipping);
        }
    }

    Ok(highlights)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(title: &str, location: &str, day: u32, content: &str) -> Clipping {
        let metadata = format!(
            "- Your Highlight | Location {} | Added on Monday, January {}, 2024 10:00:00 AM",
            location, day
        );
        Clipping::new(title, &fix_weekday(&metadata, day), content).unwrap()
    }

    fn note(title: &str, location: u32, day: u32, content: &str) -> Clipping {
        let metadata = format!(
            "- Your Note | Location {} | Added on Monday, January {}, 2024 10:00:00 AM",
            location, day
        );
        Clipping::new(title, &fix_weekday(&metadata, day), content).unwrap()
    }

    // January 2024 starts on a Monday.
    fn fix_weekday(metadata: &str, day: u32) -> String {
        const DAYS: [&str; 7] = [
            "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
        ];
        metadata.replace("Monday", DAYS[((day - 1) % 7) as usize])
    }

    #[test]
    fn test_note_attaches_to_most_recent_highlight() {
        let highlights = vec![
            highlight("Dune", "1-5", 1, "older"),
            highlight("Dune", "1-5", 2, "newer"),
        ];
        let notes = vec![note("Dune", 5, 3, "remember this")];

        let (highlights, unmatched) = attach_notes(highlights, &notes);

        assert!(unmatched.is_empty());
        assert_eq!(highlights[0].note, None);
        assert_eq!(highlights[1].note.as_deref(), Some("remember this"));
    }

    #[test]
    fn test_note_requires_same_title_and_end() {
        let highlights = vec![
            highlight("Dune", "1-4", 1, "wrong end"),
            highlight("Emma", "1-5", 2, "wrong title"),
        ];
        let notes = vec![note("Dune", 5, 3, "orphan")];

        let (highlights, unmatched) = attach_notes(highlights, &notes);

        assert!(highlights.iter().all(|h| h.note.is_none()));
        assert_eq!(
            unmatched,
            vec!["✘ Note 'orphan' at location 5 could not be matched.".to_string()]
        );
    }

    #[test]
    fn test_adjacent_notes() {
        let clippings = vec![
            Clipping::new("Dune", "Highlight(yellow) - Location 10", "a").unwrap(),
            Clipping::new("Dune", "Note - Location 10", "note on a").unwrap(),
            Clipping::new("Dune", "Highlight(blue) - Location 12", "b").unwrap(),
        ];

        let highlights = attach_adjacent_notes(clippings).unwrap();

        assert_eq!(highlights.len(), 2);
        assert_eq!(highlights[0].note.as_deref(), Some("note on a"));
        assert_eq!(highlights[1].note, None);
    }

    #[test]
    fn test_leading_note_is_fatal() {
        let clippings = vec![Clipping::new("Dune", "Note - Location 1", "x").unwrap()];
        assert!(matches!(
            attach_adjacent_notes(clippings),
            Err(ParseError::LeadingNote)
        ));
    }
}
