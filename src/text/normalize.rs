//! Whitespace normalization
//!
//! Every comparison in the crate goes through these functions, so a clipping
//! exported with re-flowed lines and a chapter with non-breaking spaces end up
//! on the same footing.

/// Characters that behave like whitespace in e-reader exports but that
/// `char::is_whitespace` does not report.
const ZERO_WIDTH: [char; 4] = [
    '\u{180e}', // mongolian vowel separator
    '\u{200b}', // zero width space
    '\u{2060}', // word joiner
    '\u{feff}', // byte order mark
];

/// Whether `c` counts as whitespace for normalization purposes
pub fn is_space(c: char) -> bool {
    c.is_whitespace() || ZERO_WIDTH.contains(&c)
}

/// Collapse every whitespace run to a single ASCII space and trim both ends
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text.chars() {
        if is_space(c) {
            pending_space = true;
            continue;
        }
        if pending_space && !out.is_empty() {
            out.push(' ');
        }
        pending_space = false;
        out.push(c);
    }

    out
}

/// Map each non-ASCII whitespace character to an ASCII space, one for one.
///
/// Unlike [`normalize`] this never collapses runs, so markup stays intact.
pub fn normalize_whitespace(text: &str) -> String {
    text.chars()
        .map(|c| if c != ' ' && is_space(c) && !c.is_ascii() { ' ' } else { c })
        .collect()
}

/// Remove all whitespace
pub fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !is_space(*c)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(normalize("  a \t\n b   c  "), "a b c");
    }

    #[test]
    fn test_normalize_unicode_spaces() {
        assert_eq!(
            normalize("a\u{00a0}\u{2009}b\u{3000}c\u{feff}"),
            "a b c"
        );
        assert_eq!(normalize("\u{200b}word\u{202f}"), "word");
    }

    #[test]
    fn test_normalize_idempotent() {
        let inputs = [
            "",
            "   ",
            "plain",
            " lead and trail ",
            "tab\tnewline\nnbsp\u{00a0}end",
            "\u{feff}bom first",
        ];
        for input in inputs {
            let once = normalize(input);
            assert_eq!(normalize(&once), once, "input {:?}", input);
        }
    }

    #[test]
    fn test_normalize_whitespace_class_insensitive() {
        assert_eq!(
            normalize("the\u{2003}quick\r\n\r\nfox"),
            normalize("the quick      fox")
        );
    }

    #[test]
    fn test_normalize_whitespace_keeps_markup() {
        let raw = "<p class=\"x\">a\u{00a0}b\n</p>";
        assert_eq!(normalize_whitespace(raw), "<p class=\"x\">a b\n</p>");
    }

    #[test]
    fn test_strip_whitespace() {
        assert_eq!(strip_whitespace(" an\u{00a0}swer is\there "), "answerishere");
    }
}
