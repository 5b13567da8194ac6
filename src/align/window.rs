//! Minimum window subsequence over raw markup
//!
//! Finds the shortest slice of `raw` whose characters contain `target` in
//! order. Anything may sit between the matched characters: whitespace,
//! punctuation, or whole tags. Characters inside a tag never take part in
//! the match, so a window always begins and ends on visible text. Text of
//! injected notes is invisible too, and a character reference such as
//! `&#8217;` counts as the single char it stands for.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::text::markup;

static ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^&(?:#[0-9]+|#[xX][0-9a-fA-F]+|[A-Za-z][A-Za-z0-9]*);")
        .expect("entity pattern is valid")
});

/// `raw` as a sequence of units. A unit is one char, or one character
/// reference standing for the char it decodes to.
struct Scanned {
    /// Byte offset of each unit in the source
    offsets: Vec<usize>,
    /// Byte length of each unit
    lens: Vec<usize>,
    chars: Vec<char>,
    /// False inside `<...>` and inside injected notes
    matchable: Vec<bool>,
}

impl Scanned {
    fn new(raw: &str) -> Self {
        let mut scanned = Self {
            offsets: Vec::with_capacity(raw.len()),
            lens: Vec::with_capacity(raw.len()),
            chars: Vec::with_capacity(raw.len()),
            matchable: Vec::with_capacity(raw.len()),
        };
        let mut notes = markup::note_spans(raw).into_iter().peekable();
        let mut in_tag = false;
        let mut pos = 0;

        while let Some(c) = raw[pos..].chars().next() {
            if let Some(note) = notes.peek() {
                if note.start == pos {
                    pos = note.end;
                    notes.next();
                    continue;
                }
            }

            if c == '&' && !in_tag {
                if let Some((decoded, len)) = decode_entity(&raw[pos..]) {
                    scanned.push(pos, len, decoded, true);
                    pos += len;
                    continue;
                }
            }

            let visible = match c {
                '<' => {
                    in_tag = true;
                    false
                }
                '>' if in_tag => {
                    in_tag = false;
                    false
                }
                _ => !in_tag,
            };
            scanned.push(pos, c.len_utf8(), c, visible);
            pos += c.len_utf8();
        }

        scanned
    }

    fn push(&mut self, offset: usize, len: usize, c: char, matchable: bool) {
        self.offsets.push(offset);
        self.lens.push(len);
        self.chars.push(c);
        self.matchable.push(matchable);
    }

    fn matches(&self, ix: usize, c: char) -> bool {
        self.matchable[ix] && self.chars[ix] == c
    }

    fn byte_range(&self, start: usize, end: usize) -> Range<usize> {
        self.offsets[start]..self.offsets[end] + self.lens[end]
    }
}

/// Decode a character reference at the start of `text` into
/// `(char, byte length)`. References that do not decode to exactly one char
/// are left as literal text.
fn decode_entity(text: &str) -> Option<(char, usize)> {
    let entity = ENTITY.find(text)?.as_str();
    let decoded = html_escape::decode_html_entities(entity);
    let mut chars = decoded.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if decoded != entity => Some((c, entity.len())),
        _ => None,
    }
}

/// Shortest byte range of `raw` containing `target` as a subsequence.
///
/// When several windows share the minimum length the leftmost wins.
/// Returns `None` for an empty target or when no window exists.
pub fn min_window_subsequence(raw: &str, target: &str) -> Option<Range<usize>> {
    let target: Vec<char> = target.chars().collect();
    let first = *target.first()?;
    let last_ix = target.len() - 1;
    let scanned = Scanned::new(raw);
    let m = scanned.chars.len();

    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < m {
        if !scanned.matches(i, first) {
            i += 1;
            continue;
        }

        // Forward: earliest end reachable from i.
        let mut j = 0;
        let mut end = None;
        for k in i..m {
            if scanned.matches(k, target[j]) {
                if j == last_ix {
                    end = Some(k);
                    break;
                }
                j += 1;
            }
        }
        // No later start can succeed either.
        let Some(end) = end else { break };

        // Backward: latest start that still reaches `end`.
        let mut j = last_ix;
        let mut start = end;
        loop {
            if scanned.matches(start, target[j]) {
                if j == 0 {
                    break;
                }
                j -= 1;
            }
            start -= 1;
        }

        if best.map_or(true, |(s, e)| end - start < e - s) {
            best = Some((start, end));
        }
        i = start + 1;
    }

    best.map(|(start, end)| scanned.byte_range(start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn window<'a>(raw: &'a str, target: &str) -> Option<&'a str> {
        min_window_subsequence(raw, target).map(|r| &raw[r])
    }

    #[test]
    fn test_shortest_window() {
        assert_eq!(window("xxaxbxcxx", "abc"), Some("axbxc"));
    }

    #[test]
    fn test_prefers_shorter_later_window() {
        assert_eq!(window("axxxbxxc abc", "abc"), Some("abc"));
    }

    #[test]
    fn test_tie_keeps_leftmost() {
        assert_eq!(min_window_subsequence("ab--ab", "ab"), Some(0..2));
    }

    #[test]
    fn test_skips_tags() {
        assert_eq!(
            window("a<b>nswer is here", "answerishere"),
            Some("a<b>nswer is here")
        );
        // The `a` inside the tag must not start the window.
        assert_eq!(
            window(r#"<p class="a">one a</p>"#, "a"),
            Some("a")
        );
        assert_eq!(
            min_window_subsequence(r#"<p class="a">one a</p>"#, "a"),
            Some(17..18)
        );
    }

    #[test]
    fn test_not_found() {
        assert_eq!(window("abcdef", "abz"), None);
        assert_eq!(window("abc", ""), None);
        assert_eq!(window("<b>", "b"), None);
    }

    #[test]
    fn test_multibyte_offsets() {
        let raw = "«café» — ok";
        let range = min_window_subsequence(raw, "é»").unwrap();
        assert_eq!(&raw[range], "é»");
    }

    #[test]
    fn test_spans_paragraphs() {
        let raw = "<p>The quick</p><p> fox jumps</p>";
        assert_eq!(window(raw, "quickfox"), Some("quick</p><p> fox"));
    }

    #[test]
    fn test_entities_match_decoded_chars() {
        let raw = "<p>It&#8217;s Fish &amp; chips</p>";
        assert_eq!(window(raw, "It\u{2019}s"), Some("It&#8217;s"));
        assert_eq!(window(raw, "Fish&chips"), Some("Fish &amp; chips"));
        // The literal letters of a reference are not text.
        assert_eq!(window(raw, "amp"), None);
    }

    #[test]
    fn test_unknown_entity_stays_literal() {
        assert_eq!(window("a &bogus; b", "bogus"), Some("bogus"));
    }

    #[test]
    fn test_skips_injected_notes() {
        let raw = r#"<p><mark>one two</mark><span class="note" data-rekindle="note"> [R.N.: three] </span> three four</p>"#;
        let range = min_window_subsequence(raw, "twothree").unwrap();
        assert!(raw[range.clone()].starts_with("two</mark>"));
        assert!(raw[range].ends_with("</span> three"));
        assert_eq!(window(raw, "R.N."), None);
    }
}
