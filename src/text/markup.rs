//! Lightweight markup scanning for chapter XHTML
//!
//! This is not a parser. It only understands what the alignment engine
//! needs: where `<p>` blocks start and end, how tags nest, and what text a
//! reader sees.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// Opening `<p>` (with or without attributes, possibly self-closing) or `</p>`
static PARAGRAPH_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<p(?:\s[^>]*)?/?>|</p\s*>").expect("paragraph tag pattern is valid")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern is valid"));

static LINE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<br\s*/?>").expect("line break pattern is valid"));

/// Attribute carried by injected note spans, so later passes can skip them
pub const NOTE_ATTRIBUTE: &str = r#"data-rekindle="note""#;

/// A whole injected note span. Note text is escaped, so it holds no tags.
static NOTE_SPAN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"(?s)<span\s[^>]*{}[^>]*>.*?</span\s*>",
        regex::escape(NOTE_ATTRIBUTE)
    ))
    .expect("note span pattern is valid")
});

/// A note span or any single tag; the note alternative wins when both apply
static TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!("{}|<[^>]*>", NOTE_SPAN.as_str())).expect("token pattern is valid")
});

const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// One piece of a markup fragment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Tag(&'a str),
    /// An injected note span, kept whole
    Note(&'a str),
}

/// How a tag affects element nesting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    Open,
    Close,
    /// Self-closing and void elements, comments, declarations
    Empty,
}

/// Kind and element name of a single tag such as `<em class="x">`
pub fn tag_kind(tag: &str) -> (TagKind, &str) {
    let inner = tag.trim_start_matches('<');
    if inner.starts_with('!') || inner.starts_with('?') {
        return (TagKind::Empty, "");
    }
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name_len = inner
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == ':' || c == '-' || c == '_'))
        .unwrap_or(inner.len());
    let name = &inner[..name_len];

    let kind = if closing {
        TagKind::Close
    } else if is_self_closing(tag) || VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name)) {
        TagKind::Empty
    } else {
        TagKind::Open
    };
    (kind, name)
}

/// Whether `name` is the paragraph element
pub fn is_paragraph(name: &str) -> bool {
    name.eq_ignore_ascii_case("p")
}

fn is_self_closing(tag: &str) -> bool {
    tag.ends_with("/>")
}

/// Byte ranges of the top-level `<p>` elements in `html`, in document order.
///
/// Unbalanced closing tags are ignored and a paragraph that is never closed
/// is dropped. Paragraphs nested inside another paragraph are not reported
/// separately.
pub fn find_blocks(html: &str) -> Vec<Range<usize>> {
    let mut blocks = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for tag in PARAGRAPH_TAG.find_iter(html) {
        let text = tag.as_str();
        if text.starts_with("</") {
            if depth == 0 {
                continue;
            }
            depth -= 1;
            if depth == 0 {
                blocks.push(start..tag.end());
            }
        } else if is_self_closing(text) {
            if depth == 0 {
                blocks.push(tag.range());
            }
        } else {
            if depth == 0 {
                start = tag.start();
            }
            depth += 1;
        }
    }

    blocks
}

/// Split `html` into text, tags and note spans
pub fn tokenize(html: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut last = 0;

    for m in TOKEN.find_iter(html) {
        if m.start() > last {
            tokens.push(Token::Text(&html[last..m.start()]));
        }
        let text = m.as_str();
        if text.starts_with("<span") && NOTE_SPAN.is_match(text) {
            tokens.push(Token::Note(text));
        } else {
            tokens.push(Token::Tag(text));
        }
        last = m.end();
    }

    if last < html.len() {
        tokens.push(Token::Text(&html[last..]));
    }

    tokens
}

/// Byte ranges of injected note spans in `html`
pub fn note_spans(html: &str) -> Vec<Range<usize>> {
    NOTE_SPAN.find_iter(html).map(|m| m.range()).collect()
}

/// Text a reader would see: tags and injected notes removed, entities
/// decoded.
///
/// Line breaks become spaces; every other tag disappears without a trace,
/// so `a<em>b</em>` reads as `ab`.
pub fn visible_text(html: &str) -> String {
    let without_notes = NOTE_SPAN.replace_all(html, "");
    let with_breaks = LINE_BREAK.replace_all(&without_notes, " ");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    html_escape::decode_html_entities(&stripped).into_owned()
}
