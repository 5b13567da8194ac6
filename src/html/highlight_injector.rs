//! Highlight marker injection
//!
//! Wraps a matched window of chapter markup in `<mark>` tags. A highlight may
//! run across several paragraphs, so the marker is closed before every `</p>`
//! and reopened after the next `<p>`. The same happens around inline tags
//! whose partner lies outside the window, and around notes injected earlier.
//! Each paragraph therefore stays well-formed on its own and can be swapped
//! back into the chapter independently.

use crate::clippings::Clipping;
use crate::matcher::Match;
use crate::text::markup::{self, TagKind, Token, NOTE_ATTRIBUTE};

use super::palette::{Palette, DEFAULT_COLOR, KNOWN_COLORS};

/// Configuration for highlight injection
#[derive(Debug, Clone)]
pub struct HighlightConfig {
    /// Marker element name
    pub tag: String,
    /// CSS class placed on every marker
    pub class_name: String,
    /// CSS colour used for marker backgrounds
    pub color: String,
    /// Named colours, used to honour colours carried by the export
    pub palette: Palette,
    /// Prefer the clipping's own colour when the palette knows it
    pub use_clipping_colors: bool,
    /// CSS class of the trailing note span
    pub note_class: String,
    /// Inline style of the trailing note span
    pub note_style: String,
    /// Label written before note text
    pub note_label: String,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        let color = KNOWN_COLORS
            .iter()
            .find(|(name, _)| *name == DEFAULT_COLOR)
            .map(|(_, code)| code.to_string())
            .unwrap_or_default();

        Self {
            tag: "mark".to_string(),
            class_name: "rk-highlight".to_string(),
            color,
            palette: Palette::default(),
            use_clipping_colors: false,
            note_class: "note".to_string(),
            note_style: "color: gray; font-style: italic; font-size: 90%;".to_string(),
            note_label: "R.N.".to_string(),
        }
    }
}

impl HighlightConfig {
    /// Background colour for a clipping
    pub fn color_for<'a>(&'a self, clipping: &Clipping) -> &'a str {
        if self.use_clipping_colors {
            if let Some(code) = clipping.color.as_deref().and_then(|c| self.palette.get(c)) {
                return code;
            }
        }
        &self.color
    }

    fn open_marker(&self, color: &str) -> String {
        format!(
            "<{} class=\"{}\" style=\"background-color: {};\">",
            self.tag, self.class_name, color
        )
    }

    fn close_marker(&self) -> String {
        format!("</{}>", self.tag)
    }

    fn note_span(&self, note: &str) -> String {
        format!(
            "<span class=\"{}\" {} style=\"{}\"> [{}: {}] </span>",
            self.note_class,
            NOTE_ATTRIBUTE,
            self.note_style,
            self.note_label,
            html_escape::encode_text(note)
        )
    }
}

/// Result of highlight injection
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InjectionResult {
    /// Replacement markup, one entry per index in `Match::block_indices`
    pub blocks: Vec<String>,
    /// Number of open/close marker pairs inserted
    pub marker_pairs: usize,
}

/// Marker bookkeeping while a window is rewritten
struct Marker<'a> {
    body: String,
    open: &'a str,
    close: &'a str,
    opens: usize,
    closes: usize,
    /// Nesting depth the open marker was written at
    marking: Option<isize>,
    last_close_at: Option<usize>,
}

impl<'a> Marker<'a> {
    fn start(&mut self, depth: isize) {
        if self.marking.is_none() {
            self.body.push_str(self.open);
            self.opens += 1;
            self.marking = Some(depth);
        }
    }

    fn stop(&mut self) {
        if self.marking.take().is_some() {
            self.body.push_str(self.close);
            self.closes += 1;
            self.last_close_at = Some(self.body.len());
        }
    }
}

/// For each token, whether it opens an element that also closes inside the
/// window
fn closed_within(tokens: &[Token<'_>]) -> Vec<bool> {
    let mut closed = vec![false; tokens.len()];
    let mut stack: Vec<(&str, usize)> = Vec::new();

    for (ix, token) in tokens.iter().enumerate() {
        let Token::Tag(tag) = *token else { continue };
        match markup::tag_kind(tag) {
            (TagKind::Open, name) => stack.push((name, ix)),
            (TagKind::Close, name) => {
                if let Some(pos) = stack.iter().rposition(|(n, _)| n.eq_ignore_ascii_case(name)) {
                    closed[stack[pos].1] = true;
                    stack.truncate(pos);
                }
            }
            (TagKind::Empty, _) => {}
        }
    }

    closed
}

/// Insert markers into a match's window and return the rewritten paragraphs
pub fn inject_highlight(m: &Match, config: &HighlightConfig) -> Result<InjectionResult, InjectError> {
    let open = config.open_marker(config.color_for(&m.clipping));
    let close = config.close_marker();
    let tokens = markup::tokenize(m.highlighted_window());
    let closed = closed_within(&tokens);

    let mut marker = Marker {
        body: String::with_capacity(m.highlighted_window().len() + 128),
        open: &open,
        close: &close,
        opens: 0,
        closes: 0,
        marking: None,
        last_close_at: None,
    };
    // The window starts on visible text, so inside a paragraph.
    let mut inside_block = true;
    // Inline nesting relative to the window start; negative once the window
    // leaves an element it started in.
    let mut depth: isize = 0;

    for (ix, token) in tokens.iter().enumerate() {
        match *token {
            Token::Text(text) => {
                let has_text = !markup::visible_text(text).trim().is_empty();
                if inside_block && has_text {
                    marker.start(depth);
                }
                marker.body.push_str(text);
            }
            Token::Note(span) => {
                marker.stop();
                marker.body.push_str(span);
            }
            Token::Tag(tag) => {
                let (kind, name) = markup::tag_kind(tag);
                if markup::is_paragraph(name) {
                    marker.stop();
                    inside_block = kind == TagKind::Open;
                } else {
                    let leaves_marker = match (kind, marker.marking) {
                        (TagKind::Open, Some(_)) => !closed[ix],
                        (TagKind::Close, Some(at)) => depth <= at,
                        _ => false,
                    };
                    if leaves_marker {
                        marker.stop();
                    }
                    match kind {
                        TagKind::Open => depth += 1,
                        TagKind::Close => depth -= 1,
                        TagKind::Empty => {}
                    }
                }
                marker.body.push_str(tag);
            }
        }
    }
    marker.stop();

    let Marker {
        mut body,
        opens,
        closes,
        last_close_at,
        ..
    } = marker;

    if opens != closes {
        return Err(InjectError::UnbalancedMarkers { opens, closes });
    }
    if opens == 0 {
        return Err(InjectError::EmptyWindow);
    }

    if let (Some(note), Some(at)) = (m.clipping.note.as_deref(), last_close_at) {
        body.insert_str(at, &config.note_span(note));
    }

    let rewritten = format!("{}{}{}", m.prefix(), body, m.suffix());
    let blocks: Vec<String> = markup::find_blocks(&rewritten)
        .into_iter()
        .map(|range| rewritten[range].to_string())
        .collect();

    if blocks.len() != m.block_indices.len() {
        return Err(InjectError::BlockCountMismatch {
            expected: m.block_indices.len(),
            found: blocks.len(),
        });
    }

    Ok(InjectionResult {
        blocks,
        marker_pairs: opens,
    })
}

/// Errors during highlight injection.
///
/// These point at a bug in boundary handling rather than bad input; the
/// affected highlight is skipped instead of writing broken markup.
#[derive(Debug, thiserror::Error)]
pub enum InjectError {
    #[error("Mismatch in highlight tags: {opens} heads and {closes} tails")]
    UnbalancedMarkers { opens: usize, closes: usize },

    #[error("Window contains no visible text to highlight")]
    EmptyWindow,

    #[error("Expected {expected} paragraphs after injection, found {found}")]
    BlockCountMismatch { expected: usize, found: usize },
}
