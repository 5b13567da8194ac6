//! Match types

use std::ops::Range;

use serde::Serialize;

use crate::clippings::Clipping;

/// Where one highlight was found in the book
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Match {
    pub clipping: Clipping,
    /// Position of the chapter in the book's document list
    pub document_index: usize,
    /// Contiguous paragraph indices within that chapter
    pub block_indices: Vec<usize>,
    /// Markup of exactly those paragraphs, concatenated, with Unicode
    /// whitespace mapped to ASCII spaces
    pub raw_span: String,
    /// Byte range of the minimal highlighted window within `raw_span`
    pub window: Range<usize>,
}

impl Match {
    /// The slice of markup that gets wrapped in markers
    pub fn highlighted_window(&self) -> &str {
        &self.raw_span[self.window.clone()]
    }

    /// Markup before the window
    pub fn prefix(&self) -> &str {
        &self.raw_span[..self.window.start]
    }

    /// Markup after the window
    pub fn suffix(&self) -> &str {
        &self.raw_span[self.window.end..]
    }
}
