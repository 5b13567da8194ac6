//! Block-level location of a clipping inside one chapter

use std::ops::Range;

use crate::text::{markup, normalize};

/// Indices of the contiguous blocks whose visible text contains `query`.
///
/// Each block's visible text is normalized and the blocks are joined with a
/// single space, so a passage that runs across a paragraph break still
/// matches. The comparison is an exact substring search; `None` means the
/// text is not there.
pub fn locate<S: AsRef<str>>(blocks: &[S], query: &str) -> Option<Vec<usize>> {
    let query = normalize(query);
    if query.is_empty() {
        return None;
    }

    let mut combined = String::new();
    let mut spans: Vec<Range<usize>> = Vec::with_capacity(blocks.len());
    for block in blocks {
        let text = normalize(&markup::visible_text(block.as_ref()));
        if !combined.is_empty() {
            combined.push(' ');
        }
        let start = combined.len();
        combined.push_str(&text);
        spans.push(start..combined.len());
    }

    let start = combined.find(&query)?;
    let end = start + query.len();

    let indices = spans
        .iter()
        .enumerate()
        .skip_while(|(_, span)| span.end <= start)
        .take_while(|(_, span)| span.start < end)
        .map(|(i, _)| i)
        .collect::<Vec<_>>();

    Some(indices)
}
