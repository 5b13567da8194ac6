//! HTML notebook export
//!
//! The notebook export is a flat list of `div`s: a `bookTitle`, then
//! `noteHeading` / `noteText` pairs in book order, sometimes interleaved with
//! `sectionHeading`s. The document is streamed through lol_html and only
//! those divs are kept.

use std::cell::RefCell;

use lol_html::{element, rewrite_str, text, RewriteStrSettings};

use super::notes::attach_adjacent_notes;
use super::types::Clipping;
use super::{ClippingSet, ParseError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DivKind {
    BookTitle,
    SectionHeading,
    NoteHeading,
    NoteText,
}

const SELECTORS: [(&str, DivKind); 4] = [
    ("div.bookTitle", DivKind::BookTitle),
    ("div.sectionHeading", DivKind::SectionHeading),
    ("div.noteHeading", DivKind::NoteHeading),
    ("div.noteText", DivKind::NoteText),
];

#[derive(Debug)]
struct Div {
    kind: DivKind,
    text: String,
}

fn collect_divs(raw: &str) -> Result<Vec<Div>, ParseError> {
    let divs: RefCell<Vec<Div>> = RefCell::new(Vec::new());

    let mut handlers = Vec::with_capacity(SELECTORS.len() * 2);
    for (selector, kind) in SELECTORS {
        let divs = &divs;
        handlers.push(element!(selector, move |_el| {
            divs.borrow_mut().push(Div {
                kind,
                text: String::new(),
            });
            Ok(())
        }));
        handlers.push(text!(selector, move |chunk| {
            if let Some(last) = divs.borrow_mut().last_mut() {
                last.text.push_str(chunk.as_str());
            }
            Ok(())
        }));
    }

    rewrite_str(
        raw,
        RewriteStrSettings {
            element_content_handlers: handlers,
            ..RewriteStrSettings::default()
        },
    )
    .map_err(|e| ParseError::Html(e.to_string()))?;

    let mut divs = divs.into_inner();
    for div in &mut divs {
        div.text = html_escape::decode_html_entities(div.text.trim()).into_owned();
    }
    Ok(divs)
}

/// Parse an HTML notebook export into highlights with their notes attached
pub fn parse_html_clippings(raw: &str) -> Result<ClippingSet, ParseError> {
    let divs = collect_divs(raw)?;

    let title = divs
        .iter()
        .find(|d| d.kind == DivKind::BookTitle)
        .map(|d| d.text.clone())
        .filter(|t| !t.is_empty())
        .ok_or(ParseError::MissingTitle)?;

    let mut clippings = Vec::new();
    let mut unpaired = 0usize;
    let mut i = 0;
    while i + 1 < divs.len() {
        if divs[i].kind == DivKind::NoteHeading && divs[i + 1].kind == DivKind::NoteText {
            clippings.push(Clipping::new(&title, &divs[i].text, &divs[i + 1].text)?);
            i += 2;
        } else {
            unpaired += 1;
            i += 1;
        }
    }
    tracing::debug!(
        clippings = clippings.len(),
        unpaired,
        "Parsed HTML notebook export"
    );

    for pair in clippings.windows(2) {
        let (previous, current) = (pair[0].start_location(), pair[1].start_location());
        if previous > current {
            return Err(ParseError::OutOfOrder { previous, current });
        }
    }

    let highlights = attach_adjacent_notes(clippings)?;
    Ok(ClippingSet {
        highlights,
        log: Vec::new(),
    })
}
