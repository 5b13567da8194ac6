//! EPUB types

use std::ops::Range;

use crate::text::markup;

use super::EpubError;

/// Manifest item from OPF
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestItem {
    pub id: String,
    /// Path inside the archive, already resolved against the OPF directory
    pub path: String,
    pub media_type: String,
    pub properties: Option<String>,
}

impl ManifestItem {
    /// XHTML content document (navigation documents excluded)
    pub fn is_document(&self) -> bool {
        let is_markup = matches!(
            self.media_type.as_str(),
            "application/xhtml+xml" | "text/html"
        );
        let is_nav = self
            .properties
            .as_deref()
            .is_some_and(|p| p.split_whitespace().any(|p| p == "nav"));
        is_markup && !is_nav
    }
}

/// One XHTML document of the book
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Path inside the archive
    pub href: String,
    markup: String,
    modified: bool,
}

impl Chapter {
    pub fn new(href: impl Into<String>, markup: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            markup: markup.into(),
            modified: false,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Byte ranges of the chapter's paragraphs
    pub fn blocks(&self) -> Vec<Range<usize>> {
        markup::find_blocks(&self.markup)
    }

    /// Markup of each paragraph
    pub fn block_markup(&self) -> Vec<&str> {
        self.blocks()
            .into_iter()
            .map(|r| &self.markup[r])
            .collect()
    }

    /// Replace paragraphs by index.
    ///
    /// Indices refer to [`Chapter::blocks`] as it was before the call.
    /// Markup between paragraphs is left untouched.
    pub fn replace_blocks(&mut self, replacements: &[(usize, String)]) -> Result<(), EpubError> {
        let blocks = self.blocks();
        let mut ordered: Vec<&(usize, String)> = replacements.iter().collect();
        ordered.sort_by(|a, b| b.0.cmp(&a.0));

        for (index, _) in &ordered {
            if *index >= blocks.len() {
                return Err(EpubError::BlockOutOfRange {
                    href: self.href.clone(),
                    index: *index,
                    count: blocks.len(),
                });
            }
        }

        for (index, markup) in ordered {
            self.markup.replace_range(blocks[*index].clone(), markup);
        }
        if !replacements.is_empty() {
            self.modified = true;
        }
        Ok(())
    }
}
