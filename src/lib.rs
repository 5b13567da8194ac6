//! Rekindle
//!
//! Re-injects e-reader highlights and their notes into the markup of the
//! EPUB they were taken from.
//!
//! # Modules
//!
//! - `clippings`: clippings export parsing and note attachment
//! - `text`: whitespace normalization and paragraph scanning
//! - `align`: locating a clipping and rebuilding its markup window
//! - `html`: marker injection and the colour palette
//! - `epub`: reading and writing the EPUB container
//! - `matcher`: batch orchestration and the outcome log

pub mod align;
pub mod clippings;
pub mod config;
pub mod epub;
pub mod error;
pub mod html;
pub mod matcher;
pub mod text;

use std::path::{Path, PathBuf};

use config::Config;
use epub::EpubBook;
use error::{AppError, Result};
use matcher::Report;

/// Where a processed book and its log were written
#[derive(Debug, Clone)]
pub struct Processed {
    pub report: Report,
    pub output: PathBuf,
    pub log: PathBuf,
}

/// Apply a clippings file to a book and write the result and its log
pub fn process_book(ebook: &Path, clippings_path: &Path, config: &Config) -> Result<Processed> {
    let name = ebook
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::InvalidPath(ebook.display().to_string()))?
        .to_string();
    let highlight = config.highlight_config()?;

    let set = clippings::parse_clippings(clippings_path)?;
    let mut book = EpubBook::open(ebook)?;
    tracing::info!(
        "Applying {} highlights to {} ({} documents)",
        set.highlights.len(),
        book.title.as_deref().unwrap_or(&name),
        book.chapters().len()
    );

    let mut report = matcher::apply_clippings(book.chapters_mut(), &set.highlights, &highlight);
    report.notes = set.log;

    let output = config.paths.processed_dir.join(format!("{}.epub", name));
    let log = config.paths.logs_dir.join(format!("{}_log.txt", name));
    book.write_to(&output)?;
    report.write_log(&log)?;
    tracing::info!("{} Saved to {}", report, output.display());

    Ok(Processed {
        report,
        output,
        log,
    })
}
