//! Batch matching of highlights against a book's chapters

use crate::align::{locate, min_window_subsequence};
use crate::clippings::Clipping;
use crate::epub::Chapter;
use crate::html::{inject_highlight, HighlightConfig};
use crate::text::{normalize, normalize_whitespace, strip_whitespace};

use super::report::{Outcome, Report};
use super::types::Match;

/// Find where a highlight sits in the book.
///
/// Chapters are searched from the first one every time. The first chapter
/// whose paragraphs contain the highlight's text decides the outcome: if the
/// markup window cannot be rebuilt there, the highlight is a miss.
pub fn find_match(clipping: &Clipping, chapters: &[Chapter]) -> Option<Match> {
    let target = strip_whitespace(&clipping.content);

    for (document_index, chapter) in chapters.iter().enumerate() {
        let blocks = chapter.block_markup();
        let Some(block_indices) = locate(&blocks, &clipping.content) else {
            continue;
        };

        let raw: String = block_indices.iter().map(|&i| blocks[i]).collect();
        let raw_span = normalize_whitespace(&raw);
        let Some(window) = min_window_subsequence(&raw_span, &target) else {
            tracing::debug!(
                href = %chapter.href,
                "Text located but markup window could not be rebuilt"
            );
            return None;
        };

        return Some(Match {
            clipping: clipping.clone(),
            document_index,
            block_indices,
            raw_span,
            window,
        });
    }

    None
}

/// Locate and inject every highlight, rewriting chapters in place.
///
/// Each highlight is handled on its own against the chapters as they stand
/// after the previous ones, so a miss or a failed injection never stops the
/// batch.
pub fn apply_clippings(
    chapters: &mut [Chapter],
    clippings: &[Clipping],
    config: &HighlightConfig,
) -> Report {
    let mut report = Report::default();

    for clipping in clippings.iter().filter(|c| c.is_highlight()) {
        let content = normalize(&clipping.content);

        let Some(m) = find_match(clipping, chapters) else {
            tracing::debug!("Not found: '{}'", content);
            report.record(Outcome::NotFound { content });
            continue;
        };

        let chapter = &mut chapters[m.document_index];
        let injected = inject_highlight(&m, config).map_err(|e| e.to_string()).and_then(|result| {
            let replacements: Vec<(usize, String)> =
                m.block_indices.iter().copied().zip(result.blocks).collect();
            chapter
                .replace_blocks(&replacements)
                .map(|_| result.marker_pairs)
                .map_err(|e| e.to_string())
        });

        match injected {
            Ok(pairs) => {
                tracing::debug!(href = %chapter.href, pairs, "Found: '{}'", content);
                report.marker_pairs += pairs;
                report.record(Outcome::Found {
                    content,
                    destination: chapter.href.clone(),
                });
            }
            Err(reason) => {
                tracing::error!(href = %chapter.href, "Highlight injection aborted: {}", reason);
                report.record(Outcome::Failed { content, reason });
            }
        }
    }

    if report.missed() > 0 {
        tracing::warn!(
            "Only {} out of {} highlights found",
            report.found(),
            report.total()
        );
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn highlight(content: &str) -> Clipping {
        Clipping::new("Book", "- Your Highlight | Location 1-2", content).unwrap()
    }

    fn chapters() -> Vec<Chapter> {
        vec![
            Chapter::new("c0.xhtml", "<html><body><h1>One</h1><p>Nothing here.</p></body></html>"),
            Chapter::new(
                "c1.xhtml",
                "<html><body>\n<p>The quick</p>\n<p> fox jumps</p>\n<p>over the <i>lazy</i>\u{00a0}dog.</p></body></html>",
            ),
        ]
    }

    #[test]
    fn test_find_match_across_blocks() {
        let chapters = chapters();
        let m = find_match(&highlight("quick fox"), &chapters).unwrap();

        assert_eq!(m.document_index, 1);
        assert_eq!(m.block_indices, vec![0, 1]);
        assert_eq!(m.raw_span, "<p>The quick</p><p> fox jumps</p>");
        assert_eq!(m.highlighted_window(), "quick</p><p> fox");
    }

    #[test]
    fn test_find_match_inline_markup() {
        let chapters = chapters();
        let m = find_match(&highlight("the lazy dog"), &chapters).unwrap();

        assert_eq!(m.block_indices, vec![2]);
        assert_eq!(m.highlighted_window(), "the <i>lazy</i> dog");
    }

    #[test]
    fn test_find_match_miss() {
        assert!(find_match(&highlight("slow tortoise"), &chapters()).is_none());
    }

    #[test]
    fn test_apply_end_to_end() {
        let mut chapters = chapters();
        let config = HighlightConfig {
            class_name: "h".to_string(),
            color: "yellow".to_string(),
            ..HighlightConfig::default()
        };
        let open = r#"<mark class="h" style="background-color: yellow;">"#;

        let report = apply_clippings(&mut chapters, &[highlight("quick fox")], &config);

        assert_eq!(report.to_string(), "1/1 highlights applied.");
        assert_eq!(report.marker_pairs, 2);
        assert_eq!(
            report.lines(),
            vec!["✔ Found: 'quick fox' in c1.xhtml".to_string()]
        );
        let expected = format!(
            "<html><body>\n<p>The {open}quick</mark></p>\n<p>{open} fox</mark> jumps</p>\n<p>over the <i>lazy</i>\u{00a0}dog.</p></body></html>",
            open = open
        );
        assert_eq!(chapters[1].markup(), expected);
        assert!(!chapters[0].is_modified());
    }

    #[test]
    fn test_apply_counts_misses_without_stopping() {
        let mut chapters = chapters();
        let clippings = vec![
            highlight("Nothing here."),
            highlight("not in this book"),
            highlight("over the"),
        ];

        let report = apply_clippings(&mut chapters, &clippings, &HighlightConfig::default());

        assert_eq!(report.found(), 2);
        assert_eq!(report.total(), 3);
        assert_eq!(report.marker_pairs, 2);
        assert_eq!(report.lines()[1], "✘ Not found: 'not in this book'");
        let all: String = chapters.iter().map(|c| c.markup()).collect();
        assert_eq!(all.matches("<mark ").count(), 2);
        assert_eq!(all.matches("</mark>").count(), 2);
    }

    #[test]
    fn test_second_highlight_in_same_paragraph_keeps_first() {
        let mut chapters = chapters();
        let clippings = vec![highlight("over the"), highlight("lazy dog")];

        let report = apply_clippings(&mut chapters, &clippings, &HighlightConfig::default());

        assert_eq!(report.found(), 2);
        // "lazy dog" starts inside <i>, so its marker is split in two.
        assert_eq!(report.marker_pairs, 3);
        assert_eq!(chapters[1].markup().matches("</mark>").count(), 3);
        assert_well_formed(chapters[1].markup());
    }

    fn assert_well_formed(markup: &str) {
        if let Err(e) = roxmltree::Document::parse(markup) {
            panic!("{} is not well-formed: {}", markup, e);
        }
    }

    fn single(body: &str) -> Vec<Chapter> {
        vec![Chapter::new(
            "c.xhtml",
            format!("<html><body>{}</body></html>", body),
        )]
    }

    #[test]
    fn test_highlight_starting_inside_emphasis_stays_well_formed() {
        let mut chapters = single("<p>one <em>two three</em> four</p>");

        let report = apply_clippings(
            &mut chapters,
            &[highlight("three four")],
            &HighlightConfig::default(),
        );

        assert_eq!(report.found(), 1);
        assert_well_formed(chapters[0].markup());
        assert!(chapters[0].markup().contains("three</mark></em><mark "));
    }

    #[test]
    fn test_character_references_in_chapter() {
        let mut chapters = single("<p>It&#8217;s a truth universally acknowledged</p>");

        let report = apply_clippings(
            &mut chapters,
            &[highlight("It\u{2019}s a truth")],
            &HighlightConfig::default(),
        );

        assert_eq!(report.to_string(), "1/1 highlights applied.");
        assert!(chapters[0]
            .markup()
            .contains("\">It&#8217;s a truth</mark> universally"));
    }

    #[test]
    fn test_overlapping_highlight_after_note() {
        let mut chapters = single("<p>one two three four</p>");
        let noted = highlight("one two").with_note("n");
        let clippings = vec![noted, highlight("two three"), highlight("[R.N.: n]")];

        let report = apply_clippings(&mut chapters, &clippings, &HighlightConfig::default());

        assert_eq!(report.found(), 2);
        assert_eq!(report.lines()[2], "✘ Not found: '[R.N.: n]'");
        assert_well_formed(chapters[0].markup());
        assert_eq!(chapters[0].markup().matches("[R.N.: n]").count(), 1);
    }
}
