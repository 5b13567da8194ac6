//! Splitting a device-wide `My Clippings.txt` into one file per book

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use super::txt::{split_entries, ENTRY_SEPARATOR};
use super::ParseError;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("filename pattern is valid"));

/// All entries of one book, in export order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleGroup {
    /// Title with characters that are unsafe in file names removed
    pub title: String,
    pub entries: Vec<Vec<String>>,
}

/// Group export entries by book title, preserving first-seen order
pub fn group_by_title(raw: &str) -> Vec<TitleGroup> {
    let raw = raw.replace('\u{feff}', "");
    let mut groups: Vec<TitleGroup> = Vec::new();

    for lines in split_entries(&raw) {
        let title = UNSAFE_FILENAME_CHARS.replace_all(lines[0], "").into_owned();
        let entry = lines.iter().map(|l| l.to_string()).collect();
        match groups.iter_mut().find(|g| g.title == title) {
            Some(group) => group.entries.push(entry),
            None => groups.push(TitleGroup {
                title,
                entries: vec![entry],
            }),
        }
    }

    groups
}

/// Write each book's entries to `<out_dir>/<title>.txt`
pub fn split_txt_clippings_by_title(raw_path: &Path, out_dir: &Path) -> Result<Vec<PathBuf>, ParseError> {
    let raw = fs::read_to_string(raw_path)?;
    fs::create_dir_all(out_dir)?;

    let mut written = Vec::new();
    for group in group_by_title(&raw) {
        let path = out_dir.join(format!("{}.txt", group.title));
        let mut body = String::new();
        for entry in &group.entries {
            body.push_str(&entry.join("\n"));
            body.push('\n');
            body.push_str(ENTRY_SEPARATOR);
            body.push('\n');
        }
        fs::write(&path, body)?;
        tracing::info!("Writing {} clips in {}", group.entries.len(), path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPORT: &str = "Dune: Deluxe
- Your Highlight | Location 1-2

first
==========
Emma
- Your Highlight | Location 3-4

second
==========
Dune: Deluxe
- Your Note | Location 2

third
==========
";

    #[test]
    fn test_group_by_title() {
        let groups = group_by_title(EXPORT);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "Dune Deluxe");
        assert_eq!(groups[0].entries.len(), 2);
        assert_eq!(groups[1].title, "Emma");
        assert_eq!(groups[0].entries[1][2], "third");
    }

    #[test]
    fn test_split_writes_reparsable_files() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("My Clippings.txt");
        fs::write(&raw_path, EXPORT).unwrap();
        let out = dir.path().join("clippings");

        let written = split_txt_clippings_by_title(&raw_path, &out).unwrap();

        assert_eq!(written.len(), 2);
        let dune = fs::read_to_string(out.join("Dune Deluxe.txt")).unwrap();
        let set = crate::clippings::parse_txt_clippings(&dune).unwrap();
        assert_eq!(set.highlights.len(), 1);
        assert_eq!(set.highlights[0].note.as_deref(), Some("third"));
    }
}
