//! Per-highlight outcome log and summary

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;

/// What happened to one highlight
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Found { content: String, destination: String },
    NotFound { content: String },
    Failed { content: String, reason: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Found {
                content,
                destination,
            } => write!(f, "✔ Found: '{}' in {}", content, destination),
            Outcome::NotFound { content } => write!(f, "✘ Not found: '{}'", content),
            Outcome::Failed { content, reason } => {
                write!(f, "✘ Failed to inject: '{}' ({})", content, reason)
            }
        }
    }
}

/// Outcome of a whole batch
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
    /// Lines carried over from parsing, such as unmatched notes
    pub notes: Vec<String>,
    /// Marker pairs written across all chapters
    pub marker_pairs: usize,
}

impl Report {
    pub fn record(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    /// Highlights applied
    pub fn found(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Found { .. }))
            .count()
    }

    /// Highlights attempted
    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn missed(&self) -> usize {
        self.total() - self.found()
    }

    /// Log lines, one per highlight, then any parser notes
    pub fn lines(&self) -> Vec<String> {
        self.outcomes
            .iter()
            .map(ToString::to_string)
            .chain(self.notes.iter().cloned())
            .collect()
    }

    /// Write the log, creating parent directories
    pub fn write_log(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut body = String::new();
        for line in self.lines() {
            body.push_str(&line);
            body.push('\n');
        }
        fs::write(path, body)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} highlights applied.", self.found(), self.total())
    }
}
