//! Matching module
//!
//! Drives alignment and injection for a batch of highlights and keeps the
//! per-highlight log.

mod orchestrator;
mod report;
mod types;

pub use orchestrator::{apply_clippings, find_match};
pub use report::{Outcome, Report};
pub use types::Match;
