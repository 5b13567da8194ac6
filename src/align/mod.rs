//! Alignment of clipping text against chapter markup
//!
//! Two steps, coarse then fine:
//!
//! 1. [`locate`] finds the paragraphs whose visible text contains the
//!    clipping, using exact substring search on normalized text.
//! 2. [`min_window_subsequence`] finds the smallest slice of those
//!    paragraphs' raw markup that still contains every character of the
//!    clipping in order, stepping over tags.

mod locator;
mod window;

pub use locator::locate;
pub use window::min_window_subsequence;
