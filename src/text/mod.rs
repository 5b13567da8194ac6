//! Text utilities shared by the parsers and the alignment engine
//!
//! - `normalize`: whitespace normalization used as the comparison substrate
//! - `markup`: paragraph scanning and visible-text extraction for XHTML

pub mod markup;
mod normalize;

pub use normalize::{is_space, normalize, normalize_whitespace, strip_whitespace};
