//! HTML processing module
//!
//! Provides the markup rewriting half of the engine:
//! - Highlight marker injection across paragraph boundaries
//! - The colour palette used for marker backgrounds

mod highlight_injector;
mod palette;

pub use highlight_injector::{inject_highlight, HighlightConfig, InjectError, InjectionResult};
pub use palette::{is_valid_hex_color, Palette, DEFAULT_COLOR, KNOWN_COLORS};
