//! Configuration management for rekindle

use std::env;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::html::{HighlightConfig, Palette, DEFAULT_COLOR};

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: PathsConfig,
    pub highlight: HighlightSettings,
}

#[derive(Debug, Clone)]
pub struct PathsConfig {
    pub assets_dir: PathBuf,
    pub clippings_dir: PathBuf,
    pub processed_dir: PathBuf,
    pub logs_dir: PathBuf,
}

#[derive(Debug, Clone)]
pub struct HighlightSettings {
    /// Palette name or hex code
    pub color: String,
    /// Prefer the colour recorded on each clipping when it has one
    pub use_clipping_colors: bool,
}

impl PathsConfig {
    fn rooted_at(assets_dir: PathBuf, logs_dir: PathBuf) -> Self {
        PathsConfig {
            clippings_dir: assets_dir.join("clippings"),
            processed_dir: assets_dir.join("processed"),
            assets_dir,
            logs_dir,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            paths: PathsConfig::rooted_at(PathBuf::from("assets"), PathBuf::from("logs")),
            highlight: HighlightSettings {
                color: DEFAULT_COLOR.to_string(),
                use_clipping_colors: false,
            },
        }
    }
}

impl Config {
    /// Build from `REKINDLE_*` variables, falling back to defaults
    pub fn from_env() -> Self {
        let assets_dir = env::var("REKINDLE_ASSETS_DIR").unwrap_or_else(|_| "assets".to_string());
        let logs_dir = env::var("REKINDLE_LOGS_DIR").unwrap_or_else(|_| "logs".to_string());

        Config {
            paths: PathsConfig::rooted_at(PathBuf::from(assets_dir), PathBuf::from(logs_dir)),
            highlight: HighlightSettings {
                color: env::var("REKINDLE_HIGHLIGHT_COLOR")
                    .unwrap_or_else(|_| DEFAULT_COLOR.to_string()),
                use_clipping_colors: env::var("REKINDLE_CLIPPING_COLORS")
                    .map(|v| matches!(v.to_lowercase().as_str(), "1" | "true" | "yes"))
                    .unwrap_or(false),
            },
        }
    }

    /// Marker settings with the configured colour resolved against the palette
    pub fn highlight_config(&self) -> Result<HighlightConfig> {
        let palette = Palette::default();
        let color = palette
            .resolve(&self.highlight.color)
            .ok_or_else(|| AppError::InvalidColor {
                value: self.highlight.color.clone(),
                valid: palette.names().collect::<Vec<_>>().join(", "),
            })?;

        Ok(HighlightConfig {
            color,
            palette,
            use_clipping_colors: self.highlight.use_clipping_colors,
            ..HighlightConfig::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = Config::default();
        assert_eq!(config.paths.clippings_dir, PathBuf::from("assets/clippings"));
        assert_eq!(config.paths.processed_dir, PathBuf::from("assets/processed"));
        assert_eq!(config.paths.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_resolve_palette_name() {
        let mut config = Config::default();
        config.highlight.color = "Yellow".to_string();
        let resolved = config.highlight_config().unwrap();
        assert_eq!(resolved.color, HighlightConfig::default().color);
    }

    #[test]
    fn test_resolve_hex_passthrough() {
        let mut config = Config::default();
        config.highlight.color = "#a1b2c3".to_string();
        assert_eq!(config.highlight_config().unwrap().color, "#a1b2c3");
    }

    #[test]
    fn test_invalid_color() {
        let mut config = Config::default();
        config.highlight.color = "chartreuse-ish".to_string();
        let err = config.highlight_config().unwrap_err();
        assert!(matches!(err, AppError::InvalidColor { .. }));
        assert_eq!(
            err.to_string(),
            "Invalid highlight color 'chartreuse-ish': use a hex code or one of \
             yellow, green, blue, red, purple, gray, dark-gray"
        );
    }
}
