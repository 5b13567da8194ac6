//! Highlight colour table

use std::sync::LazyLock;

use regex::Regex;

/// Named colours understood on the command line and in exports
pub const KNOWN_COLORS: [(&str, &str); 7] = [
    ("yellow", "#fff7aeea"),
    ("green", "#b6e4c7eb"),
    ("blue", "#aecbfac5"),
    ("red", "#f28b82ca"),
    ("purple", "#d7aefbd0"),
    ("gray", "#dbd6d6c8"),
    ("dark-gray", "#777777C9"),
];

pub const DEFAULT_COLOR: &str = "yellow";

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{4}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("hex colour pattern is valid")
});

/// `#rgb`, `#rgba`, `#rrggbb` or `#rrggbbaa`
pub fn is_valid_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Colour name to CSS colour lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: Vec<(String, String)>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            entries: KNOWN_COLORS
                .iter()
                .map(|(name, code)| (name.to_string(), code.to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// Code for a colour name, ignoring case
    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.trim();
        self.entries
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, code)| code.as_str())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Resolve a colour given as a palette name or a hex code
    pub fn resolve(&self, value: &str) -> Option<String> {
        self.get(value)
            .map(str::to_string)
            .or_else(|| is_valid_hex_color(value).then(|| value.to_string()))
    }
}
