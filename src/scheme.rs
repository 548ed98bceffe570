//! Color-scheme documents (tinted-theming `base16`/`base24` YAML).

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SchemeError;

/// Palette slots every scheme must define.
pub const BASE16_SLOTS: [&str; 16] = [
    "base00", "base01", "base02", "base03", "base04", "base05", "base06", "base07", "base08",
    "base09", "base0A", "base0B", "base0C", "base0D", "base0E", "base0F",
];

/// Extra slots required when `system: base24`.
pub const BASE24_EXTRA_SLOTS: [&str; 8] = [
    "base10", "base11", "base12", "base13", "base14", "base15", "base16", "base17",
];

/// Palette used when a brand new scheme is created without an active one.
const DEFAULT_PALETTE: [(&str, &str); 16] = [
    ("base00", "#181818"),
    ("base01", "#282828"),
    ("base02", "#383838"),
    ("base03", "#585858"),
    ("base04", "#b8b8b8"),
    ("base05", "#d8d8d8"),
    ("base06", "#e8e8e8"),
    ("base07", "#f8f8f8"),
    ("base08", "#ab4642"),
    ("base09", "#dc9656"),
    ("base0A", "#f7ca88"),
    ("base0B", "#a1b56c"),
    ("base0C", "#86c1b9"),
    ("base0D", "#7cafc2"),
    ("base0E", "#ba8baf"),
    ("base0F", "#a16946"),
];

/// A named palette plus descriptive metadata.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Scheme {
    pub system: String,
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub slug: String,
    pub author: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub variant: String,
    pub palette: BTreeMap<String, String>,
}

impl Scheme {
    /// Parse a scheme from YAML text.
    pub fn from_yaml(text: &str) -> Result<Self, SchemeError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a scheme file.
    pub fn load(path: &Path) -> Result<Self, SchemeError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml(&text)
    }

    pub fn to_yaml(&self) -> Result<String, SchemeError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// A `base16` scheme with the built-in default palette.
    pub fn with_default_palette(name: &str) -> Self {
        Self {
            system: "base16".to_string(),
            name: name.to_string(),
            slug: slugify(name),
            author: String::new(),
            description: String::new(),
            variant: "dark".to_string(),
            palette: DEFAULT_PALETTE
                .iter()
                .map(|(slot, hex)| (slot.to_string(), hex.to_string()))
                .collect(),
        }
    }

    /// Slots this scheme's `system` requires.
    pub fn required_slots(&self) -> Vec<&'static str> {
        let mut slots = BASE16_SLOTS.to_vec();
        if self.system.eq_ignore_ascii_case("base24") {
            slots.extend(BASE24_EXTRA_SLOTS);
        }
        slots
    }

    /// The first required slot the palette does not define.
    pub fn missing_slot(&self) -> Option<&'static str> {
        self.required_slots()
            .into_iter()
            .find(|slot| !self.palette.contains_key(*slot))
    }

    /// Supplied slug, or one derived from the name.
    pub fn effective_slug(&self) -> String {
        if self.slug.is_empty() {
            slugify(&self.name)
        } else {
            self.slug.clone()
        }
    }
}

/// Lowercase, with every run of non-alphanumerics collapsed to one `-`.
pub fn slugify(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_dash = false;
    for ch in input.chars().flat_map(char::to_lowercase) {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(ch);
        } else {
            pending_dash = true;
        }
    }
    slug
}
