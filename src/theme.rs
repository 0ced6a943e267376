//! Theme files: editor background plus optional block color overrides
//!
//! Provides YAML-based themes with compile-time embedded built-ins and
//! user-defined themes from the config directory.
//!
//! Theme loading priority:
//! 1. User config: `~/.config/blocktint/themes/{id}.yaml`
//! 2. Embedded: Built-in themes compiled into binary

use std::path::Path;

use serde::Deserialize;

use crate::category::{CategoryColors, HighlightCategory};
use crate::config_paths;

// Embed theme YAML files at compile time
pub const DEFAULT_DARK_YAML: &str = include_str!("../themes/dark.yaml");
pub const DEFAULT_LIGHT_YAML: &str = include_str!("../themes/light.yaml");

/// A built-in theme entry
pub struct BuiltinTheme {
    /// Stable identifier for config (e.g. "default-dark")
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in themes
pub const BUILTIN_THEMES: &[BuiltinTheme] = &[
    BuiltinTheme {
        id: "default-dark",
        yaml: DEFAULT_DARK_YAML,
    },
    BuiltinTheme {
        id: "default-light",
        yaml: DEFAULT_LIGHT_YAML,
    },
];

/// Where the theme came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeSource {
    /// User-defined theme in ~/.config/blocktint/themes/
    User,
    /// Built-in theme embedded in binary
    Builtin,
}

/// Information about an available theme
#[derive(Debug, Clone)]
pub struct ThemeInfo {
    /// Stable identifier (e.g., "default-dark", "my-custom-theme")
    pub id: String,
    /// Display name from YAML (e.g., "Default Dark")
    pub name: String,
    /// Where this theme is loaded from
    pub source: ThemeSource,
}

/// Load a theme from a YAML file
pub fn from_file(path: &Path) -> Result<Theme, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read theme file {}: {}", path.display(), e))?;
    Theme::from_yaml(&content)
}

/// Load theme by id with priority: user → builtin
pub fn load_theme(id: &str) -> Result<Theme, String> {
    match config_paths::themes_dir() {
        Some(dir) => load_theme_from(&dir, id),
        None => Theme::from_builtin(id),
    }
}

/// Like [`load_theme`], looking for user themes in `user_dir`
pub fn load_theme_from(user_dir: &Path, id: &str) -> Result<Theme, String> {
    let user_path = user_dir.join(format!("{}.yaml", id));
    if user_path.exists() {
        tracing::info!("Loading user theme from {}", user_path.display());
        return from_file(&user_path);
    }

    tracing::info!("Loading builtin theme: {}", id);
    Theme::from_builtin(id)
}

/// List all available themes from all sources
///
/// User themes override builtins with the same id.
pub fn list_available_themes() -> Vec<ThemeInfo> {
    match config_paths::themes_dir() {
        Some(dir) => list_themes_in(&dir),
        None => list_themes_in(Path::new("")),
    }
}

/// Like [`list_available_themes`], scanning `user_dir` for user themes
pub fn list_themes_in(user_dir: &Path) -> Vec<ThemeInfo> {
    let mut themes = Vec::new();
    let mut seen_ids = std::collections::HashSet::new();

    if let Ok(entries) = std::fs::read_dir(user_dir) {
        let mut paths: Vec<_> = entries
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.extension().is_some_and(|ext| ext == "yaml" || ext == "yml"))
            .collect();
        paths.sort();

        for path in paths {
            let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if seen_ids.insert(id.to_string()) {
                let name = extract_theme_name(&path).unwrap_or_else(|| id.to_string());
                themes.push(ThemeInfo {
                    id: id.to_string(),
                    name,
                    source: ThemeSource::User,
                });
            }
        }
    }

    for builtin in BUILTIN_THEMES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Theme::from_yaml(builtin.yaml)
                .map(|t| t.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            themes.push(ThemeInfo {
                id: builtin.id.to_string(),
                name,
                source: ThemeSource::Builtin,
            });
        }
    }

    themes
}

/// Extract theme name from YAML file without full parsing
fn extract_theme_name(path: &Path) -> Option<String> {
    let content = std::fs::read_to_string(path).ok()?;
    for line in content.lines() {
        if let Some(value) = line.trim().strip_prefix("name:") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            return Some(value.to_string());
        }
    }
    None
}

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        match hex.len() {
            6 => Ok(Color::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Ok(Color::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// "#RRGGBB" when opaque, "#RRGGBBAA" otherwise
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

/// Raw theme data as parsed from YAML
#[derive(Debug, Clone, Deserialize)]
pub struct ThemeData {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    pub editor: EditorThemeData,
    #[serde(default)]
    pub blocks: BlocksThemeData,
}

/// Editor area colors
#[derive(Debug, Clone, Deserialize)]
pub struct EditorThemeData {
    pub background: String,
}

/// Per-category overrides (all optional; missing ones use the stock colors)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BlocksThemeData {
    #[serde(default)]
    pub import: Option<String>,
    #[serde(default)]
    pub method: Option<String>,
    #[serde(default)]
    pub statement: Option<String>,
    #[serde(default)]
    pub class: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
}

impl BlocksThemeData {
    fn get(&self, category: HighlightCategory) -> Option<&str> {
        let value = match category {
            HighlightCategory::Import => &self.import,
            HighlightCategory::Method => &self.method,
            HighlightCategory::Statement => &self.statement,
            HighlightCategory::Class => &self.class,
            HighlightCategory::Condition => &self.condition,
        };
        value.as_deref()
    }
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    pub name: String,
    pub background: Color,
    pub blocks: CategoryColors,
}

impl Theme {
    /// Load theme from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, String> {
        let data: ThemeData =
            serde_yaml::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))?;
        Self::from_data(data)
    }

    /// Load a built-in theme by id
    pub fn from_builtin(id: &str) -> Result<Self, String> {
        let entry = BUILTIN_THEMES
            .iter()
            .find(|t| t.id == id)
            .ok_or_else(|| format!("Unknown theme id: {}", id))?;
        Theme::from_yaml(entry.yaml)
    }

    /// Convert raw theme data to resolved theme
    pub fn from_data(data: ThemeData) -> Result<Self, String> {
        let mut blocks = CategoryColors::default();
        for category in HighlightCategory::ALL {
            if let Some(hex) = data.blocks.get(category) {
                let color = Color::from_hex(hex)
                    .map_err(|e| format!("blocks.{}: {}", category.name(), e))?;
                blocks.set(category, color);
            }
        }

        Ok(Theme {
            name: data.name,
            background: Color::from_hex(&data.editor.background)
                .map_err(|e| format!("editor.background: {}", e))?,
            blocks,
        })
    }

    /// Default dark theme (YAML-backed with Rust fallback)
    pub fn default_dark() -> Self {
        Theme::from_yaml(DEFAULT_DARK_YAML).unwrap_or_else(|_| Theme {
            name: "Default Dark".to_string(),
            background: Color::rgb(0x1E, 0x1E, 0x1E),
            blocks: CategoryColors::default(),
        })
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::default_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_rejects_non_ascii() {
        assert!(Color::from_hex("#1E1E\u{e9}").is_err());
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GG0000").is_err());
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Color::rgb(0x1E, 0x2F, 0x30).to_hex(), "#1E2F30");
        assert_eq!(Color::rgba(0xE5, 0x9B, 0x05, 0x33).to_hex(), "#E59B0533");
    }

    #[test]
    fn test_bad_override_names_category() {
        let yaml = "version: 1\nname: X\neditor:\n  background: \"#000000\"\nblocks:\n  method: nope\n";
        let err = Theme::from_yaml(yaml).unwrap_err();
        assert!(err.starts_with("blocks.method:"), "{}", err);
    }

    #[test]
    fn test_extract_theme_name_strips_quotes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.yaml");
        std::fs::write(&path, "version: 1\nname: 'Mine'\n").unwrap();
        assert_eq!(extract_theme_name(&path), Some("Mine".to_string()));
    }
}
