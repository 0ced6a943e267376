//! Highlight categories and their translucent base colors

use serde::{Deserialize, Serialize};

use crate::theme::Color;

/// Semantic bucket a decorated range belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HighlightCategory {
    Import,
    Method,
    Statement,
    Class,
    Condition,
}

impl HighlightCategory {
    pub const ALL: [HighlightCategory; 5] = [
        HighlightCategory::Import,
        HighlightCategory::Method,
        HighlightCategory::Statement,
        HighlightCategory::Class,
        HighlightCategory::Condition,
    ];

    /// Built-in base color (about 20% opacity)
    pub const fn base_color(self) -> Color {
        match self {
            HighlightCategory::Import => Color::rgba(0xF6, 0xF8, 0xF7, 0x33),
            HighlightCategory::Method => Color::rgba(0xE5, 0x9B, 0x05, 0x33),
            HighlightCategory::Statement => Color::rgba(0x6F, 0xD2, 0xE5, 0x33),
            HighlightCategory::Class => Color::rgba(0xA8, 0x61, 0xE0, 0x33),
            HighlightCategory::Condition => Color::rgba(0xE0, 0x61, 0x85, 0x33),
        }
    }

    /// Stable lowercase name, as used in theme files and output
    pub const fn name(self) -> &'static str {
        match self {
            HighlightCategory::Import => "import",
            HighlightCategory::Method => "method",
            HighlightCategory::Statement => "statement",
            HighlightCategory::Class => "class",
            HighlightCategory::Condition => "condition",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.name() == name)
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

/// Base color per category, defaulting to the built-in palette
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryColors([Color; 5]);

impl Default for CategoryColors {
    fn default() -> Self {
        Self(HighlightCategory::ALL.map(HighlightCategory::base_color))
    }
}

impl CategoryColors {
    pub fn get(&self, category: HighlightCategory) -> Color {
        self.0[category.index()]
    }

    pub fn set(&mut self, category: HighlightCategory, color: Color) {
        self.0[category.index()] = color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, category) in HighlightCategory::ALL.into_iter().enumerate() {
            assert_eq!(category.index(), i);
        }
    }

    #[test]
    fn test_name_round_trip() {
        for category in HighlightCategory::ALL {
            assert_eq!(HighlightCategory::from_name(category.name()), Some(category));
        }
        assert_eq!(HighlightCategory::from_name("loop"), None);
    }

    #[test]
    fn test_base_colors_are_translucent() {
        for category in HighlightCategory::ALL {
            assert_eq!(category.base_color().a, 0x33);
        }
    }

    #[test]
    fn test_overrides() {
        let mut colors = CategoryColors::default();
        let red = Color::rgba(0xFF, 0, 0, 0x80);
        colors.set(HighlightCategory::Class, red);
        assert_eq!(colors.get(HighlightCategory::Class), red);
        assert_eq!(
            colors.get(HighlightCategory::Method),
            HighlightCategory::Method.base_color()
        );
    }
}
