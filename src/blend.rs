//! Alpha blending of category colors over the editor background

use std::fmt;

use serde::{Serialize, Serializer};

use crate::category::{CategoryColors, HighlightCategory};
use crate::theme::Color;

/// Opaque render color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// As a [`Color`] with full alpha
    pub const fn to_color(self) -> Color {
        Color::rgb(self.r, self.g, self.b)
    }

    /// `#RRGGBB`
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

/// Composite `color` over `background`.
///
/// Per channel: `c * a + bg * (1 - a)`, with `a` taken from `color`. The
/// background's own alpha is ignored and the result is always opaque.
pub fn blend(color: Color, background: Color) -> Rgb {
    let alpha = f32::from(color.a) / 255.0;
    let channel = |c: u8, bg: u8| {
        let value = (f32::from(c) / 255.0) * alpha + (f32::from(bg) / 255.0) * (1.0 - alpha);
        (value * 255.0 + 0.5).clamp(0.0, 255.0) as u8
    };
    Rgb {
        r: channel(color.r, background.r),
        g: channel(color.g, background.g),
        b: channel(color.b, background.b),
    }
}

/// Render color of a category's built-in base color over `background`
pub fn blend_category(category: HighlightCategory, background: Color) -> Rgb {
    blend(category.base_color(), background)
}

/// Render colors for every category against one background.
///
/// Built once per background change; lookups during a pass are plain reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    background: Color,
    colors: CategoryColors,
    rendered: [Rgb; 5],
}

impl Palette {
    pub fn new(background: Color, colors: CategoryColors) -> Self {
        let rendered = HighlightCategory::ALL.map(|c| blend(colors.get(c), background));
        Self {
            background,
            colors,
            rendered,
        }
    }

    /// Palette with the built-in category colors
    pub fn with_background(background: Color) -> Self {
        Self::new(background, CategoryColors::default())
    }

    pub fn background(&self) -> Color {
        self.background
    }

    pub fn colors(&self) -> &CategoryColors {
        &self.colors
    }

    pub fn render(&self, category: HighlightCategory) -> Rgb {
        self.rendered[category.index()]
    }
}
