//! Colour themes for the particle field.

use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Colour theme the surface tints sprites with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorTheme {
    #[default]
    Cyan,
    Green,
    White,
    Magenta,
    Yellow,
    Red,
    Blue,
}

impl ColorTheme {
    /// Cycle to the next color theme.
    pub fn next(&self) -> Self {
        match self {
            ColorTheme::Cyan => ColorTheme::Green,
            ColorTheme::Green => ColorTheme::Magenta,
            ColorTheme::Magenta => ColorTheme::Yellow,
            ColorTheme::Yellow => ColorTheme::Red,
            ColorTheme::Red => ColorTheme::Blue,
            ColorTheme::Blue => ColorTheme::White,
            ColorTheme::White => ColorTheme::Cyan,
        }
    }

    /// Convert theme to Ratatui Color.
    pub fn color(self) -> Color {
        match self {
            ColorTheme::Cyan => Color::Cyan,
            ColorTheme::Green => Color::Green,
            ColorTheme::White => Color::White,
            ColorTheme::Magenta => Color::Magenta,
            ColorTheme::Yellow => Color::Yellow,
            ColorTheme::Red => Color::Red,
            ColorTheme::Blue => Color::Blue,
        }
    }

    /// Hue in degrees and saturation used for shaded sprites.
    ///
    /// White has zero saturation, so only lightness varies.
    pub fn hue_saturation(self) -> (f32, f32) {
        match self {
            ColorTheme::Cyan => (185.0, 0.8),
            ColorTheme::Green => (125.0, 0.7),
            ColorTheme::White => (0.0, 0.0),
            ColorTheme::Magenta => (300.0, 0.7),
            ColorTheme::Yellow => (52.0, 0.85),
            ColorTheme::Red => (2.0, 0.75),
            ColorTheme::Blue => (222.0, 0.8),
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            ColorTheme::Cyan => "cyan",
            ColorTheme::Green => "green",
            ColorTheme::White => "white",
            ColorTheme::Magenta => "magenta",
            ColorTheme::Yellow => "yellow",
            ColorTheme::Red => "red",
            ColorTheme::Blue => "blue",
        }
    }
}
