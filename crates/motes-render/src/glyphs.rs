//! Glyph selection for sprites.

use motes_core::SpriteKind;

/// Point glyphs from smallest to largest.
pub const POINT_CHARS: &[char] = &['·', '•', '●'];

/// Spark glyphs from freshest to most faded.
pub const SPARK_CHARS: &[char] = &['*', '∙', '·'];

/// Shade characters for orb glow, faintest first.
pub const GLOW_CHARS: &[char] = &['░', '▒', '▓'];

/// Glyph for a point-like sprite of diameter `size` pixels.
pub fn point_char(kind: SpriteKind, size: f32, opacity: f32) -> char {
    match kind {
        SpriteKind::Spark => {
            if opacity > 0.66 {
                SPARK_CHARS[0]
            } else if opacity > 0.33 {
                SPARK_CHARS[1]
            } else {
                SPARK_CHARS[2]
            }
        }
        _ => {
            if size < 2.0 {
                POINT_CHARS[0]
            } else if size < 3.5 {
                POINT_CHARS[1]
            } else {
                POINT_CHARS[2]
            }
        }
    }
}

/// Glow glyph for an orb cell at `intensity`, or `None` when too faint to show.
pub fn glow_char(intensity: f32) -> Option<char> {
    if intensity > 0.3 {
        Some(GLOW_CHARS[2])
    } else if intensity > 0.16 {
        Some(GLOW_CHARS[1])
    } else if intensity > 0.05 {
        Some(GLOW_CHARS[0])
    } else {
        None
    }
}
