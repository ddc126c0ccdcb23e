//! Color utility functions for sprite shading.

use motes_core::{ColorTheme, SpriteKind};
use ratatui::style::Color;

/// Shade a sprite of `kind` at `intensity` (0.0-1.0) in the theme's hue.
///
/// Orbs stay dark and slightly shifted in hue so they read as a backdrop;
/// field particles are the brightest.
pub fn sprite_color(theme: ColorTheme, kind: SpriteKind, intensity: f32) -> Color {
    let intensity = intensity.clamp(0.0, 1.0);
    let (hue, saturation) = theme.hue_saturation();

    let (hue, lightness) = match kind {
        SpriteKind::Orb => (hue - 20.0, 0.08 + intensity * 0.35),
        SpriteKind::Particle => (hue, 0.3 + intensity * 0.45),
        SpriteKind::Mote => (hue, 0.55 + intensity * 0.4),
        SpriteKind::Spark => (hue + 30.0, 0.45 + intensity * 0.5),
    };

    hsl_to_rgb(hue.rem_euclid(360.0), saturation, lightness.min(1.0))
}

/// Convert HSL to RGB color.
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Color {
    if s == 0.0 {
        let v = (l * 255.0) as u8;
        return Color::Rgb(v, v, v);
    }

    let q = if l < 0.5 {
        l * (1.0 + s)
    } else {
        l + s - l * s
    };
    let p = 2.0 * l - q;

    let h = h / 360.0;

    let r = hue_to_rgb(p, q, h + 1.0 / 3.0);
    let g = hue_to_rgb(p, q, h);
    let b = hue_to_rgb(p, q, h - 1.0 / 3.0);

    Color::Rgb((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8)
}

fn hue_to_rgb(p: f32, q: f32, mut t: f32) -> f32 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
