//! Viewport geometry in pixel space.

use glam::Vec2;

/// Size of the display area in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Create a viewport, clamping negative dimensions to zero.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: width.max(0.0),
            height: height.max(0.0),
        }
    }

    /// Centre of the viewport.
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Whether a point lies inside `[0, width] × [0, height]`.
    pub fn contains(&self, point: Vec2) -> bool {
        (0.0..=self.width).contains(&point.x) && (0.0..=self.height).contains(&point.y)
    }

    /// Map unit coordinates (each in `[0, 1]`) onto the viewport.
    pub fn at_fraction(&self, fx: f32, fy: f32) -> Vec2 {
        Vec2::new(fx * self.width, fy * self.height)
    }
}
