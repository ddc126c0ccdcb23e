//! Notifications delivered from the host to the scene.

use glam::Vec2;

/// Input and window notifications in pixel space.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer moved to a new position.
    PointerMoved(Vec2),
    /// Active touch points moved. Only the first point is tracked.
    TouchMoved(Vec<Vec2>),
    /// Display area changed to the given size in pixels.
    Resized { width: f32, height: f32 },
}
