//! Pointer tracking for the field animator.

use glam::Vec2;
use motes_core::{InputEvent, Viewport};

/// Last known pointer position, read by the animator every frame.
///
/// Only [`PointerContext::handle`] writes it, so the latest event wins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerContext {
    position: Vec2,
}

impl PointerContext {
    /// Start with the pointer at the centre of the viewport.
    pub fn new(viewport: Viewport) -> Self {
        Self {
            position: viewport.center(),
        }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Apply a pointer or touch event.
    ///
    /// Returns the new position when the event moved the pointer. Touch events
    /// follow the first touch point only and are ignored without one.
    pub fn handle(&mut self, event: &InputEvent) -> Option<Vec2> {
        let position = match event {
            InputEvent::PointerMoved(position) => *position,
            InputEvent::TouchMoved(touches) => *touches.first()?,
            InputEvent::Resized { .. } => return None,
        };
        self.position = position;
        Some(position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_center() {
        let pointer = PointerContext::new(Viewport::new(640.0, 480.0));
        assert_eq!(pointer.position(), Vec2::new(320.0, 240.0));
    }

    #[test]
    fn test_last_write_wins() {
        let mut pointer = PointerContext::new(Viewport::new(640.0, 480.0));
        pointer.handle(&InputEvent::PointerMoved(Vec2::new(10.0, 20.0)));
        let moved = pointer.handle(&InputEvent::PointerMoved(Vec2::new(30.0, 40.0)));
        assert_eq!(moved, Some(Vec2::new(30.0, 40.0)));
        assert_eq!(pointer.position(), Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_touch_uses_first_point() {
        let mut pointer = PointerContext::new(Viewport::new(640.0, 480.0));
        pointer.handle(&InputEvent::TouchMoved(vec![
            Vec2::new(1.0, 2.0),
            Vec2::new(300.0, 300.0),
        ]));
        assert_eq!(pointer.position(), Vec2::new(1.0, 2.0));
    }

    #[test]
    fn test_empty_touch_and_resize_ignored() {
        let mut pointer = PointerContext::new(Viewport::new(640.0, 480.0));
        assert_eq!(pointer.handle(&InputEvent::TouchMoved(Vec::new())), None);
        assert_eq!(
            pointer.handle(&InputEvent::Resized {
                width: 10.0,
                height: 10.0
            }),
            None
        );
        assert_eq!(pointer.position(), Vec2::new(320.0, 240.0));
    }
}
