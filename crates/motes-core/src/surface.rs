//! The display surface capability the animation cores are written against.
//!
//! A surface can create positioned, sized primitives, move them, fade them and
//! remove them. Anything further (how a sprite glides or fades over time) is
//! described up front with a [`Motion`] and left to the surface to sample when
//! it draws.

use std::collections::BTreeMap;

use glam::Vec2;

use crate::Viewport;

/// Handle to a primitive living on a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementId(pub u64);

/// What a sprite represents, used by surfaces to pick a look.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpriteKind {
    /// Pointer-reactive particle owned by the field animator.
    Mote,
    /// Small particle floating up the screen.
    Particle,
    /// Large glowing orb drifting across the screen.
    Orb,
    /// Short-lived spark left behind the pointer.
    Spark,
}

/// Declarative animation attached to a sprite at creation.
///
/// Progress runs from `start_ms + delay_ms` for `duration_ms` and holds at the
/// end values afterwards. Opacity and scale are multipliers on the sprite's
/// own opacity and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Scene time the sprite was created at.
    pub start_ms: u64,
    /// Time to wait before the animation starts moving.
    pub delay_ms: u64,
    /// Length of the animation.
    pub duration_ms: u64,
    pub from: Vec2,
    pub to: Vec2,
    /// Opacity multiplier at start and end.
    pub opacity: (f32, f32),
    /// Scale multiplier at start and end.
    pub scale: (f32, f32),
}

impl Motion {
    /// A straight glide between two points at constant opacity and scale.
    pub fn glide(start_ms: u64, from: Vec2, to: Vec2, duration_ms: u64) -> Self {
        Self {
            start_ms,
            delay_ms: 0,
            duration_ms,
            from,
            to,
            opacity: (1.0, 1.0),
            scale: (1.0, 1.0),
        }
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = delay_ms;
        self
    }

    pub fn with_opacity(mut self, from: f32, to: f32) -> Self {
        self.opacity = (from, to);
        self
    }

    pub fn with_scale(mut self, from: f32, to: f32) -> Self {
        self.scale = (from, to);
        self
    }

    /// Scene time at which the animation has fully played out.
    pub fn end_ms(&self) -> u64 {
        self.start_ms
            .saturating_add(self.delay_ms)
            .saturating_add(self.duration_ms)
    }

    /// Animation progress in `[0, 1]` at the given scene time.
    pub fn progress(&self, now_ms: u64) -> f32 {
        let begin = self.start_ms.saturating_add(self.delay_ms);
        if now_ms <= begin {
            return 0.0;
        }
        if self.duration_ms == 0 {
            return 1.0;
        }
        ((now_ms - begin) as f32 / self.duration_ms as f32).min(1.0)
    }

    /// Sample position and multipliers at the given scene time.
    pub fn sample(&self, now_ms: u64) -> MotionSample {
        let t = self.progress(now_ms);
        MotionSample {
            position: self.from.lerp(self.to, t),
            opacity: lerp(self.opacity.0, self.opacity.1, t),
            scale: lerp(self.scale.0, self.scale.1, t),
        }
    }
}

/// Resolved look of a sprite at one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionSample {
    pub position: Vec2,
    pub opacity: f32,
    pub scale: f32,
}

/// A positioned, sized, styled primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub kind: SpriteKind,
    /// Current position, ignored while a motion is attached.
    pub position: Vec2,
    /// Diameter in pixels.
    pub size: f32,
    /// Base opacity in `[0, 1]`.
    pub opacity: f32,
    pub motion: Option<Motion>,
}

impl Sprite {
    pub fn new(kind: SpriteKind, position: Vec2, size: f32) -> Self {
        Self {
            kind,
            position,
            size,
            opacity: 1.0,
            motion: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_motion(mut self, motion: Motion) -> Self {
        self.position = motion.from;
        self.motion = Some(motion);
        self
    }

    /// Resolve the sprite's look at the given scene time.
    pub fn sample(&self, now_ms: u64) -> MotionSample {
        match &self.motion {
            Some(motion) => {
                let m = motion.sample(now_ms);
                MotionSample {
                    position: m.position,
                    opacity: (self.opacity * m.opacity).clamp(0.0, 1.0),
                    scale: m.scale,
                }
            }
            None => MotionSample {
                position: self.position,
                opacity: self.opacity,
                scale: 1.0,
            },
        }
    }
}

/// Presentation layer capability used by the field, spawner and trail.
pub trait Surface {
    /// Current display size.
    fn viewport(&self) -> Viewport;

    /// Attach a new primitive and return its handle.
    fn create(&mut self, sprite: Sprite) -> ElementId;

    /// Move a primitive. Unknown handles are ignored.
    fn set_position(&mut self, id: ElementId, position: Vec2);

    /// Change a primitive's opacity. Unknown handles are ignored.
    fn set_opacity(&mut self, id: ElementId, opacity: f32);

    /// Detach a primitive. Returns `false` if it was already gone.
    fn remove(&mut self, id: ElementId) -> bool;

    /// Whether the primitive is still attached.
    fn contains(&self, id: ElementId) -> bool;

    /// Number of attached primitives.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Headless surface that keeps sprites in memory.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    viewport: Viewport,
    sprites: BTreeMap<ElementId, Sprite>,
    next_id: u64,
}

impl MemorySurface {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            sprites: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Change the reported viewport.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn get(&self, id: ElementId) -> Option<&Sprite> {
        self.sprites.get(&id)
    }

    /// Iterate sprites in creation order.
    pub fn iter(&self) -> impl Iterator<Item = (ElementId, &Sprite)> {
        self.sprites.iter().map(|(id, sprite)| (*id, sprite))
    }

    /// Number of attached sprites of the given kind.
    pub fn count(&self, kind: SpriteKind) -> usize {
        self.sprites.values().filter(|s| s.kind == kind).count()
    }
}

impl Surface for MemorySurface {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn create(&mut self, sprite: Sprite) -> ElementId {
        let id = ElementId(self.next_id);
        self.next_id += 1;
        self.sprites.insert(id, sprite);
        id
    }

    fn set_position(&mut self, id: ElementId, position: Vec2) {
        if let Some(sprite) = self.sprites.get_mut(&id) {
            sprite.position = position;
        }
    }

    fn set_opacity(&mut self, id: ElementId, opacity: f32) {
        if let Some(sprite) = self.sprites.get_mut(&id) {
            sprite.opacity = opacity.clamp(0.0, 1.0);
        }
    }

    fn remove(&mut self, id: ElementId) -> bool {
        self.sprites.remove(&id).is_some()
    }

    fn contains(&self, id: ElementId) -> bool {
        self.sprites.contains_key(&id)
    }

    fn len(&self) -> usize {
        self.sprites.len()
    }
}

fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_motion_progress_respects_delay() {
        let motion = Motion::glide(1_000, Vec2::ZERO, Vec2::new(0.0, -100.0), 2_000)
            .with_delay(500);
        assert_eq!(motion.progress(1_200), 0.0);
        assert_eq!(motion.progress(2_500), 0.5);
        assert_eq!(motion.progress(10_000), 1.0);
        assert_eq!(motion.end_ms(), 3_500);
    }

    #[test]
    fn test_motion_sample_fades_and_shrinks() {
        let motion = Motion::glide(0, Vec2::ONE, Vec2::ONE, 1_000)
            .with_opacity(1.0, 0.0)
            .with_scale(1.0, 0.5);
        let sample = motion.sample(500);
        assert_eq!(sample.position, Vec2::ONE);
        assert!((sample.opacity - 0.5).abs() < 1e-6);
        assert!((sample.scale - 0.75).abs() < 1e-6);
    }

    #[test]
    fn test_huge_timings_saturate() {
        let motion = Motion::glide(1_000, Vec2::ZERO, Vec2::X, u64::MAX).with_delay(u64::MAX);
        assert_eq!(motion.end_ms(), u64::MAX);
        assert_eq!(motion.progress(u64::MAX - 1), 0.0);
    }

    #[test]
    fn test_zero_duration_motion_is_complete() {
        let motion = Motion::glide(100, Vec2::ZERO, Vec2::X, 0);
        assert_eq!(motion.progress(100), 0.0);
        assert_eq!(motion.progress(101), 1.0);
    }

    #[test]
    fn test_sprite_sample_multiplies_opacity() {
        let sprite = Sprite::new(SpriteKind::Spark, Vec2::ZERO, 3.0)
            .with_opacity(0.6)
            .with_motion(Motion::glide(0, Vec2::ZERO, Vec2::ZERO, 100).with_opacity(1.0, 0.5));
        let sample = sprite.sample(100);
        assert!((sample.opacity - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_memory_surface_remove_is_guarded() {
        let mut surface = MemorySurface::new(Viewport::new(100.0, 100.0));
        let id = surface.create(Sprite::new(SpriteKind::Orb, Vec2::ZERO, 60.0));
        assert!(surface.contains(id));
        assert!(surface.remove(id));
        assert!(!surface.remove(id));
        assert!(surface.is_empty());
    }

    #[test]
    fn test_memory_surface_updates() {
        let mut surface = MemorySurface::new(Viewport::new(100.0, 100.0));
        let id = surface.create(Sprite::new(SpriteKind::Mote, Vec2::ZERO, 2.0));
        surface.set_position(id, Vec2::new(5.0, 6.0));
        surface.set_opacity(id, 1.7);
        let sprite = surface.get(id).unwrap();
        assert_eq!(sprite.position, Vec2::new(5.0, 6.0));
        assert_eq!(sprite.opacity, 1.0);
        assert_eq!(surface.count(SpriteKind::Mote), 1);

        surface.set_position(ElementId(99), Vec2::ONE);
        assert_eq!(surface.len(), 1);
    }
}
