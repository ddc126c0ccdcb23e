//! Sparks scattered around the pointer as it moves.

use glam::Vec2;
use motes_core::{ElementId, Motion, Sprite, SpriteKind, Surface, TrailParams};
use rand::Rng;

use crate::schedule::{Job, Scheduler};

/// Pointer trail emitter.
#[derive(Debug)]
pub struct Trail {
    params: TrailParams,
    enabled: bool,
}

impl Trail {
    pub fn new(params: TrailParams) -> Self {
        let enabled = params.enabled;
        Self { params, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Scatter `per_move` fading sparks around `at`, each removed once faded.
    pub fn emit<R, S>(
        &self,
        at: Vec2,
        rng: &mut R,
        scheduler: &mut Scheduler,
        surface: &mut S,
    ) -> Vec<ElementId>
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        if !self.enabled {
            return Vec::new();
        }
        (0..self.params.per_move)
            .map(|_| {
                let angle = rng.random::<f32>() * std::f32::consts::TAU;
                let radius = rng.random::<f32>() * self.params.radius;
                let position = at + Vec2::from_angle(angle) * radius;
                let size = self.params.size.lerp(rng.random());
                let motion = Motion::glide(
                    scheduler.now_ms(),
                    position,
                    position,
                    self.params.duration_ms,
                )
                .with_opacity(1.0, 0.0)
                .with_scale(1.0, 0.5);
                let sprite = Sprite::new(SpriteKind::Spark, position, size).with_motion(motion);
                let id = surface.create(sprite);
                scheduler.after(self.params.duration_ms, Job::Remove(id));
                id
            })
            .collect()
    }
}
