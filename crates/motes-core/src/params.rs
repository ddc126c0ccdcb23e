//! Tunable parameters for the field, spawner and trail.

use serde::{Deserialize, Serialize};

/// Half-open range `[min, max)` sampled with a unit random value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f32,
    pub max: f32,
}

impl Bounds {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Map `t` in `[0, 1)` into the range.
    pub fn lerp(&self, t: f32) -> f32 {
        self.min + (self.max - self.min) * t
    }

    /// Whether `min <= max` and both ends are finite.
    pub fn is_valid(&self) -> bool {
        self.min.is_finite() && self.max.is_finite() && self.min <= self.max
    }
}

/// Pointer-reactive particle field parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Number of particles, fixed for the life of the field.
    pub count: usize,
    /// Below this distance from the pointer particles are pushed away.
    pub repel_radius: f32,
    /// Below this distance (and outside the repel radius) particles are pulled in.
    pub attract_radius: f32,
    pub repel_strength: f32,
    pub attract_strength: f32,
    /// Per-frame velocity multiplier, in `(0, 1)`.
    pub damping: f32,
    /// Lower clamp for the pointer distance used as a divisor.
    pub min_distance: f32,
    /// Spread of the initial velocity components around zero.
    pub initial_speed: f32,
    /// Particle diameter in pixels.
    pub size: Bounds,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            count: 40,
            repel_radius: 120.0,
            attract_radius: 300.0,
            repel_strength: 0.15,
            attract_strength: 0.01,
            damping: 0.96,
            min_distance: 1.0,
            initial_speed: 1.2,
            size: Bounds::new(2.0, 5.0),
        }
    }
}

/// One periodic emitter of short-lived sprites.
///
/// Durations are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmitterParams {
    /// Period of the repeating emission.
    pub interval_ms: u64,
    /// Number of sprites emitted at startup.
    pub burst_count: usize,
    /// Gap between consecutive startup emissions.
    pub burst_stagger_ms: u64,
    /// Requested time before a sprite is removed.
    pub lifetime_ms: u64,
    pub size: Bounds,
    pub opacity: Bounds,
    pub duration_ms: Bounds,
    pub delay_ms: Bounds,
}

impl EmitterParams {
    /// Small particles floating up from the bottom edge.
    pub fn particles() -> Self {
        Self {
            interval_ms: 300,
            burst_count: 20,
            burst_stagger_ms: 100,
            lifetime_ms: 30_000,
            size: Bounds::new(1.0, 3.0),
            opacity: Bounds::new(0.3, 0.8),
            duration_ms: Bounds::new(15_000.0, 25_000.0),
            delay_ms: Bounds::new(0.0, 5_000.0),
        }
    }

    /// Large orbs drifting in from the left edge.
    pub fn orbs() -> Self {
        Self {
            interval_ms: 8_000,
            burst_count: 3,
            burst_stagger_ms: 3_000,
            lifetime_ms: 50_000,
            size: Bounds::new(50.0, 150.0),
            opacity: Bounds::new(0.2, 0.45),
            duration_ms: Bounds::new(30_000.0, 50_000.0),
            delay_ms: Bounds::new(0.0, 0.0),
        }
    }

    /// Delay after which an emitted sprite is removed.
    ///
    /// Never shorter than the longest animation (delay plus duration) this
    /// emitter can produce.
    pub fn removal_delay_ms(&self) -> u64 {
        let longest = (self.delay_ms.max.max(0.0) + self.duration_ms.max.max(0.0)).ceil() as u64;
        self.lifetime_ms.max(longest)
    }
}

/// Ambient spawner parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnerParams {
    pub enabled: bool,
    pub particles: EmitterParams,
    pub orbs: EmitterParams,
}

impl Default for SpawnerParams {
    fn default() -> Self {
        Self {
            enabled: true,
            particles: EmitterParams::particles(),
            orbs: EmitterParams::orbs(),
        }
    }
}

/// Sparks left behind the pointer as it moves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrailParams {
    pub enabled: bool,
    /// Sparks emitted per pointer move.
    pub per_move: usize,
    /// Scatter radius around the pointer in pixels.
    pub radius: f32,
    pub size: Bounds,
    /// Fade time, which is also the spark's lifetime.
    pub duration_ms: u64,
}

impl Default for TrailParams {
    fn default() -> Self {
        Self {
            enabled: true,
            per_move: 5,
            radius: 20.0,
            size: Bounds::new(2.0, 5.0),
            duration_ms: 1_000,
        }
    }
}
