//! Ambient spawner for floating particles and glowing orbs.

use glam::Vec2;
use motes_core::{ElementId, EmitterParams, Motion, SpawnerParams, Sprite, SpriteKind, Surface};
use rand::Rng;

use crate::schedule::{Job, Scheduler, TimerId};

/// Timer-driven emitter pair.
///
/// Emitted sprites carry their whole animation as a [`Motion`]; the spawner
/// only creates them and schedules their removal.
#[derive(Debug)]
pub struct Spawner {
    params: SpawnerParams,
    /// Repeating emission timers, present while running.
    periodic: Vec<TimerId>,
    /// Startup burst timers that have not fired yet.
    bursts: Vec<TimerId>,
    emitted: u64,
}

impl Spawner {
    pub fn new(params: SpawnerParams) -> Self {
        Self {
            params,
            periodic: Vec::new(),
            bursts: Vec::new(),
            emitted: 0,
        }
    }

    pub fn params(&self) -> &SpawnerParams {
        &self.params
    }

    /// Whether the emission timers are installed.
    pub fn is_running(&self) -> bool {
        !self.periodic.is_empty()
    }

    /// Startup emissions still waiting to fire.
    pub fn pending_bursts(&self) -> usize {
        self.bursts.len()
    }

    /// Total sprites emitted so far.
    pub fn emitted(&self) -> u64 {
        self.emitted
    }

    /// Install the repeating emitters and the staggered startup burst.
    pub fn start(&mut self, scheduler: &mut Scheduler) {
        if self.is_running() {
            return;
        }
        for (emitter, job) in [
            (&self.params.particles, Job::EmitParticle),
            (&self.params.orbs, Job::EmitOrb),
        ] {
            self.periodic.push(scheduler.every(emitter.interval_ms, job));
            for i in 0..emitter.burst_count {
                let delay_ms = (i as u64).saturating_mul(emitter.burst_stagger_ms);
                self.bursts.push(scheduler.after(delay_ms, job));
            }
        }
        log::info!(
            "spawner started: particles every {}ms, orbs every {}ms",
            self.params.particles.interval_ms,
            self.params.orbs.interval_ms
        );
    }

    /// Cancel emission. Sprites already on screen keep their removal timers.
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        if !self.is_running() {
            return;
        }
        for id in self.periodic.drain(..) {
            scheduler.cancel(id);
        }
        self.prune_bursts(scheduler);
        for id in self.bursts.drain(..) {
            scheduler.cancel(id);
        }
        log::info!("spawner stopped after {} emissions", self.emitted);
    }

    /// Emit one particle floating from the bottom edge to above the top edge.
    pub fn emit_particle<R, S>(
        &mut self,
        rng: &mut R,
        scheduler: &mut Scheduler,
        surface: &mut S,
    ) -> ElementId
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let viewport = surface.viewport();
        let emitter = &self.params.particles;
        let x = rng.random::<f32>() * viewport.width;
        let size = emitter.size.lerp(rng.random());
        let from = Vec2::new(x, viewport.height + size);
        let to = Vec2::new(x, -size);
        let now_ms = scheduler.now_ms();
        let sprite = ephemeral(SpriteKind::Particle, emitter, from, to, size, rng, now_ms);
        let removal_delay_ms = emitter.removal_delay_ms();
        self.attach(sprite, removal_delay_ms, scheduler, surface)
    }

    /// Emit one orb drifting in from the left edge at a random height.
    pub fn emit_orb<R, S>(
        &mut self,
        rng: &mut R,
        scheduler: &mut Scheduler,
        surface: &mut S,
    ) -> ElementId
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let viewport = surface.viewport();
        let emitter = &self.params.orbs;
        let y = rng.random::<f32>() * viewport.height;
        let size = emitter.size.lerp(rng.random());
        let from = Vec2::new(-100.0, y);
        let to = Vec2::new(viewport.width + size, y);
        let now_ms = scheduler.now_ms();
        let sprite = ephemeral(SpriteKind::Orb, emitter, from, to, size, rng, now_ms);
        let removal_delay_ms = emitter.removal_delay_ms();
        self.attach(sprite, removal_delay_ms, scheduler, surface)
    }

    fn attach<S: Surface + ?Sized>(
        &mut self,
        sprite: Sprite,
        removal_delay_ms: u64,
        scheduler: &mut Scheduler,
        surface: &mut S,
    ) -> ElementId {
        let id = surface.create(sprite);
        scheduler.after(removal_delay_ms, Job::Remove(id));
        self.emitted += 1;
        self.prune_bursts(scheduler);
        id
    }

    /// Forget burst timers that have already fired.
    fn prune_bursts(&mut self, scheduler: &Scheduler) {
        if !self.bursts.is_empty() {
            self.bursts.retain(|id| scheduler.is_pending(*id));
        }
    }
}

/// Build a sprite gliding from `from` to `to` with randomized look and timing.
fn ephemeral<R: Rng + ?Sized>(
    kind: SpriteKind,
    emitter: &EmitterParams,
    from: Vec2,
    to: Vec2,
    size: f32,
    rng: &mut R,
    now_ms: u64,
) -> Sprite {
    let opacity = emitter.opacity.lerp(rng.random());
    let duration_ms = emitter.duration_ms.lerp(rng.random()).max(0.0) as u64;
    let delay_ms = emitter.delay_ms.lerp(rng.random()).max(0.0) as u64;
    let motion = Motion::glide(now_ms, from, to, duration_ms).with_delay(delay_ms);
    Sprite::new(kind, from, size)
        .with_opacity(opacity)
        .with_motion(motion)
}
