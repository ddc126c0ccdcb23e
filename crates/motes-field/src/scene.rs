//! Scene wiring: field, pointer, spawner and trail on one scheduler.

use motes_core::{FieldParams, InputEvent, SpawnerParams, Surface, TrailParams, Viewport};
use rand::{SeedableRng, rngs::StdRng};

use crate::field::ParticleField;
use crate::pointer::PointerContext;
use crate::schedule::{Job, Scheduler};
use crate::spawner::Spawner;
use crate::trail::Trail;

/// Parameters for every effect in a scene.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneSettings {
    pub field: FieldParams,
    pub spawner: SpawnerParams,
    pub trail: TrailParams,
    /// Minimum scene time between animator frames. Zero runs one frame per
    /// advance.
    pub frame_interval_ms: u64,
}

/// What happened during one [`Scene::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Tick {
    /// Animator frames run (zero or one).
    pub frames: u32,
    /// Ephemeral sprites emitted by the spawner.
    pub emitted: usize,
    /// Ephemeral sprites removed.
    pub removed: usize,
}

/// All animation state for one surface.
///
/// The animator's frame loop is an explicit handle: [`Scene::start`] requests
/// a frame and every frame run requests the next one until [`Scene::stop`].
#[derive(Debug)]
pub struct Scene {
    field: ParticleField,
    pointer: PointerContext,
    spawner: Spawner,
    trail: Trail,
    scheduler: Scheduler,
    rng: StdRng,
    running: bool,
    frame_interval_ms: u64,
    /// Earliest scene time for the next animator frame.
    next_frame_ms: u64,
}

impl Scene {
    /// Build the scene and spawn the field on `surface`.
    ///
    /// A seed makes every random choice reproducible.
    pub fn new<S: Surface + ?Sized>(
        settings: SceneSettings,
        surface: &mut S,
        seed: Option<u64>,
    ) -> Self {
        let mut rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        let field = ParticleField::spawn(settings.field, &mut rng, surface);
        let spawner_enabled = settings.spawner.enabled;
        let frame_interval_ms = settings.frame_interval_ms;

        let mut scene = Self {
            field,
            pointer: PointerContext::new(surface.viewport()),
            spawner: Spawner::new(settings.spawner),
            trail: Trail::new(settings.trail),
            scheduler: Scheduler::new(),
            rng,
            running: false,
            frame_interval_ms,
            next_frame_ms: 0,
        };
        if spawner_enabled {
            scene.start_spawner();
        }
        scene
    }

    /// Start (or resume) the animator's frame loop.
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.scheduler.request_frame();
            log::debug!("frame loop started");
        }
    }

    /// Stop the animator's frame loop. Particles keep their state.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::debug!("frame loop stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start_spawner(&mut self) {
        self.spawner.start(&mut self.scheduler);
    }

    pub fn stop_spawner(&mut self) {
        self.spawner.stop(&mut self.scheduler);
    }

    pub fn is_spawner_running(&self) -> bool {
        self.spawner.is_running()
    }

    pub fn set_trail_enabled(&mut self, enabled: bool) {
        self.trail.set_enabled(enabled);
    }

    pub fn is_trail_enabled(&self) -> bool {
        self.trail.is_enabled()
    }

    /// Route a host notification.
    ///
    /// Pointer and touch moves update the pointer context and leave a trail.
    /// A resize reshuffles the field inside the new viewport.
    pub fn handle_event<S: Surface + ?Sized>(&mut self, event: &InputEvent, surface: &mut S) {
        if let InputEvent::Resized { width, height } = *event {
            self.field
                .reshuffle(Viewport::new(width, height), &mut self.rng, surface);
            return;
        }
        if let Some(at) = self.pointer.handle(event) {
            self.trail
                .emit(at, &mut self.rng, &mut self.scheduler, surface);
        }
    }

    /// Run due timers at `now_ms`, then at most one animator frame.
    ///
    /// Frames are spaced at least the frame interval apart, however often the
    /// host advances.
    pub fn advance<S: Surface + ?Sized>(&mut self, now_ms: u64, surface: &mut S) -> Tick {
        let mut tick = Tick::default();

        while let Some(job) = self.scheduler.pop_due(now_ms) {
            match job {
                Job::EmitParticle => {
                    self.spawner
                        .emit_particle(&mut self.rng, &mut self.scheduler, surface);
                    tick.emitted += 1;
                }
                Job::EmitOrb => {
                    self.spawner
                        .emit_orb(&mut self.rng, &mut self.scheduler, surface);
                    tick.emitted += 1;
                }
                Job::Remove(id) => {
                    if surface.remove(id) {
                        tick.removed += 1;
                    }
                }
            }
        }

        if self.running && now_ms >= self.next_frame_ms && self.scheduler.take_frame_request() {
            self.field.update(&self.pointer, surface);
            tick.frames = 1;
            self.next_frame_ms = now_ms.saturating_add(self.frame_interval_ms);
            self.scheduler.request_frame();
        }

        tick
    }

    /// Run one animator frame right away, regardless of the frame loop.
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.field.update(&self.pointer, surface);
    }

    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    pub fn pointer(&self) -> &PointerContext {
        &self.pointer
    }

    pub fn spawner(&self) -> &Spawner {
        &self.spawner
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }
}
