//! Pointer-reactive particle field (stateful).

use glam::Vec2;
use motes_core::{ElementId, FieldParams, Sprite, SpriteKind, Surface, Viewport};
use rand::Rng;

use crate::pointer::PointerContext;

/// A single field particle and the surface element that shows it.
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Diameter in pixels, fixed at creation.
    pub size: f32,
    element: ElementId,
}

impl Particle {
    /// Handle of the element drawing this particle.
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Advance one frame: pointer force, damping, Euler step, edge reflection.
    ///
    /// Position is never clamped, so a particle may sit just outside the
    /// viewport for a frame until the reflected velocity brings it back.
    pub fn step(&mut self, pointer: Vec2, params: &FieldParams, viewport: Viewport) {
        self.velocity += pointer_force(self.position, pointer, params);
        self.velocity *= params.damping;
        self.position += self.velocity;

        if self.position.x < 0.0 || self.position.x > viewport.width {
            self.velocity.x = -self.velocity.x;
        }
        if self.position.y < 0.0 || self.position.y > viewport.height {
            self.velocity.y = -self.velocity.y;
        }
    }
}

/// Velocity impulse the pointer applies to a particle at `position`.
///
/// Inside the repel radius the impulse points away from the pointer, between
/// the repel and attract radii it points towards it, and beyond that it is
/// zero. The distance used as divisor is clamped to `min_distance`.
pub fn pointer_force(position: Vec2, pointer: Vec2, params: &FieldParams) -> Vec2 {
    let delta = pointer - position;
    let distance = delta.length();
    let direction = delta / distance.max(params.min_distance).max(f32::MIN_POSITIVE);

    if distance < params.repel_radius {
        -direction * params.repel_strength
    } else if distance < params.attract_radius {
        direction * params.attract_strength
    } else {
        Vec2::ZERO
    }
}

/// Fixed population of pointer-reactive particles.
#[derive(Debug)]
pub struct ParticleField {
    particles: Vec<Particle>,
    params: FieldParams,
    viewport: Viewport,
}

impl ParticleField {
    /// Create `params.count` particles scattered over the surface.
    pub fn spawn<R, S>(params: FieldParams, rng: &mut R, surface: &mut S) -> Self
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        let viewport = surface.viewport();
        let particles = (0..params.count)
            .map(|_| {
                let position = random_position(viewport, rng);
                let velocity = Vec2::new(
                    (rng.random::<f32>() - 0.5) * params.initial_speed,
                    (rng.random::<f32>() - 0.5) * params.initial_speed,
                );
                let size = params.size.lerp(rng.random());
                let element = surface.create(Sprite::new(SpriteKind::Mote, position, size));
                Particle {
                    position,
                    velocity,
                    size,
                    element,
                }
            })
            .collect::<Vec<_>>();

        log::info!(
            "spawned {} field particles over {}x{}",
            particles.len(),
            viewport.width,
            viewport.height
        );

        Self {
            particles,
            params,
            viewport,
        }
    }

    /// Advance every particle by one frame and write the new positions.
    pub fn update<S: Surface + ?Sized>(&mut self, pointer: &PointerContext, surface: &mut S) {
        let target = pointer.position();
        for particle in &mut self.particles {
            particle.step(target, &self.params, self.viewport);
            surface.set_position(particle.element, particle.position);
        }
    }

    /// Scatter every particle to a new random spot in `viewport`.
    ///
    /// Velocities are kept. The new viewport becomes the reflection bound.
    pub fn reshuffle<R, S>(&mut self, viewport: Viewport, rng: &mut R, surface: &mut S)
    where
        R: Rng + ?Sized,
        S: Surface + ?Sized,
    {
        self.viewport = viewport;
        for particle in &mut self.particles {
            particle.position = random_position(viewport, rng);
            surface.set_position(particle.element, particle.position);
        }
        log::debug!(
            "reshuffled field for {}x{}",
            viewport.width,
            viewport.height
        );
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn params(&self) -> &FieldParams {
        &self.params
    }
}

fn random_position<R: Rng + ?Sized>(viewport: Viewport, rng: &mut R) -> Vec2 {
    viewport.at_fraction(rng.random(), rng.random())
}

#[cfg(test)]
mod tests {
    use super::*;
    use motes_core::{InputEvent, MemorySurface};
    use rand::{SeedableRng, rngs::StdRng};

    fn setup(count: usize) -> (ParticleField, MemorySurface, StdRng) {
        let mut surface = MemorySurface::new(Viewport::new(800.0, 600.0));
        let mut rng = StdRng::seed_from_u64(7);
        let params = FieldParams {
            count,
            ..FieldParams::default()
        };
        let field = ParticleField::spawn(params, &mut rng, &mut surface);
        (field, surface, rng)
    }

    fn place(field: &mut ParticleField, position: Vec2, velocity: Vec2) {
        let particle = &mut field.particles_mut()[0];
        particle.position = position;
        particle.velocity = velocity;
    }

    #[test]
    fn test_spawn_creates_one_element_per_particle() {
        let (field, surface, _) = setup(40);
        assert_eq!(field.len(), 40);
        assert_eq!(surface.count(SpriteKind::Mote), 40);
        for p in field.particles() {
            assert!(field.viewport().contains(p.position));
            assert!(p.size >= 2.0 && p.size <= 5.0);
            assert!(p.velocity.x.abs() <= 0.6 && p.velocity.y.abs() <= 0.6);
            assert!(surface.contains(p.element()));
        }
    }

    #[test]
    fn test_population_constant_across_updates() {
        let (mut field, mut surface, mut rng) = setup(40);
        let mut pointer = PointerContext::new(field.viewport());
        for frame in 0..500 {
            if frame % 50 == 0 {
                let at = Vec2::new(rng.random::<f32>() * 800.0, rng.random::<f32>() * 600.0);
                pointer.handle(&InputEvent::PointerMoved(at));
            }
            field.update(&pointer, &mut surface);
            assert_eq!(field.len(), 40);
            assert_eq!(surface.len(), 40);
        }
    }

    #[test]
    fn test_repulsion_pushes_monotonically_outward() {
        let (mut field, mut surface, _) = setup(1);
        let pointer = PointerContext::new(field.viewport());
        let center = pointer.position();
        place(&mut field, center + Vec2::new(30.0, 10.0), Vec2::ZERO);

        let mut previous = field.particles()[0].position.distance(center);
        let mut frames = 0;
        while previous <= field.params().repel_radius {
            field.update(&pointer, &mut surface);
            let distance = field.particles()[0].position.distance(center);
            assert!(distance > previous, "frame {frames}: {distance} <= {previous}");
            previous = distance;
            frames += 1;
            assert!(frames < 1_000, "particle never left the repel radius");
        }
    }

    #[test]
    fn test_attraction_zone_pulls_towards_pointer() {
        let (mut field, mut surface, _) = setup(1);
        let pointer = PointerContext::new(field.viewport());
        let center = pointer.position();
        place(&mut field, center + Vec2::new(-200.0, 0.0), Vec2::ZERO);

        field.update(&pointer, &mut surface);
        let particle = &field.particles()[0];
        let towards = center - (particle.position - particle.velocity);
        assert!(particle.velocity.dot(towards) > 0.0);
        assert!(particle.velocity.x > 0.0);
    }

    #[test]
    fn test_no_force_beyond_attract_radius() {
        let params = FieldParams::default();
        let force = pointer_force(Vec2::ZERO, Vec2::new(350.0, 0.0), &params);
        assert_eq!(force, Vec2::ZERO);
    }

    #[test]
    fn test_damping_never_increases_speed() {
        let params = FieldParams::default();
        let viewport = Viewport::new(10_000.0, 10_000.0);
        let far_pointer = Vec2::new(-5_000.0, -5_000.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let velocity = Vec2::new(
                (rng.random::<f32>() - 0.5) * 50.0,
                (rng.random::<f32>() - 0.5) * 50.0,
            );
            let mut particle = Particle {
                position: Vec2::new(5_000.0, 5_000.0),
                velocity,
                size: 3.0,
                element: ElementId(0),
            };
            particle.step(far_pointer, &params, viewport);
            assert!(particle.velocity.length() <= velocity.length());
        }
    }

    #[test]
    fn test_pointer_on_particle_stays_finite() {
        let (mut field, mut surface, _) = setup(1);
        let mut pointer = PointerContext::new(field.viewport());
        pointer.handle(&InputEvent::PointerMoved(Vec2::new(100.0, 100.0)));
        place(&mut field, Vec2::new(100.0, 100.0), Vec2::ZERO);

        field.update(&pointer, &mut surface);
        let particle = &field.particles()[0];
        assert!(particle.velocity.is_finite());
        assert!(particle.position.is_finite());
    }

    #[test]
    fn test_near_zero_distance_is_clamped() {
        let params = FieldParams::default();
        let force = pointer_force(Vec2::ZERO, Vec2::new(1e-6, 0.0), &params);
        assert!(force.is_finite());
        assert!(force.length() <= params.repel_strength);
    }

    #[test]
    fn test_edges_reflect_velocity() {
        let params = FieldParams::default();
        let viewport = Viewport::new(800.0, 600.0);
        let mut particle = Particle {
            position: Vec2::new(0.5, 599.5),
            velocity: Vec2::new(-2.0, 2.0),
            size: 3.0,
            element: ElementId(0),
        };
        particle.step(Vec2::new(400.0, -5_000.0), &params, viewport);
        assert!(particle.position.x < 0.0);
        assert!(particle.velocity.x > 0.0);
        assert!(particle.position.y > 600.0);
        assert!(particle.velocity.y < 0.0);
    }

    #[test]
    fn test_reshuffle_stays_inside_new_viewport() {
        let (mut field, mut surface, mut rng) = setup(40);
        let velocities: Vec<Vec2> = field.particles().iter().map(|p| p.velocity).collect();
        let resized = Viewport::new(320.0, 200.0);

        surface.resize(resized);
        field.reshuffle(resized, &mut rng, &mut surface);

        assert_eq!(field.viewport(), resized);
        for (particle, velocity) in field.particles().iter().zip(velocities) {
            assert!(resized.contains(particle.position));
            assert_eq!(particle.velocity, velocity);
            let sprite = surface.get(particle.element()).unwrap();
            assert_eq!(sprite.position, particle.position);
        }
    }

    #[test]
    fn test_update_writes_positions_to_surface() {
        let (mut field, mut surface, _) = setup(5);
        let pointer = PointerContext::new(field.viewport());
        field.update(&pointer, &mut surface);
        for particle in field.particles() {
            assert_eq!(surface.get(particle.element()).unwrap().position, particle.position);
        }
    }
}
