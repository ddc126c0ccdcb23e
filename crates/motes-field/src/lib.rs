//! Particle field animation for motes.
//!
//! Two independent cosmetic effects driven from one cooperative scheduler: a
//! fixed population of particles that react to the pointer, and emitters that
//! keep adding short-lived floating particles and orbs. Everything draws
//! through the [`motes_core::Surface`] trait.

mod field;
mod pointer;
mod scene;
mod schedule;
mod spawner;
mod trail;

pub use field::{Particle, ParticleField, pointer_force};
pub use pointer::PointerContext;
pub use scene::{Scene, SceneSettings, Tick};
pub use schedule::{Job, Scheduler, TimerId};
pub use spawner::Spawner;
pub use trail::Trail;
