//! Core types shared by the motes crates.
//!
//! The animation cores only ever talk to a presentation layer through the
//! [`Surface`] trait, the [`InputEvent`] notifications and a scheduler. This
//! crate holds those seams plus the tunable parameter structs.

mod event;
mod geometry;
mod params;
mod surface;
mod theme;

pub use event::InputEvent;
pub use geometry::Viewport;
pub use glam::Vec2;
pub use params::{Bounds, EmitterParams, FieldParams, SpawnerParams, TrailParams};
pub use surface::{ElementId, MemorySurface, Motion, MotionSample, Sprite, SpriteKind, Surface};
pub use theme::ColorTheme;
