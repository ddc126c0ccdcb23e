//! Terminal rendering for the motes particle field.
//!
//! [`TerminalSurface`] implements the [`motes_core::Surface`] capability on top
//! of a grid of terminal cells. Sprites live in pixel space; each cell covers a
//! fixed number of pixels, so radii and speeds keep their meaning regardless of
//! the terminal's size.

mod color;
mod glyphs;
mod surface;

pub use color::{hsl_to_rgb, sprite_color};
pub use surface::{CellSize, TerminalSurface};
