//! Configuration for motes.
//!
//! Settings are read from a TOML file in the platform config directory. Every
//! section is optional; missing keys fall back to the built-in defaults.

mod config;
mod error;

pub use config::{Config, DisplayConfig, IntakeConfig, data_dir};
pub use error::{ConfigError, Result};
