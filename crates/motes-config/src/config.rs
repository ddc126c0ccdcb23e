use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use motes_core::{Bounds, ColorTheme, EmitterParams, FieldParams, SpawnerParams, TrailParams};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "clients.json";

/// Longest interval, delay or duration accepted, one hour.
const MAX_TIMING_MS: u64 = 3_600_000;

/// Display settings for the terminal scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub theme: ColorTheme,
    /// Target time between frames.
    pub frame_interval_ms: u64,
    /// Pixel width of one terminal cell.
    pub cell_width: f32,
    /// Pixel height of one terminal cell.
    pub cell_height: f32,
    pub show_help: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            theme: ColorTheme::default(),
            frame_interval_ms: 33,
            cell_width: 8.0,
            cell_height: 16.0,
            show_help: true,
        }
    }
}

/// Where form submissions are stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IntakeConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_path: Option<PathBuf>,
}

impl IntakeConfig {
    /// The configured store, or `clients.json` in the data directory.
    pub fn store_path(&self) -> Option<PathBuf> {
        self.store_path
            .clone()
            .or_else(|| data_dir().map(|dir| dir.join(STORE_FILE)))
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub field: FieldParams,
    pub spawner: SpawnerParams,
    pub trail: TrailParams,
    pub display: DisplayConfig,
    pub intake: IntakeConfig,
}

impl Config {
    /// Load from `path`, or from the default location when `None`.
    ///
    /// A missing default file yields the defaults; a missing explicit file is
    /// an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from_file(&path),
                _ => {
                    log::debug!("no configuration file, using defaults");
                    Ok(Self::default())
                }
            },
        }
    }

    /// Read, parse and validate a configuration file.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// `config.toml` in the platform config directory.
    pub fn default_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(path, self.to_toml()?).map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("saved configuration to {}", path.display());
        Ok(())
    }

    /// Save to the default location and return the path written.
    pub fn save_default(&self) -> Result<PathBuf> {
        let path = Self::default_path().ok_or(ConfigError::NoConfigDir)?;
        self.save(&path)?;
        Ok(path)
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values the animation cannot run with.
    pub fn validate(&self) -> Result<()> {
        validate_field(&self.field)?;
        if self.field.count == 0 {
            log::warn!("field.count is 0, no particles will be drawn");
        }
        validate_spawner(&self.spawner)?;
        validate_trail(&self.trail)?;

        let display = &self.display;
        ensure(
            display.frame_interval_ms > 0,
            "display.frame_interval_ms must be positive",
        )?;
        ensure(
            display.cell_width > 0.0 && display.cell_height > 0.0,
            "display cell size must be positive",
        )?;
        Ok(())
    }
}

/// Platform data directory, used for the log file and submission store.
pub fn data_dir() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().to_path_buf())
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "motes")
}

fn validate_field(field: &FieldParams) -> Result<()> {
    ensure(
        field.repel_radius > 0.0 && field.attract_radius > 0.0,
        "field radii must be positive",
    )?;
    ensure(
        field.repel_radius < field.attract_radius,
        "field.repel_radius must be smaller than field.attract_radius",
    )?;
    ensure(
        field.damping > 0.0 && field.damping < 1.0,
        "field.damping must be in (0, 1)",
    )?;
    ensure(field.min_distance > 0.0, "field.min_distance must be positive")?;
    ensure_range(&field.size, "field.size")
}

fn validate_spawner(spawner: &SpawnerParams) -> Result<()> {
    validate_emitter(&spawner.particles, "spawner.particles")?;
    validate_emitter(&spawner.orbs, "spawner.orbs")
}

fn validate_emitter(emitter: &EmitterParams, name: &str) -> Result<()> {
    ensure(
        emitter.interval_ms > 0,
        format!("{name}.interval_ms must be positive"),
    )?;
    ensure_timing(emitter.interval_ms, &format!("{name}.interval_ms"))?;
    ensure_timing(emitter.burst_stagger_ms, &format!("{name}.burst_stagger_ms"))?;
    ensure_timing(emitter.lifetime_ms, &format!("{name}.lifetime_ms"))?;
    ensure_range(&emitter.size, &format!("{name}.size"))?;
    ensure_range(&emitter.opacity, &format!("{name}.opacity"))?;
    ensure_timing_range(&emitter.duration_ms, &format!("{name}.duration_ms"))?;
    ensure_timing_range(&emitter.delay_ms, &format!("{name}.delay_ms"))
}

fn validate_trail(trail: &TrailParams) -> Result<()> {
    ensure(trail.radius >= 0.0, "trail.radius must not be negative")?;
    ensure_timing(trail.duration_ms, "trail.duration_ms")?;
    ensure_range(&trail.size, "trail.size")
}

fn ensure_timing(value_ms: u64, name: &str) -> Result<()> {
    ensure(
        value_ms <= MAX_TIMING_MS,
        format!("{name} must be at most {MAX_TIMING_MS}ms, got {value_ms}"),
    )
}

fn ensure_timing_range(bounds: &Bounds, name: &str) -> Result<()> {
    ensure_range(bounds, name)?;
    ensure(
        bounds.min >= 0.0 && bounds.max <= MAX_TIMING_MS as f32,
        format!(
            "{name} must lie within 0..={MAX_TIMING_MS}ms, got {} and {}",
            bounds.min, bounds.max
        ),
    )
}

fn ensure_range(bounds: &Bounds, name: &str) -> Result<()> {
    ensure(
        bounds.is_valid(),
        format!("{name} must have min <= max, got {} and {}", bounds.min, bounds.max),
    )
}

fn ensure(condition: bool, message: impl Into<String>) -> Result<()> {
    if condition {
        Ok(())
    } else {
        Err(ConfigError::Invalid(message.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        config.validate().unwrap();
        assert_eq!(config.field.count, 40);
        assert_eq!(config.display.frame_interval_ms, 33);
        assert_eq!(config.spawner.orbs.interval_ms, 8_000);
    }

    #[test]
    fn test_toml_round_trip() {
        let mut config = Config::default();
        config.display.theme = ColorTheme::Magenta;
        config.field.count = 12;
        config.intake.store_path = Some(PathBuf::from("/srv/motes/clients.json"));

        let text = config.to_toml().unwrap();
        assert!(text.contains("theme = \"magenta\""));
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            [field]
            count = 10

            [display]
            theme = "green"
            "#,
        )
        .unwrap();
        assert_eq!(config.field.count, 10);
        assert_eq!(config.field.damping, 0.96);
        assert_eq!(config.display.theme, ColorTheme::Green);
        assert_eq!(config.spawner, SpawnerParams::default());
    }

    #[test]
    fn test_incomplete_emitter_table_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(
            r#"
            [spawner.orbs]
            interval_ms = 4000
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::default();
        config.field.repel_radius = 400.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let mut config = Config::default();
        config.field.damping = 1.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.field.min_distance = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spawner.particles.interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spawner.orbs.size = Bounds::new(150.0, 50.0);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spawner.orbs.size"));

        let mut config = Config::default();
        config.display.frame_interval_ms = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.display.cell_height = 0.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_unbounded_timings() {
        let mut config = Config::default();
        config.spawner.orbs.duration_ms = Bounds::new(30_000.0, 1e20);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("spawner.orbs.duration_ms"));

        let mut config = Config::default();
        config.spawner.particles.delay_ms = Bounds::new(-5.0, 10.0);
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spawner.particles.lifetime_ms = u64::MAX;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.trail.duration_ms = MAX_TIMING_MS + 1;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.spawner.orbs.duration_ms = Bounds::new(0.0, MAX_TIMING_MS as f32);
        config.validate().unwrap();
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        assert!(matches!(
            Config::load(Some(&path)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn test_invalid_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[field]\ndamping = 2.0\n").unwrap();
        assert!(matches!(
            Config::load_from_file(&path),
            Err(ConfigError::Invalid(_))
        ));

        fs::write(&path, "[field\n").unwrap();
        match Config::load_from_file(&path) {
            Err(ConfigError::Parse { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("motes").join("config.toml");
        let mut config = Config::default();
        config.trail.enabled = false;

        config.save(&path).unwrap();
        let loaded = Config::load(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_explicit_store_path_wins() {
        let intake = IntakeConfig {
            store_path: Some(PathBuf::from("submissions.json")),
        };
        assert_eq!(intake.store_path(), Some(PathBuf::from("submissions.json")));
    }
}
