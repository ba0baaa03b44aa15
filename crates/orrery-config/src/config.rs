//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use orrery_kinematics::{
    BodySpec, DEFAULT_GAP, DEFAULT_MOON_GAP, DEFAULT_SUN_CLEARANCE, LayoutDirection, MotionScale,
    OrbitLayoutPlanner, SystemLayout, solar_system,
};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const APP_NAME: &str = "orrery";
const CONFIG_FILE: &str = "config.ron";

/// Platform config directory for the orrery, e.g. `~/.config/orrery`.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|d| d.join(APP_NAME))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Simulation speed and timing.
    pub simulation: SimulationConfig,
    /// Orbit spacing.
    pub layout: LayoutConfig,
    /// Frame loop settings.
    pub host: HostConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
    /// Body table, sun first.
    pub bodies: Vec<BodySpec>,
}

/// Simulation configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Orbital speed multiplier (0 - 100).
    pub speed_scale: f32,
    /// Seed for initial orbit phases. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Real seconds for one Earth orbit at speed 1.
    pub earth_orbit_seconds: f32,
    /// Real seconds for one Earth rotation.
    pub earth_spin_seconds: f32,
}

/// Orbit layout configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutConfig {
    /// Clearance between consecutive orbits.
    pub gap: f32,
    /// Extra clearance between the sun and the first planet.
    pub sun_clearance: f32,
    /// Clearance between a planet's surface and its moon's orbit.
    pub moon_gap: f32,
    /// Which way orbit radii accumulate.
    pub direction: LayoutDirection,
}

/// Host frame loop configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HostConfig {
    /// Target frame rate (0 = unthrottled).
    pub target_fps: u32,
    /// Frames to run before exiting (0 = run until interrupted).
    pub frames: u64,
    /// Re-read `config.ron` every this many frames (0 = never).
    pub reload_every_frames: u64,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Log every body's pose every frame.
    pub log_poses: bool,
}

// --- Default implementations ---

impl Default for Config {
    fn default() -> Self {
        Self {
            simulation: SimulationConfig::default(),
            layout: LayoutConfig::default(),
            host: HostConfig::default(),
            debug: DebugConfig::default(),
            bodies: solar_system(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        let motion = MotionScale::default();
        Self {
            speed_scale: 1.0,
            seed: None,
            earth_orbit_seconds: motion.earth_orbit_seconds,
            earth_spin_seconds: motion.earth_spin_seconds,
        }
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            sun_clearance: DEFAULT_SUN_CLEARANCE,
            moon_gap: DEFAULT_MOON_GAP,
            direction: LayoutDirection::Outward,
        }
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            frames: 0,
            reload_every_frames: 120,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_poses: false,
        }
    }
}

// --- Conversions into kinematics parameters ---

impl LayoutConfig {
    pub fn system_layout(&self) -> SystemLayout {
        SystemLayout {
            planner: OrbitLayoutPlanner::new(self.gap, self.sun_clearance, self.direction),
            moon_gap: self.moon_gap,
        }
    }
}

impl SimulationConfig {
    pub fn motion_scale(&self) -> MotionScale {
        MotionScale {
            earth_orbit_seconds: self.earth_orbit_seconds,
            earth_spin_seconds: self.earth_spin_seconds,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let config = Self::read(&config_path)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        ron::from_str(&contents).map_err(ConfigError::ParseError)
    }
}
