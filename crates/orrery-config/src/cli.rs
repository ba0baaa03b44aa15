//! Command-line argument parsing for the orrery.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use orrery_kinematics::LayoutDirection;

use crate::Config;

/// Orbit layout direction as accepted on the command line.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectionArg {
    Outward,
    NegativeAxis,
}

impl From<DirectionArg> for LayoutDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Outward => LayoutDirection::Outward,
            DirectionArg::NegativeAxis => LayoutDirection::NegativeAxis,
        }
    }
}

/// Orrery command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "orrery", about = "Solar system orbit simulator")]
pub struct CliArgs {
    /// Orbital speed multiplier (clamped to 0 - 100).
    #[arg(long)]
    pub speed: Option<f32>,

    /// Seed for initial orbit phases.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of frames to run (0 = until interrupted).
    #[arg(long)]
    pub frames: Option<u64>,

    /// Target frame rate (0 = unthrottled).
    #[arg(long)]
    pub fps: Option<u32>,

    /// Clearance between consecutive orbits.
    #[arg(long)]
    pub gap: Option<f32>,

    /// Orbit layout direction.
    #[arg(long, value_enum)]
    pub direction: Option<DirectionArg>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log every body's pose every frame.
    #[arg(long)]
    pub log_poses: bool,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(speed) = args.speed {
            self.simulation.speed_scale = speed;
        }
        if let Some(seed) = args.seed {
            self.simulation.seed = Some(seed);
        }
        if let Some(frames) = args.frames {
            self.host.frames = frames;
        }
        if let Some(fps) = args.fps {
            self.host.target_fps = fps;
        }
        if let Some(gap) = args.gap {
            self.layout.gap = gap;
        }
        if let Some(direction) = args.direction {
            self.layout.direction = direction.into();
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
        if args.log_poses {
            self.debug.log_poses = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            speed: Some(25.0),
            seed: Some(7),
            direction: Some(DirectionArg::NegativeAxis),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.simulation.speed_scale, 25.0);
        assert_eq!(config.simulation.seed, Some(7));
        assert_eq!(config.layout.direction, LayoutDirection::NegativeAxis);
        // Non-overridden fields retain defaults
        assert_eq!(config.layout.gap, 5.0);
        assert_eq!(config.host.target_fps, 60);
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "orrery",
            "--speed",
            "3.5",
            "--frames",
            "600",
            "--direction",
            "negative-axis",
            "--log-poses",
        ]);
        assert_eq!(args.speed, Some(3.5));
        assert_eq!(args.frames, Some(600));
        assert_eq!(args.direction, Some(DirectionArg::NegativeAxis));
        assert!(args.log_poses);
        assert!(args.config.is_none());
    }
}
