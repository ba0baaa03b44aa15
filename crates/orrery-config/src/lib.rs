//! Configuration for the orrery.
//!
//! Settings persist to disk as `config.ron`, can be overridden from the
//! command line, and are re-read while running so the speed scale can be
//! changed live.

mod cli;
mod config;
mod error;

pub use cli::{CliArgs, DirectionArg};
pub use config::{
    Config, DebugConfig, HostConfig, LayoutConfig, SimulationConfig, default_config_dir,
};
pub use error::ConfigError;
