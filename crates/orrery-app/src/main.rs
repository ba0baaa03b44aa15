//! Orrery binary.
//!
//! Configuration is loaded from `config.ron` and can be overridden via CLI flags.
//! Run with `cargo run -p orrery-app -- --speed 10 --frames 600` for a ten
//! second run at ten times orbital speed.

use clap::Parser;
use orrery_app::{ConfigWatcher, LogSink};
use orrery_config::{CliArgs, Config, default_config_dir};
use tracing::error;

fn main() {
    let args = CliArgs::parse();

    // Resolve config directory
    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    };

    // Load or create config, then apply CLI overrides
    let file_config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    let mut config = file_config.clone();
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    orrery_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let watcher = ConfigWatcher::new(config_dir, file_config);
    let mut sink = LogSink::new(config.debug.log_poses);

    if let Err(e) = orrery_app::run(&config, Some(watcher), &mut sink) {
        error!("{e}");
        std::process::exit(1);
    }
}
