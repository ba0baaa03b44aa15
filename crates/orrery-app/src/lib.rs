//! Headless host for the orrery: frame timing, live config reload and the
//! per-frame pose hand-off that a renderer would consume.

pub mod error;
pub mod frame_clock;
pub mod host;

pub use error::AppError;
pub use frame_clock::{FrameClock, FramePacer};
pub use host::{ConfigChange, ConfigWatcher, LogSink, Orrery, PoseSink, RunSummary, run};
