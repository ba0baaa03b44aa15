//! Wall-clock timing for the host frame loop.
//!
//! [`FrameClock`] supplies the monotonically increasing elapsed time that
//! feeds `SimulationState::tick`. [`FramePacer`] sleeps out the remainder of
//! each frame when a target rate is set.

use std::time::{Duration, Instant};

/// Seconds elapsed since the clock was created.
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    /// Creates a clock starting from the current instant.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Seconds since [`new`](Self::new). Never decreases.
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

/// Throttles the loop to a target frame rate.
pub struct FramePacer {
    frame_time: Option<Duration>,
    frame_start: Instant,
}

impl FramePacer {
    /// `target_fps == 0` disables throttling.
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_time: frame_duration(target_fps),
            frame_start: Instant::now(),
        }
    }

    /// Sleep until the current frame has lasted at least one frame time,
    /// then start the next frame.
    pub fn wait(&mut self) {
        if let Some(frame_time) = self.frame_time {
            let spent = self.frame_start.elapsed();
            if let Some(remaining) = frame_time.checked_sub(spent) {
                std::thread::sleep(remaining);
            }
        }
        self.frame_start = Instant::now();
    }

    pub fn frame_time(&self) -> Option<Duration> {
        self.frame_time
    }
}

fn frame_duration(target_fps: u32) -> Option<Duration> {
    (target_fps > 0).then(|| Duration::from_secs_f64(1.0 / target_fps as f64))
}
