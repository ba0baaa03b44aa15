//! Host-owned simulation clock and speed scale.
//!
//! The host feeds its monotonically increasing elapsed time into
//! [`SimulationState::tick`] once per frame and threads the resulting
//! [`FrameStep`] through every body's advance.

use tracing::warn;

/// Lower bound of the user speed control.
pub const MIN_SPEED_SCALE: f32 = 0.0;

/// Upper bound of the user speed control.
pub const MAX_SPEED_SCALE: f32 = 100.0;

/// Longest frame delta accepted, in seconds.
///
/// A host that stalls (debugger, window drag) would otherwise jump every
/// body forward by the whole stall.
pub const MAX_FRAME_DT: f64 = 0.25;

/// Time delta and speed scale for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStep {
    /// Real seconds since the previous frame, clamped to [`MAX_FRAME_DT`]
    /// by [`SimulationState::tick`].
    pub dt: f32,
    /// Orbital speed multiplier for this frame.
    pub speed_scale: f32,
}

impl FrameStep {
    pub fn new(dt: f32, speed_scale: f32) -> Self {
        Self { dt, speed_scale }
    }
}

/// Frame timing and the live speed scale.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationState {
    speed_scale: f32,
    last_elapsed: Option<f64>,
    frame_count: u64,
}

impl SimulationState {
    /// Creates a state with the given speed scale, clamped into range.
    pub fn new(speed_scale: f32) -> Self {
        let mut state = Self {
            speed_scale: 1.0,
            last_elapsed: None,
            frame_count: 0,
        };
        state.set_speed_scale(speed_scale);
        state
    }

    pub fn speed_scale(&self) -> f32 {
        self.speed_scale
    }

    /// Update the speed scale, clamping into `[0, 100]`. NaN is ignored.
    pub fn set_speed_scale(&mut self, speed_scale: f32) {
        if speed_scale.is_nan() {
            warn!("Ignoring NaN speed scale");
            return;
        }
        self.speed_scale = speed_scale.clamp(MIN_SPEED_SCALE, MAX_SPEED_SCALE);
    }

    /// Compute this frame's step from the host's elapsed seconds.
    ///
    /// The first call yields `dt = 0`. A time that goes backwards yields
    /// `dt = 0` rather than a negative delta.
    pub fn tick(&mut self, elapsed_seconds: f64) -> FrameStep {
        let mut dt = match self.last_elapsed {
            None => 0.0,
            Some(last) => (elapsed_seconds - last).max(0.0),
        };
        self.last_elapsed = Some(elapsed_seconds);
        self.frame_count += 1;

        if dt > MAX_FRAME_DT {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                dt * 1000.0,
                MAX_FRAME_DT * 1000.0
            );
            dt = MAX_FRAME_DT;
        }

        FrameStep::new(dt as f32, self.speed_scale)
    }

    /// Number of ticks taken so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Elapsed time passed to the most recent tick.
    pub fn elapsed(&self) -> Option<f64> {
        self.last_elapsed
    }
}

impl Default for SimulationState {
    fn default() -> Self {
        Self::new(1.0)
    }
}
