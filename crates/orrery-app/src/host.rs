//! Headless host loop: owns the simulation state, advances every body once
//! per frame and hands the resulting poses to a [`PoseSink`].

use std::path::PathBuf;

use orrery_config::Config;
use orrery_kinematics::{FrameStep, InitialPhases, Pose, SimulationState, SolarSystem};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;
use tracing::{debug, info, warn};

use crate::error::AppError;
use crate::frame_clock::{FrameClock, FramePacer};

/// Receives every body's world pose once per frame.
///
/// This is the seam where a renderer turns poses into model matrices and
/// draw calls.
pub trait PoseSink {
    fn submit(&mut self, frame: u64, poses: &[(&str, Pose)]);
}

/// Logs poses through `tracing`.
pub struct LogSink {
    verbose: bool,
}

impl LogSink {
    /// With `verbose`, every pose of every frame is logged at debug level.
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl PoseSink for LogSink {
    fn submit(&mut self, frame: u64, poses: &[(&str, Pose)]) {
        if !self.verbose {
            return;
        }
        for (name, pose) in poses {
            debug!(
                frame,
                body = *name,
                x = pose.translation.x,
                z = pose.translation.z,
                spin = pose.spin,
                "pose"
            );
        }
    }
}

/// Solar system plus the host-owned clock and speed scale.
pub struct Orrery {
    system: SolarSystem,
    state: SimulationState,
}

impl Orrery {
    /// Build the system described by `config`.
    ///
    /// Initial phases come from `simulation.seed`; without one a seed is
    /// drawn and logged so the run can be reproduced.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let seed = config.simulation.seed.unwrap_or_else(rand::random);
        info!("Initial phase seed: {seed}");
        let mut rng = Xoshiro256StarStar::seed_from_u64(seed);

        let system = SolarSystem::build(
            &config.bodies,
            &config.layout.system_layout(),
            &config.simulation.motion_scale(),
            InitialPhases::Random(&mut rng),
        )?;

        Ok(Self {
            system,
            state: SimulationState::new(config.simulation.speed_scale),
        })
    }

    /// Run one frame at host time `elapsed_seconds`.
    pub fn frame(&mut self, elapsed_seconds: f64) -> FrameStep {
        let step = self.state.tick(elapsed_seconds);
        self.system.advance(step);
        step
    }

    pub fn poses(&self) -> Vec<(&str, Pose)> {
        self.system.world_poses()
    }

    pub fn system(&self) -> &SolarSystem {
        &self.system
    }

    pub fn speed_scale(&self) -> f32 {
        self.state.speed_scale()
    }

    pub fn set_speed_scale(&mut self, speed_scale: f32) {
        self.state.set_speed_scale(speed_scale);
        info!("Speed scale set to {}", self.state.speed_scale());
    }

    pub fn frame_count(&self) -> u64 {
        self.state.frame_count()
    }
}

/// What changed between two versions of the config file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConfigChange {
    /// New speed scale, if it changed.
    pub speed_scale: Option<f32>,
    /// Layout, timing or body changes that only apply on the next start.
    pub needs_restart: bool,
}

impl ConfigChange {
    pub fn between(old: &Config, new: &Config) -> Self {
        let speed_scale = (old.simulation.speed_scale != new.simulation.speed_scale)
            .then_some(new.simulation.speed_scale);
        let needs_restart = old.layout != new.layout
            || old.bodies != new.bodies
            || old.simulation.motion_scale() != new.simulation.motion_scale();
        Self {
            speed_scale,
            needs_restart,
        }
    }
}

/// Polls `config.ron` for edits made while running.
pub struct ConfigWatcher {
    dir: PathBuf,
    baseline: Config,
}

impl ConfigWatcher {
    /// `baseline` is the config as read from disk, before CLI overrides.
    pub fn new(dir: PathBuf, baseline: Config) -> Self {
        Self { dir, baseline }
    }

    /// Re-read the file; returns the change if it differs from the last read.
    /// Read errors are logged and treated as no change.
    pub fn poll(&mut self) -> Option<ConfigChange> {
        match self.baseline.reload(&self.dir) {
            Ok(Some(new)) => {
                let change = ConfigChange::between(&self.baseline, &new);
                self.baseline = new;
                Some(change)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("Config reload failed: {e}");
                None
            }
        }
    }
}

/// Totals reported when the loop ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub frames: u64,
    pub elapsed_seconds: f64,
}

/// Run the frame loop until `config.host.frames` frames have been produced
/// (forever when zero).
pub fn run(
    config: &Config,
    mut watcher: Option<ConfigWatcher>,
    sink: &mut impl PoseSink,
) -> Result<RunSummary, AppError> {
    let mut orrery = Orrery::from_config(config)?;
    let clock = FrameClock::new();
    let mut pacer = FramePacer::new(config.host.target_fps);
    let reload_every = config.host.reload_every_frames;

    info!(
        "Running {} bodies at speed {} ({} fps target)",
        orrery.system().len(),
        orrery.speed_scale(),
        config.host.target_fps
    );

    loop {
        let frame = orrery.frame_count();
        if config.host.frames > 0 && frame >= config.host.frames {
            break;
        }

        orrery.frame(clock.elapsed_seconds());
        sink.submit(frame, &orrery.poses());

        if reload_every > 0
            && frame > 0
            && frame % reload_every == 0
            && let Some(change) = watcher.as_mut().and_then(ConfigWatcher::poll)
        {
            if let Some(speed) = change.speed_scale {
                orrery.set_speed_scale(speed);
            }
            if change.needs_restart {
                warn!("Layout or body changes take effect on restart");
            }
        }

        pacer.wait();
    }

    let summary = RunSummary {
        frames: orrery.frame_count(),
        elapsed_seconds: clock.elapsed_seconds(),
    };
    info!(
        "Finished {} frames in {:.2}s",
        summary.frames, summary.elapsed_seconds
    );
    Ok(summary)
}
