//! Orbital kinematics for the orrery: per-body phase advancement, poses,
//! uniform-gap orbit layout and the frame clock that drives them.

mod body;
mod catalog;
mod clock;
mod error;
mod layout;
mod pose;
mod system;

pub use body::{CelestialBody, SatelliteOrbit};
pub use catalog::{BodySpec, MotionScale, SatelliteSpec, solar_system};
pub use clock::{FrameStep, MAX_FRAME_DT, MAX_SPEED_SCALE, MIN_SPEED_SCALE, SimulationState};
pub use error::KinematicsError;
pub use layout::{
    DEFAULT_GAP, DEFAULT_MOON_GAP, DEFAULT_SUN_CLEARANCE, LayoutDirection, LayoutEntry,
    OrbitLayoutPlanner, next_orbit_radius, next_orbit_radius_outward, validate_radius,
};
pub use pose::{Pose, SPIN_AXIS};
pub use system::{InitialPhases, SolarSystem, SystemLayout, random_phases};
