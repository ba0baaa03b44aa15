//! Static body table for the solar system.
//!
//! Sizes are relative to Earth (NASA "solar system sizes"), with the sun
//! shrunk to 20 so that it shares a frame with the planets. Periods are
//! relative to Earth: orbits in Earth years, spins in Earth days. A negative
//! spin period renders clockwise.

use std::f32::consts::TAU;

use serde::{Deserialize, Serialize};

use crate::error::KinematicsError;

/// Setup parameters for one body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    /// Sphere radius relative to Earth.
    pub physical_radius: f32,
    /// Orbital period in Earth years. Zero keeps the body stationary.
    /// Ignored for satellites, which follow their primary.
    pub orbit_period: f32,
    /// Rotation period in Earth days, signed. Zero disables spin.
    pub spin_period: f32,
    /// Set for moons.
    #[serde(default)]
    pub satellite_of: Option<SatelliteSpec>,
}

/// Links a moon to the planet it circles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SatelliteSpec {
    /// Name of the primary body. Must appear earlier in the table.
    pub primary: String,
    /// Period around the primary in Earth years.
    pub period: f32,
}

impl BodySpec {
    pub fn new(name: &str, physical_radius: f32, orbit_period: f32, spin_period: f32) -> Self {
        Self {
            name: name.to_string(),
            physical_radius,
            orbit_period,
            spin_period,
            satellite_of: None,
        }
    }

    pub fn satellite_of(mut self, primary: &str, period: f32) -> Self {
        self.satellite_of = Some(SatelliteSpec {
            primary: primary.to_string(),
            period,
        });
        self
    }
}

/// Real seconds that one Earth year and one Earth day last on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MotionScale {
    /// Seconds for one Earth orbit at speed scale 1.
    pub earth_orbit_seconds: f32,
    /// Seconds for one Earth rotation.
    pub earth_spin_seconds: f32,
}

impl Default for MotionScale {
    fn default() -> Self {
        Self {
            earth_orbit_seconds: 60.0,
            earth_spin_seconds: 10.0,
        }
    }
}

impl MotionScale {
    pub fn validate(&self) -> Result<(), KinematicsError> {
        for base in [self.earth_orbit_seconds, self.earth_spin_seconds] {
            if !base.is_finite() || base <= 0.0 {
                return Err(KinematicsError::InvalidMotionScale(base));
            }
        }
        Ok(())
    }

    /// Orbital angular rate for a period in Earth years.
    pub fn orbit_rate(&self, period_years: f32) -> f32 {
        rate(period_years, self.earth_orbit_seconds)
    }

    /// Spin angular rate for a period in Earth days.
    pub fn spin_rate(&self, period_days: f32) -> f32 {
        rate(period_days, self.earth_spin_seconds)
    }
}

fn rate(period: f32, base_seconds: f32) -> f32 {
    if period == 0.0 {
        0.0
    } else {
        TAU / (period * base_seconds)
    }
}

/// Sun, planets and Earth's moon, sun to outermost.
pub fn solar_system() -> Vec<BodySpec> {
    vec![
        BodySpec::new("Sun", 20.0, 0.0, 25.4),
        BodySpec::new("Mercury", 0.38, 0.241, 58.6),
        BodySpec::new("Venus", 0.95, 0.615, -243.0),
        BodySpec::new("Earth", 1.0, 1.0, 1.0),
        BodySpec::new("Moon", 0.27, 1.0, 27.3).satellite_of("Earth", 0.0748),
        BodySpec::new("Mars", 0.53, 1.881, 1.03),
        BodySpec::new("Jupiter", 11.0, 11.86, 0.41),
        BodySpec::new("Saturn", 9.0, 29.46, 0.45),
        BodySpec::new("Uranus", 4.0, 84.01, -0.72),
        BodySpec::new("Neptune", 3.85, 164.8, 0.67),
    ]
}
