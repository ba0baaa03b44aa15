//! Per-body orbital and spin state.

use glam::Vec3;

use crate::pose::Pose;

/// Nested circular orbit layered on top of a body's primary orbit.
///
/// Used by moons: the primary orbit tracks the parent planet around the sun,
/// and this offset circles the parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SatelliteOrbit {
    /// Distance from the parent's centre.
    pub radius: f32,
    /// Current phase in radians, unbounded.
    pub angle: f32,
    /// Signed radians per second of simulation time.
    pub angular_rate: f32,
}

impl SatelliteOrbit {
    /// Offset from the parent's centre at the current phase.
    pub fn offset(&self) -> Vec3 {
        circle_point(self.radius, self.angle)
    }
}

/// A sun, planet or moon.
///
/// Static parameters are fixed at setup. Only the angle fields change, once
/// per frame, through [`advance`](Self::advance).
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    /// Rendered sphere scale. Always positive.
    pub physical_radius: f32,
    /// Distance from the primary's centre. Zero for the sun.
    pub orbit_radius: f32,
    /// Phase along the primary orbit in radians.
    pub orbit_angle: f32,
    /// Signed radians per second of simulation time.
    pub orbit_angular_rate: f32,
    /// Rotation about the vertical axis in radians.
    pub spin_angle: f32,
    /// Signed radians per real second. Negative spins clockwise.
    pub spin_angular_rate: f32,
    /// Nested orbit around a parent body, for moons.
    pub satellite: Option<SatelliteOrbit>,
}

impl CelestialBody {
    /// A stationary body at the origin that only spins.
    pub fn stationary(physical_radius: f32, spin_angular_rate: f32) -> Self {
        Self {
            physical_radius,
            orbit_radius: 0.0,
            orbit_angle: 0.0,
            orbit_angular_rate: 0.0,
            spin_angle: 0.0,
            spin_angular_rate,
            satellite: None,
        }
    }

    /// A body on a circular orbit around the origin.
    pub fn orbiting(
        physical_radius: f32,
        orbit_radius: f32,
        orbit_angular_rate: f32,
        spin_angular_rate: f32,
    ) -> Self {
        Self {
            orbit_radius,
            orbit_angular_rate,
            ..Self::stationary(physical_radius, spin_angular_rate)
        }
    }

    /// Attach a satellite offset.
    pub fn with_satellite(mut self, satellite: SatelliteOrbit) -> Self {
        self.satellite = Some(satellite);
        self
    }

    /// Set the initial orbit phase.
    pub fn with_orbit_angle(mut self, angle: f32) -> Self {
        self.orbit_angle = angle;
        self
    }

    /// Advance the phase angles by one frame and return the resulting pose.
    ///
    /// Orbital phases scale with `speed_scale`; spin runs in real time and
    /// ignores it. `dt` must be non-negative.
    pub fn advance(&mut self, dt: f32, speed_scale: f32) -> Pose {
        self.spin_angle += self.spin_angular_rate * dt;
        self.orbit_angle += self.orbit_angular_rate * dt * speed_scale;
        if let Some(satellite) = self.satellite.as_mut() {
            satellite.angle += satellite.angular_rate * dt * speed_scale;
        }
        self.pose()
    }

    /// Pose at the current phase angles.
    pub fn pose(&self) -> Pose {
        Pose::new(self.local_translation(), self.physical_radius, self.spin_angle)
    }

    /// Position on the primary orbit, relative to the origin.
    pub fn orbit_position(&self) -> Vec3 {
        circle_point(self.orbit_radius, self.orbit_angle)
    }

    /// Satellite offset, or zero for bodies without one.
    pub fn satellite_offset(&self) -> Vec3 {
        self.satellite.map_or(Vec3::ZERO, |s| s.offset())
    }

    fn local_translation(&self) -> Vec3 {
        self.orbit_position() + self.satellite_offset()
    }
}

/// Point on a circle in the XZ plane; angle zero lies on +Z.
fn circle_point(radius: f32, angle: f32) -> Vec3 {
    let (sin, cos) = angle.sin_cos();
    Vec3::new(radius * sin, 0.0, radius * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn earth() -> CelestialBody {
        CelestialBody::orbiting(1.0, 42.0, 0.5, 3.0).with_orbit_angle(0.7)
    }

    fn moon() -> CelestialBody {
        CelestialBody::orbiting(0.27, 42.0, 0.5, 0.2)
            .with_orbit_angle(0.7)
            .with_satellite(SatelliteOrbit {
                radius: 2.0,
                angle: 1.1,
                angular_rate: 6.0,
            })
    }

    #[test]
    fn test_zero_dt_leaves_pose_unchanged() {
        for mut body in [CelestialBody::stationary(20.0, 0.1), earth(), moon()] {
            let before = body.pose();
            for speed in [0.0, 1.0, 100.0] {
                let after = body.advance(0.0, speed);
                assert_eq!(before, after);
            }
        }
    }

    #[test]
    fn test_stationary_body_never_translates() {
        let mut sun = CelestialBody::stationary(20.0, 0.25);
        for i in 0..100 {
            let pose = sun.advance(0.016 * i as f32, 50.0);
            assert_eq!(pose.translation, Vec3::ZERO);
        }
        assert!(sun.spin_angle > 0.0);
    }

    #[test]
    fn test_angle_accumulation_is_additive() {
        let mut split = moon();
        let mut whole = moon();
        let speed = 3.0;

        split.advance(0.25, speed);
        split.advance(0.5, speed);
        whole.advance(0.75, speed);

        let eps = 1e-5;
        assert!((split.orbit_angle - whole.orbit_angle).abs() < eps);
        assert!((split.spin_angle - whole.spin_angle).abs() < eps);
        let (a, b) = (split.satellite.unwrap(), whole.satellite.unwrap());
        assert!((a.angle - b.angle).abs() < eps);
    }

    #[test]
    fn test_spin_ignores_speed_scale() {
        let mut body = moon();
        let orbit_before = body.orbit_angle;
        let satellite_before = body.satellite.unwrap().angle;

        body.advance(2.0, 0.0);

        assert_eq!(body.orbit_angle, orbit_before);
        assert_eq!(body.satellite.unwrap().angle, satellite_before);
        assert!((body.spin_angle - 0.2 * 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_orbit_scales_with_speed() {
        let mut slow = earth();
        let mut fast = earth();
        slow.advance(1.0, 1.0);
        fast.advance(1.0, 10.0);

        let slow_delta = slow.orbit_angle - 0.7;
        let fast_delta = fast.orbit_angle - 0.7;
        assert!((fast_delta - 10.0 * slow_delta).abs() < 1e-5);
        assert_eq!(slow.spin_angle, fast.spin_angle);
    }

    #[test]
    fn test_translation_follows_orbit_circle() {
        let mut body = CelestialBody::orbiting(1.0, 10.0, std::f32::consts::FRAC_PI_2, 0.0);
        let start = body.pose().translation;
        assert!(start.abs_diff_eq(Vec3::new(0.0, 0.0, 10.0), 1e-5));

        let quarter = body.advance(1.0, 1.0).translation;
        assert!(quarter.abs_diff_eq(Vec3::new(10.0, 0.0, 0.0), 1e-4));
        assert!((quarter.length() - 10.0).abs() < 1e-4);
    }

    #[test]
    fn test_negative_rate_orbits_retrograde() {
        let mut body = CelestialBody::orbiting(1.0, 10.0, -1.0, -1.0);
        let pose = body.advance(0.1, 1.0);
        assert!(pose.translation.x < 0.0);
        assert!(pose.spin < 0.0);
    }

    #[test]
    fn test_moon_translation_is_primary_orbit_plus_offset() {
        let mut earth = earth();
        let mut moon = moon();
        let earth_pose = earth.advance(0.3, 2.0);
        let moon_pose = moon.advance(0.3, 2.0);

        let satellite = moon.satellite.unwrap();
        let expected = earth_pose.translation
            + Vec3::new(
                2.0 * satellite.angle.sin(),
                0.0,
                2.0 * satellite.angle.cos(),
            );
        assert!(
            moon_pose.translation.abs_diff_eq(expected, 1e-5),
            "moon {} vs expected {}",
            moon_pose.translation,
            expected
        );
        assert_eq!(moon_pose.scale, 0.27);
    }

    #[test]
    fn test_pose_scale_is_physical_radius() {
        let mut body = CelestialBody::orbiting(11.0, 80.0, 0.1, 0.1);
        assert_eq!(body.advance(1.0, 1.0).scale, 11.0);
    }

    #[test]
    fn test_advance_is_deterministic() {
        let steps = [
            (0.0, 1.0),
            (0.017, 1.0),
            (0.016, 25.0),
            (0.033, 0.0),
            (0.5, 100.0),
        ];
        let run = || {
            let mut body = moon();
            steps
                .iter()
                .map(|&(dt, s)| {
                    let pose = body.advance(dt, s);
                    (pose.translation.to_array().map(f32::to_bits), pose.spin.to_bits())
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(), run());
    }
}
