//! Uniform-gap orbit layout.
//!
//! Each body's orbit radius is derived from the previous body's already
//! assigned radius and both bodies' physical radii, so that consecutive
//! spheres never touch at closest approach. Distances are not to scale: a
//! single gap is used between every pair so that every body fits in one
//! frame.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KinematicsError;

/// Default clearance between consecutive orbits.
pub const DEFAULT_GAP: f32 = 5.0;

/// Extra clearance between the sun's surface and the first planet's orbit.
pub const DEFAULT_SUN_CLEARANCE: f32 = 5.0;

/// Clearance between a planet's surface and its moon's orbit.
pub const DEFAULT_MOON_GAP: f32 = 1.0;

/// Which way orbit radii accumulate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayoutDirection {
    /// Positive running radius.
    #[default]
    Outward,
    /// Radii decrease along a single negative axis.
    NegativeAxis,
}

/// Next orbit radius along the negative axis.
pub fn next_orbit_radius(
    previous_orbit_radius: f32,
    previous_physical_radius: f32,
    next_physical_radius: f32,
    gap: f32,
) -> f32 {
    previous_orbit_radius - previous_physical_radius - gap - next_physical_radius
}

/// Next orbit radius as a positive running total.
pub fn next_orbit_radius_outward(
    previous_orbit_radius: f32,
    previous_physical_radius: f32,
    next_physical_radius: f32,
    gap: f32,
) -> f32 {
    previous_orbit_radius + previous_physical_radius + gap + next_physical_radius
}

/// One body's input to [`OrbitLayoutPlanner::plan`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutEntry<'a> {
    pub name: &'a str,
    pub physical_radius: f32,
}

/// Lays out orbit radii from the sun outwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitLayoutPlanner {
    /// Clearance between consecutive spheres.
    pub gap: f32,
    /// Added to the first planet's radius when clearing the sun.
    pub sun_clearance: f32,
    pub direction: LayoutDirection,
}

impl Default for OrbitLayoutPlanner {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            sun_clearance: DEFAULT_SUN_CLEARANCE,
            direction: LayoutDirection::Outward,
        }
    }
}

impl OrbitLayoutPlanner {
    pub fn new(gap: f32, sun_clearance: f32, direction: LayoutDirection) -> Self {
        Self {
            gap,
            sun_clearance,
            direction,
        }
    }

    /// Radius of the orbit following one at `previous_orbit_radius`.
    pub fn next_orbit_radius(
        &self,
        previous_orbit_radius: f32,
        previous_physical_radius: f32,
        next_physical_radius: f32,
    ) -> f32 {
        match self.direction {
            LayoutDirection::Outward => next_orbit_radius_outward(
                previous_orbit_radius,
                previous_physical_radius,
                next_physical_radius,
                self.gap,
            ),
            LayoutDirection::NegativeAxis => next_orbit_radius(
                previous_orbit_radius,
                previous_physical_radius,
                next_physical_radius,
                self.gap,
            ),
        }
    }

    /// Assign an orbit radius to every entry, sun first.
    ///
    /// The first entry is the base case at radius zero. The second gets the
    /// extra sun clearance. Fails on the first invalid radius or gap rather
    /// than clamping.
    pub fn plan(&self, entries: &[LayoutEntry<'_>]) -> Result<Vec<f32>, KinematicsError> {
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(KinematicsError::InvalidGap(self.gap));
        }
        if !self.sun_clearance.is_finite() || self.sun_clearance < 0.0 {
            return Err(KinematicsError::InvalidGap(self.sun_clearance));
        }
        for entry in entries {
            validate_radius(entry.name, entry.physical_radius)?;
        }

        let mut radii = Vec::with_capacity(entries.len());
        let mut previous: Option<(f32, f32)> = None;

        for (index, entry) in entries.iter().enumerate() {
            let radius = match previous {
                None => 0.0,
                Some((prev_orbit, prev_physical)) => {
                    let clearance = if index == 1 { self.sun_clearance } else { 0.0 };
                    self.next_orbit_radius(
                        prev_orbit,
                        prev_physical,
                        entry.physical_radius + clearance,
                    )
                }
            };
            let spaced = match previous {
                None => true,
                Some((prev_orbit, prev_physical)) => clears_previous(
                    prev_orbit,
                    radius,
                    prev_physical + self.gap + entry.physical_radius,
                ),
            };
            if !radius.is_finite() || !spaced {
                return Err(KinematicsError::InvalidOrbitRadius {
                    body: entry.name.to_string(),
                    radius,
                });
            }
            debug!(body = entry.name, radius, "assigned orbit radius");
            radii.push(radius);
            previous = Some((radius, entry.physical_radius));
        }

        Ok(radii)
    }
}

/// Whether `radius` lies beyond `previous` by at least `minimum`.
///
/// Compared in f64 with a couple of ulps of slack for the f32 sums. Large
/// radii can swallow the gap entirely, which fails here.
fn clears_previous(previous: f32, radius: f32, minimum: f32) -> bool {
    let step = f64::from(radius.abs()) - f64::from(previous.abs());
    let slack = 2.0 * f64::from(radius.abs()) * f64::from(f32::EPSILON);
    step > 0.0 && step >= f64::from(minimum) - slack
}

/// Reject zero, negative and non-finite physical radii.
pub fn validate_radius(name: &str, radius: f32) -> Result<(), KinematicsError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(KinematicsError::NonPositiveRadius {
            body: name.to_string(),
            radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-4;

    fn entries() -> Vec<LayoutEntry<'static>> {
        [
            ("Sun", 20.0),
            ("Mercury", 0.38),
            ("Venus", 0.95),
            ("Earth", 1.0),
            ("Mars", 0.53),
            ("Jupiter", 11.0),
            ("Saturn", 9.0),
            ("Uranus", 4.0),
            ("Neptune", 3.85),
        ]
        .into_iter()
        .map(|(name, physical_radius)| LayoutEntry {
            name,
            physical_radius,
        })
        .collect()
    }

    #[test]
    fn test_mercury_and_venus_on_negative_axis() {
        let mercury = next_orbit_radius(0.0, 20.0, 0.38 + 5.0, 5.0);
        assert!((mercury - -30.38).abs() < EPS, "mercury = {mercury}");

        let venus = next_orbit_radius(mercury, 0.38, 0.95, 5.0);
        assert!((venus - -36.71).abs() < EPS, "venus = {venus}");
    }

    #[test]
    fn test_planner_matches_manual_chain() {
        let planner = OrbitLayoutPlanner::new(5.0, 5.0, LayoutDirection::NegativeAxis);
        let radii = planner.plan(&entries()[..3]).unwrap();
        assert_eq!(radii[0], 0.0);
        assert!((radii[1] - -30.38).abs() < EPS);
        assert!((radii[2] - -36.71).abs() < EPS);
    }

    #[test]
    fn test_outward_is_mirror_of_negative_axis() {
        let outward = OrbitLayoutPlanner::default().plan(&entries()).unwrap();
        let negative = OrbitLayoutPlanner::new(5.0, 5.0, LayoutDirection::NegativeAxis)
            .plan(&entries())
            .unwrap();
        for (o, n) in outward.iter().zip(&negative) {
            assert!((o + n).abs() < EPS, "{o} vs {n}");
        }
    }

    #[test]
    fn test_radii_strictly_increase_with_clearance() {
        let entries = entries();
        for direction in [LayoutDirection::Outward, LayoutDirection::NegativeAxis] {
            let planner = OrbitLayoutPlanner::new(DEFAULT_GAP, 0.0, direction);
            let radii = planner.plan(&entries).unwrap();
            for i in 1..radii.len() {
                let step = radii[i].abs() - radii[i - 1].abs();
                let minimum =
                    entries[i - 1].physical_radius + DEFAULT_GAP + entries[i].physical_radius;
                assert!(
                    step >= minimum - EPS,
                    "{} step {step} below minimum {minimum}",
                    entries[i].name
                );
            }
        }
    }

    #[test]
    fn test_zero_gap_still_avoids_overlap() {
        let planner = OrbitLayoutPlanner::new(0.0, 0.0, LayoutDirection::Outward);
        let radii = planner.plan(&entries()).unwrap();
        assert!((radii[1] - 20.38).abs() < EPS);
    }

    #[test]
    fn test_single_body_is_at_origin() {
        let radii = OrbitLayoutPlanner::default().plan(&entries()[..1]).unwrap();
        assert_eq!(radii, vec![0.0]);
    }

    #[test]
    fn test_non_positive_radius_rejected() {
        let mut entries = entries();
        entries[4].physical_radius = 0.0;
        let err = OrbitLayoutPlanner::default().plan(&entries).unwrap_err();
        assert_eq!(
            err,
            KinematicsError::NonPositiveRadius {
                body: "Mars".to_string(),
                radius: 0.0
            }
        );
    }

    #[test]
    fn test_nan_radius_rejected() {
        let mut entries = entries();
        entries[2].physical_radius = f32::NAN;
        let err = OrbitLayoutPlanner::default().plan(&entries).unwrap_err();
        assert!(matches!(err, KinematicsError::NonPositiveRadius { ref body, .. } if body == "Venus"));
    }

    #[test]
    fn test_invalid_gap_rejected() {
        for gap in [-1.0, f32::NAN, f32::INFINITY] {
            let planner = OrbitLayoutPlanner::new(gap, 5.0, LayoutDirection::Outward);
            assert!(matches!(
                planner.plan(&entries()),
                Err(KinematicsError::InvalidGap(_))
            ));
        }
    }

    #[test]
    fn test_overflowing_radius_rejected() {
        let entries = [
            LayoutEntry {
                name: "Sun",
                physical_radius: f32::MAX,
            },
            LayoutEntry {
                name: "Giant",
                physical_radius: f32::MAX,
            },
        ];
        let err = OrbitLayoutPlanner::default().plan(&entries).unwrap_err();
        assert!(matches!(err, KinematicsError::InvalidOrbitRadius { ref body, .. } if body == "Giant"));
    }

    #[test]
    fn test_gap_lost_to_rounding_rejected() {
        let entries = [("Sun", 3.0e8), ("A", 1.0), ("B", 1.0), ("C", 1.0)].map(
            |(name, physical_radius)| LayoutEntry {
                name,
                physical_radius,
            },
        );
        for direction in [LayoutDirection::Outward, LayoutDirection::NegativeAxis] {
            let planner = OrbitLayoutPlanner::new(DEFAULT_GAP, DEFAULT_SUN_CLEARANCE, direction);
            let err = planner.plan(&entries).unwrap_err();
            assert!(
                matches!(err, KinematicsError::InvalidOrbitRadius { ref body, .. } if body == "B"),
                "{err:?}"
            );
        }
    }

    #[test]
    fn test_spacing_check_tolerates_rounding() {
        assert!(clears_previous(0.0, 30.38, 25.38));
        assert!(clears_previous(-30.38, -36.71, 6.33));
        assert!(!clears_previous(10.0, 10.0, 0.0));
        assert!(!clears_previous(10.0, 12.0, 7.0));
    }
}
