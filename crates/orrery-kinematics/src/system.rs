//! A full set of bodies built from a body table.

use std::collections::HashMap;
use std::f32::consts::TAU;

use rand::{Rng, RngCore};
use tracing::{debug, info};

use crate::body::{CelestialBody, SatelliteOrbit};
use crate::catalog::{BodySpec, MotionScale};
use crate::clock::FrameStep;
use crate::error::KinematicsError;
use crate::layout::{DEFAULT_MOON_GAP, LayoutEntry, OrbitLayoutPlanner, validate_radius};
use crate::pose::Pose;

/// Layout parameters for a whole system.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SystemLayout {
    pub planner: OrbitLayoutPlanner,
    /// Clearance between a primary's surface and its satellites' orbit.
    pub moon_gap: f32,
}

impl Default for SystemLayout {
    fn default() -> Self {
        Self {
            planner: OrbitLayoutPlanner::default(),
            moon_gap: DEFAULT_MOON_GAP,
        }
    }
}

/// Draw one initial phase per body, uniform over `[0, TAU)`.
pub fn random_phases<R: Rng>(rng: &mut R, count: usize) -> Vec<f32> {
    (0..count).map(|_| rng.gen_range(0.0..TAU)).collect()
}

/// Source of the initial phase angles handed to [`SolarSystem::build`].
pub enum InitialPhases<'a> {
    /// Uniform over `[0, TAU)`, drawn in table order.
    Random(&'a mut dyn RngCore),
    /// One angle per body, in table order.
    Fixed(Vec<f32>),
    Zero,
}

impl InitialPhases<'_> {
    fn resolve(self, count: usize) -> Result<Vec<f32>, KinematicsError> {
        match self {
            Self::Random(mut rng) => Ok(random_phases(&mut rng, count)),
            Self::Fixed(phases) if phases.len() == count => Ok(phases),
            Self::Fixed(phases) => Err(KinematicsError::PhaseCount {
                expected: count,
                actual: phases.len(),
            }),
            Self::Zero => Ok(vec![0.0; count]),
        }
    }
}

#[derive(Debug, Clone)]
struct SystemBody {
    name: String,
    body: CelestialBody,
    /// Index of the body this one circles, for satellites.
    primary: Option<usize>,
}

/// Every body of the scene, in table order.
#[derive(Debug, Clone)]
pub struct SolarSystem {
    bodies: Vec<SystemBody>,
}

impl SolarSystem {
    /// Validate `specs`, lay out orbits and create the bodies.
    ///
    /// `phases` yields one initial angle per spec. Planets use it as their
    /// orbit phase; satellites use it as their phase around the primary and
    /// share the primary's orbit phase.
    pub fn build(
        specs: &[BodySpec],
        layout: &SystemLayout,
        motion: &MotionScale,
        phases: InitialPhases<'_>,
    ) -> Result<Self, KinematicsError> {
        if specs.is_empty() {
            return Err(KinematicsError::EmptyTable);
        }
        let phases = phases.resolve(specs.len())?;
        if !layout.moon_gap.is_finite() || layout.moon_gap < 0.0 {
            return Err(KinematicsError::InvalidGap(layout.moon_gap));
        }
        motion.validate()?;

        let primaries = resolve_primaries(specs)?;

        // Satellites stay off the planner; they ride their primary's orbit.
        let planets: Vec<(usize, LayoutEntry<'_>)> = specs
            .iter()
            .enumerate()
            .filter(|(i, _)| primaries[*i].is_none())
            .map(|(i, spec)| {
                (
                    i,
                    LayoutEntry {
                        name: &spec.name,
                        physical_radius: spec.physical_radius,
                    },
                )
            })
            .collect();
        let entries: Vec<LayoutEntry<'_>> = planets.iter().map(|(_, e)| *e).collect();
        let radii = layout.planner.plan(&entries)?;

        let mut orbit_radii = vec![0.0; specs.len()];
        for ((index, _), radius) in planets.iter().zip(radii) {
            orbit_radii[*index] = radius;
        }

        let mut bodies: Vec<SystemBody> = Vec::with_capacity(specs.len());
        for (i, spec) in specs.iter().enumerate() {
            let spin_rate = motion.spin_rate(spec.spin_period);
            let body = match (primaries[i], &spec.satellite_of) {
                (Some(p), Some(link)) => {
                    let parent = &bodies[p].body;
                    CelestialBody::orbiting(
                        spec.physical_radius,
                        parent.orbit_radius,
                        parent.orbit_angular_rate,
                        spin_rate,
                    )
                    .with_orbit_angle(parent.orbit_angle)
                    .with_satellite(SatelliteOrbit {
                        radius: parent.physical_radius + layout.moon_gap,
                        angle: phases[i],
                        angular_rate: motion.orbit_rate(link.period),
                    })
                }
                _ => CelestialBody::orbiting(
                    spec.physical_radius,
                    orbit_radii[i],
                    motion.orbit_rate(spec.orbit_period),
                    spin_rate,
                )
                .with_orbit_angle(phases[i]),
            };
            debug!(
                body = %spec.name,
                orbit_radius = body.orbit_radius,
                orbit_rate = body.orbit_angular_rate,
                spin_rate = body.spin_angular_rate,
                "created body"
            );
            bodies.push(SystemBody {
                name: spec.name.clone(),
                body,
                primary: primaries[i],
            });
        }

        info!("Built solar system with {} bodies", bodies.len());
        Ok(Self { bodies })
    }

    /// Advance every body by one frame.
    pub fn advance(&mut self, step: FrameStep) {
        for entry in &mut self.bodies {
            entry.body.advance(step.dt, step.speed_scale);
        }
    }

    /// World pose of every body, in table order.
    ///
    /// Satellites are placed at their primary's current position plus their
    /// own offset, so advancement order within a frame does not matter.
    pub fn world_poses(&self) -> Vec<(&str, Pose)> {
        self.bodies
            .iter()
            .map(|entry| (entry.name.as_str(), self.world_pose_of(entry)))
            .collect()
    }

    /// World pose of the named body.
    pub fn world_pose(&self, name: &str) -> Option<Pose> {
        self.bodies
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| self.world_pose_of(entry))
    }

    fn world_pose_of(&self, entry: &SystemBody) -> Pose {
        let pose = entry.body.pose();
        match entry.primary {
            Some(p) => {
                let anchor = self.bodies[p].body.pose().translation;
                pose.with_translation(anchor + entry.body.satellite_offset())
            }
            None => pose,
        }
    }

    pub fn body(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies
            .iter()
            .find(|entry| entry.name == name)
            .map(|entry| &entry.body)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Body names and bodies, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CelestialBody)> {
        self.bodies.iter().map(|e| (e.name.as_str(), &e.body))
    }
}

/// Check names, radii and periods, and map each satellite to its primary.
fn resolve_primaries(specs: &[BodySpec]) -> Result<Vec<Option<usize>>, KinematicsError> {
    let mut seen: HashMap<&str, usize> = HashMap::with_capacity(specs.len());
    let mut primaries: Vec<Option<usize>> = Vec::with_capacity(specs.len());

    for (i, spec) in specs.iter().enumerate() {
        validate_radius(&spec.name, spec.physical_radius)?;
        let satellite_period = spec.satellite_of.as_ref().map(|s| s.period);
        for period in [Some(spec.orbit_period), Some(spec.spin_period), satellite_period]
            .into_iter()
            .flatten()
        {
            if !period.is_finite() {
                return Err(KinematicsError::InvalidPeriod {
                    body: spec.name.clone(),
                    period,
                });
            }
        }

        let primary = match &spec.satellite_of {
            None => None,
            Some(link) => {
                let p = *seen.get(link.primary.as_str()).ok_or_else(|| {
                    KinematicsError::UnknownPrimary {
                        body: spec.name.clone(),
                        primary: link.primary.clone(),
                    }
                })?;
                if primaries[p].is_some() {
                    return Err(KinematicsError::NestedSatellite {
                        body: spec.name.clone(),
                        primary: link.primary.clone(),
                    });
                }
                Some(p)
            }
        };

        if seen.insert(spec.name.as_str(), i).is_some() {
            return Err(KinematicsError::DuplicateBody(spec.name.clone()));
        }
        primaries.push(primary);
    }

    Ok(primaries)
}
