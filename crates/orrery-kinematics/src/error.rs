//! Setup-time errors for body tables and orbit layout.

/// Errors raised while validating a body table or laying out orbits.
///
/// Every variant is detected once, before the first frame. Per-frame
/// advancement has no error path.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KinematicsError {
    /// The body table has no entries.
    #[error("body table is empty")]
    EmptyTable,

    /// A body's physical radius is zero, negative, or not finite.
    #[error("body `{body}` has invalid physical radius {radius}")]
    NonPositiveRadius { body: String, radius: f32 },

    /// The layout gap is negative or not finite.
    #[error("invalid orbit gap {0}")]
    InvalidGap(f32),

    /// The planner produced a non-finite orbit radius.
    #[error("orbit radius for `{body}` is not finite ({radius})")]
    InvalidOrbitRadius { body: String, radius: f32 },

    /// An orbital or spin period is not finite.
    #[error("body `{body}` has invalid period {period}")]
    InvalidPeriod { body: String, period: f32 },

    /// A base period used to convert relative periods into rates is not positive.
    #[error("invalid base period {0} seconds")]
    InvalidMotionScale(f32),

    /// Two bodies share a name.
    #[error("duplicate body name `{0}`")]
    DuplicateBody(String),

    /// A satellite names a primary that does not appear before it.
    #[error("satellite `{body}` references unknown primary `{primary}`")]
    UnknownPrimary { body: String, primary: String },

    /// A satellite's primary is itself a satellite.
    #[error("satellite `{body}` cannot orbit another satellite `{primary}`")]
    NestedSatellite { body: String, primary: String },

    /// The number of explicit initial phases does not match the body count.
    #[error("expected {expected} initial phases, got {actual}")]
    PhaseCount { expected: usize, actual: usize },
}
