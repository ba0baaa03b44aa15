//! Host error types.

use orrery_config::ConfigError;
use orrery_kinematics::KinematicsError;

/// Errors that stop the host before or during setup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration could not be resolved, read or written.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The body table or layout parameters are invalid.
    #[error("invalid solar system setup: {0}")]
    Setup(#[from] KinematicsError),
}
