//! Physics error types.

use super::body::BodyHandle;

/// Errors returned by configuration validation and handle-based accessors.
///
/// A simulation step itself never fails.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PhysicsError {
    #[error("fixed timestep must be finite and positive, got {0}")]
    InvalidTimestep(f64),

    #[error("maximum frame time must be finite and at least one fixed step, got {0}")]
    InvalidFrameClamp(f64),

    #[error("grid cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),

    #[error("no body registered for handle {0:?}")]
    UnknownBody(BodyHandle),
}
