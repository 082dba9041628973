use thiserror::Error;

/// Failure conditions surfaced by a boolean operation.
///
/// Numerical degeneracy (zero-area triangles, near-coplanar ambiguity) is
/// absorbed by tolerance-based classification and never reported; these two
/// variants are the only caller-visible failures.
#[derive(Debug, Error)]
pub enum BooleanError {
    /// The input mesh was rejected before BSP construction.
    #[error("invalid input mesh: {0}")]
    InvalidMesh(String),

    /// The operation ran but produced no usable geometry.
    #[error("boolean operation failed: {0}")]
    OperationFailed(String),
}
