// ranger_core/src/error.rs

use crate::types::LandmarkId;
use thiserror::Error;

/// Everything that can go wrong inside the estimation core.
///
/// These are deterministic failures. Retrying the same call with the same
/// inputs always fails the same way.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EstimationError {
    /// The innovation covariance `S = H P H^T + R` could not be inverted.
    #[error("innovation covariance is singular ({observations} observations)")]
    SingularInnovation { observations: usize },

    /// An observation refers to a landmark that is not in the map.
    #[error("landmark {id} is not in the landmark map")]
    UnknownLandmark { id: LandmarkId },

    /// The parallel observation arrays disagree in length.
    #[error(
        "observation arrays differ in length: {ids} ids, {ranges} ranges, {bearings} bearings"
    )]
    DimensionMismatch {
        ids: usize,
        ranges: usize,
        bearings: usize,
    },

    /// The predicted position coincides with a landmark, so the range Jacobian is undefined.
    #[error("predicted position coincides with landmark {id}")]
    DegenerateGeometry { id: LandmarkId },

    /// A noise magnitude was negative or not finite.
    #[error("invalid {name} noise value {value}")]
    InvalidNoise { name: &'static str, value: f64 },

    /// A landmark could not be added to the map.
    #[error("invalid landmark {id}: {reason}")]
    InvalidLandmark { id: LandmarkId, reason: &'static str },
}

pub type Result<T, E = EstimationError> = std::result::Result<T, E>;
