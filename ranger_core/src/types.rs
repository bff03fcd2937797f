// ranger_core/src/types.rs

use nalgebra::{Matrix3, Vector3};
use serde::{Deserialize, Serialize};
use std::fmt;

// --- Core Type Aliases ---
/// Robot pose `(x, y, theta)` in the world frame.
pub type Pose = Vector3<f64>;
/// Covariance over `(x, y, theta)`.
pub type Covariance = Matrix3<f64>;

// --- Core Identifier ---
/// Key into a [`LandmarkMap`](crate::mapping::LandmarkMap). Valid ids are positive.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LandmarkId(pub u32);

impl fmt::Display for LandmarkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for LandmarkId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

/// The filter's sufficient statistic: a pose mean and its covariance.
///
/// A belief is a value. Every prediction and correction produces a new one
/// and leaves its input untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Belief {
    /// The mean pose `(x, y, theta)`. Theta is in radians and is not wrapped.
    pub mean: Pose,
    /// The 3x3 covariance over `(x, y, theta)`.
    pub covariance: Covariance,
}

impl Belief {
    pub fn new(mean: Pose, covariance: Covariance) -> Self {
        Self { mean, covariance }
    }

    /// A belief at `mean` with an isotropic covariance `variance * I`.
    pub fn with_variance(mean: Pose, variance: f64) -> Self {
        Self {
            mean,
            covariance: Covariance::identity() * variance,
        }
    }

    pub fn x(&self) -> f64 {
        self.mean.x
    }

    pub fn y(&self) -> f64 {
        self.mean.y
    }

    pub fn theta(&self) -> f64 {
        self.mean.z
    }

    /// Sum of the marginal variances. Used as a scalar measure of uncertainty.
    pub fn trace(&self) -> f64 {
        self.covariance.trace()
    }
}

impl Default for Belief {
    /// Zero pose with identity covariance, the conventional starting point.
    fn default() -> Self {
        Self::with_variance(Pose::zeros(), 1.0)
    }
}
