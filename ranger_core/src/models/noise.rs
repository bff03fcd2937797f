// ranger_core/src/models/noise.rs

use crate::error::{EstimationError, Result};
use nalgebra::{DMatrix, Matrix3, Vector3};
use serde::{Deserialize, Serialize};

/// Default variance on each odometry component.
pub const DEFAULT_PROCESS_NOISE: f64 = 0.2;
/// Default variance of a single range reading.
pub const DEFAULT_MEASUREMENT_NOISE: f64 = 0.5;

fn check(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(EstimationError::InvalidNoise { name, value })
    }
}

/// Diagonal covariance `Q` of the odometry inputs `(rot1, trans, rot2)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "[f64; 3]", into = "[f64; 3]")]
pub struct ProcessNoise {
    diagonal: Vector3<f64>,
}

impl ProcessNoise {
    /// The same variance on all three control components.
    pub fn uniform(variance: f64) -> Result<Self> {
        Self::diagonal(variance, variance, variance)
    }

    pub fn diagonal(rot1: f64, trans: f64, rot2: f64) -> Result<Self> {
        Ok(Self {
            diagonal: Vector3::new(
                check("process", rot1)?,
                check("process", trans)?,
                check("process", rot2)?,
            ),
        })
    }

    /// The full 3x3 `Q` matrix.
    pub fn matrix(&self) -> Matrix3<f64> {
        Matrix3::from_diagonal(&self.diagonal)
    }
}

impl Default for ProcessNoise {
    fn default() -> Self {
        Self {
            diagonal: Vector3::repeat(DEFAULT_PROCESS_NOISE),
        }
    }
}

impl TryFrom<[f64; 3]> for ProcessNoise {
    type Error = EstimationError;

    fn try_from(v: [f64; 3]) -> Result<Self> {
        Self::diagonal(v[0], v[1], v[2])
    }
}

impl From<ProcessNoise> for [f64; 3] {
    fn from(noise: ProcessNoise) -> Self {
        noise.diagonal.into()
    }
}

/// Variance of one range reading. Readings are independent, so the batch
/// covariance `R` is this value on an `n x n` diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct MeasurementNoise {
    variance: f64,
}

impl MeasurementNoise {
    pub fn new(variance: f64) -> Result<Self> {
        Ok(Self {
            variance: check("measurement", variance)?,
        })
    }

    pub fn variance(&self) -> f64 {
        self.variance
    }

    /// `R` for a batch of `n` observations.
    pub fn matrix(&self, n: usize) -> DMatrix<f64> {
        DMatrix::identity(n, n) * self.variance
    }
}

impl Default for MeasurementNoise {
    fn default() -> Self {
        Self {
            variance: DEFAULT_MEASUREMENT_NOISE,
        }
    }
}

impl TryFrom<f64> for MeasurementNoise {
    type Error = EstimationError;

    fn try_from(variance: f64) -> Result<Self> {
        Self::new(variance)
    }
}

impl From<MeasurementNoise> for f64 {
    fn from(noise: MeasurementNoise) -> Self {
        noise.variance
    }
}
