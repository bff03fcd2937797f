// ranger_core/src/models/measurement/range.rs

use crate::error::{EstimationError, Result};
use crate::estimation::ekf::{ekf_update, CovarianceUpdate};
use crate::mapping::LandmarkMap;
use crate::messages::LandmarkObservation;
use crate::models::noise::MeasurementNoise;
use crate::models::MeasurementModel;
use crate::types::{Belief, Pose};
use nalgebra::{DVector, MatrixXx3};
use serde::{Deserialize, Serialize};

/// Below this predicted range the range Jacobian is treated as undefined.
const MIN_PREDICTED_RANGE: f64 = 1e-9;

/// The stacked quantities of one batched range update, row `i` belonging to
/// observation `i`.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeLinearization {
    /// Measured ranges `z`.
    pub measured: DVector<f64>,
    /// Predicted ranges `h(x)`.
    pub predicted: DVector<f64>,
    /// Jacobian `H = ∂h/∂(x, y, theta)`.
    pub jacobian: MatrixXx3<f64>,
}

impl RangeLinearization {
    /// The innovation `z - h(x)`.
    pub fn innovation(&self) -> DVector<f64> {
        &self.measured - &self.predicted
    }
}

/// A range-only landmark sensor.
///
/// Bearings are ignored. All observations of a timestep are fused in a single
/// joint update with independent noise on each range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeMeasurementModel {
    pub noise: MeasurementNoise,
    #[serde(default)]
    pub covariance_update: CovarianceUpdate,
}

impl RangeMeasurementModel {
    pub fn new(noise: MeasurementNoise) -> Self {
        Self {
            noise,
            covariance_update: CovarianceUpdate::default(),
        }
    }

    pub fn with_covariance_update(mut self, form: CovarianceUpdate) -> Self {
        self.covariance_update = form;
        self
    }

    /// Evaluates `h` and `H` for every observation at the mean pose.
    pub fn linearize(
        &self,
        mean: &Pose,
        observations: &[LandmarkObservation],
        map: &LandmarkMap,
    ) -> Result<RangeLinearization> {
        let n = observations.len();
        let mut measured = DVector::zeros(n);
        let mut predicted = DVector::zeros(n);
        let mut jacobian = MatrixXx3::zeros(n);

        for (i, obs) in observations.iter().enumerate() {
            let landmark = map.position(obs.landmark_id)?;
            let dx = mean.x - landmark.x;
            let dy = mean.y - landmark.y;
            let range = dx.hypot(dy);
            if range < MIN_PREDICTED_RANGE {
                return Err(EstimationError::DegenerateGeometry {
                    id: obs.landmark_id,
                });
            }

            measured[i] = obs.range;
            predicted[i] = range;
            // Range does not depend on heading, so the theta column stays zero.
            jacobian[(i, 0)] = dx / range;
            jacobian[(i, 1)] = dy / range;
        }

        Ok(RangeLinearization {
            measured,
            predicted,
            jacobian,
        })
    }
}

impl MeasurementModel for RangeMeasurementModel {
    fn correct(
        &self,
        belief: &Belief,
        observations: &[LandmarkObservation],
        map: &LandmarkMap,
    ) -> Result<Belief> {
        if observations.is_empty() {
            return Ok(*belief);
        }

        let lin = self.linearize(&belief.mean, observations, map)?;
        let r = self.noise.matrix(observations.len());
        ekf_update(
            belief,
            &lin.measured,
            &lin.predicted,
            &lin.jacobian,
            &r,
            self.covariance_update,
        )
    }
}
