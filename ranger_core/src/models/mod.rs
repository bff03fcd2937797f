// ranger_core/src/models/mod.rs

use crate::error::Result;
use crate::estimation::ekf::ekf_predict;
use crate::mapping::LandmarkMap;
use crate::messages::{LandmarkObservation, OdometryDelta};
use crate::types::{Belief, Pose};
use dyn_clone::DynClone;
use nalgebra::Matrix3;
use std::fmt::Debug;

// --- MOTION MODEL TRAIT ---
// Represents how the robot moves under an odometry input. `x' = g(x, u)`
/// A motion model used by the prediction step.
///
/// Implementations provide the mean propagation and its two Jacobians; the
/// covariance propagation `G P G^T + V Q V^T` is shared by all of them.
pub trait MotionModel: DynClone + Debug + Send + Sync {
    /// Propagates the mean pose through the motion function.
    fn predict_mean(&self, mean: &Pose, u: &OdometryDelta) -> Pose;

    /// Calculates the Jacobians of the motion function at `mean`.
    ///
    /// # Returns
    /// A tuple `(G, V)` where `G = ∂g/∂x` and `V = ∂g/∂u`.
    fn calculate_jacobian(&self, mean: &Pose, u: &OdometryDelta) -> (Matrix3<f64>, Matrix3<f64>);

    /// Returns the control noise covariance `Q`.
    fn get_q(&self) -> Matrix3<f64>;

    /// PURE FUNCTION: the full prediction step for this model.
    fn predict(&self, belief: &Belief, u: &OdometryDelta) -> Belief {
        let mean = self.predict_mean(&belief.mean, u);
        let (g, v) = self.calculate_jacobian(&belief.mean, u);
        ekf_predict(belief, mean, &g, &v, &self.get_q())
    }
}

// This macro automatically generates the implementation of `Clone` for `Box<dyn MotionModel>`.
dyn_clone::clone_trait_object!(MotionModel);

// --- MEASUREMENT MODEL TRAIT ---
// Represents the mathematical model of a sensor. `z = h(x) + v`
/// A measurement model used by the correction step.
pub trait MeasurementModel: DynClone + Debug + Send + Sync {
    /// PURE FUNCTION: fuses `observations` into `belief`.
    ///
    /// An empty observation slice must return `belief` unchanged.
    fn correct(
        &self,
        belief: &Belief,
        observations: &[LandmarkObservation],
        map: &LandmarkMap,
    ) -> Result<Belief>;
}

dyn_clone::clone_trait_object!(MeasurementModel);

pub mod measurement;
pub mod motion;
pub mod noise;

pub use measurement::range::RangeMeasurementModel;
pub use motion::odometry::OdometryMotionModel;
pub use noise::{MeasurementNoise, ProcessNoise};
