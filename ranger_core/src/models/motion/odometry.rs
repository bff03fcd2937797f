// ranger_core/src/models/motion/odometry.rs

use crate::messages::OdometryDelta;
use crate::models::noise::ProcessNoise;
use crate::models::MotionModel;
use crate::types::Pose;
use nalgebra::Matrix3;
use serde::{Deserialize, Serialize};

/// The rotate-translate-rotate odometry motion model.
///
/// The heading of the predicted mean is `theta + rot1 + rot2` and is left
/// unwrapped; see [`HeadingMode`](crate::estimation::filters::ekf::HeadingMode)
/// for normalization at the filter level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OdometryMotionModel {
    /// Noise on `(rot1, trans, rot2)`.
    pub noise: ProcessNoise,
}

impl OdometryMotionModel {
    pub fn new(noise: ProcessNoise) -> Self {
        Self { noise }
    }
}

impl MotionModel for OdometryMotionModel {
    fn predict_mean(&self, mean: &Pose, u: &OdometryDelta) -> Pose {
        let heading = mean.z + u.rot1;
        Pose::new(
            mean.x + u.trans * heading.cos(),
            mean.y + u.trans * heading.sin(),
            mean.z + u.rot1 + u.rot2,
        )
    }

    fn calculate_jacobian(&self, mean: &Pose, u: &OdometryDelta) -> (Matrix3<f64>, Matrix3<f64>) {
        let (sin, cos) = (mean.z + u.rot1).sin_cos();

        // G = ∂g/∂(x, y, theta)
        #[rustfmt::skip]
        let g = Matrix3::new(
            1.0, 0.0, -u.trans * sin,
            0.0, 1.0,  u.trans * cos,
            0.0, 0.0,  1.0,
        );

        // V = ∂g/∂u, columns ordered (trans, rot1, rot2).
        #[rustfmt::skip]
        let v = Matrix3::new(
            cos, -u.trans * sin, 0.0,
            sin,  u.trans * cos, 0.0,
            0.0,  1.0,           1.0,
        );

        (g, v)
    }

    fn get_q(&self) -> Matrix3<f64> {
        self.noise.matrix()
    }
}
