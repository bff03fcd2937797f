// ranger_core/src/estimation/ekf.rs

use crate::error::{EstimationError, Result};
use crate::types::{Belief, Covariance, Pose};
use nalgebra::{DMatrix, DVector, Matrix3, MatrixXx3};
use serde::{Deserialize, Serialize};

/// Smallest pivot of the Cholesky factor of `S`, relative to the scale of `S`,
/// that is still treated as invertible.
const MIN_RELATIVE_PIVOT: f64 = 1e-7;

/// How the corrected covariance is formed from the Kalman gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CovarianceUpdate {
    /// `P' = (I - K H) P`.
    #[default]
    Standard,
    /// `P' = (I - K H) P (I - K H)^T + K R K^T`. Symmetric and PSD for any gain.
    Joseph,
}

/// PURE FUNCTION: Performs one EKF prediction step.
///
/// `g` is the Jacobian of the motion function w.r.t. the state, `v` the
/// Jacobian w.r.t. the control and `q` the control noise. Both Jacobians must
/// be evaluated at the mean of `belief`.
pub fn ekf_predict(
    belief: &Belief,
    predicted_mean: Pose,
    g: &Matrix3<f64>,
    v: &Matrix3<f64>,
    q: &Matrix3<f64>,
) -> Belief {
    let covariance = g * belief.covariance * g.transpose() + v * q * v.transpose();
    Belief::new(predicted_mean, covariance)
}

/// PURE FUNCTION: Performs one batched EKF measurement update.
///
/// `z` holds the measurements, `z_pred` the predicted measurements `h(x)` and
/// `h_jac` the `n x 3` Jacobian `H`, all in the same row order. `r` is the
/// `n x n` measurement covariance.
pub fn ekf_update(
    belief: &Belief,
    z: &DVector<f64>,
    z_pred: &DVector<f64>,
    h_jac: &MatrixXx3<f64>,
    r: &DMatrix<f64>,
    form: CovarianceUpdate,
) -> Result<Belief> {
    let n = z.len();
    debug_assert_eq!(z_pred.len(), n);
    debug_assert_eq!(h_jac.nrows(), n);
    debug_assert_eq!((r.nrows(), r.ncols()), (n, n));

    let p = &belief.covariance;
    let y = z - z_pred; // Innovation

    // H P is needed twice: once for S and once (transposed) for the gain.
    let hp = h_jac * p;
    let s: DMatrix<f64> = &hp * h_jac.transpose() + r;

    // S is symmetric positive definite whenever it is invertible, so a
    // Cholesky solve both inverts it and tells us when it cannot be inverted.
    let s_chol = s
        .clone()
        .cholesky()
        .filter(|chol| is_well_conditioned(&s, chol.l_dirty()))
        .ok_or(EstimationError::SingularInnovation { observations: n })?;

    // K = P H^T S^-1  <=>  K^T = S^-1 H P, since P and S are symmetric.
    let k_gain = s_chol.solve(&hp).transpose();

    let mean = belief.mean + &k_gain * y;
    let i_kh: Matrix3<f64> = Matrix3::identity() - &k_gain * h_jac;
    let covariance: Covariance = match form {
        CovarianceUpdate::Standard => i_kh * p,
        CovarianceUpdate::Joseph => {
            i_kh * p * i_kh.transpose() + &k_gain * r * k_gain.transpose()
        }
    };

    Ok(Belief::new(mean, covariance))
}

fn is_well_conditioned(s: &DMatrix<f64>, l: &DMatrix<f64>) -> bool {
    let scale = s.diagonal().amax().sqrt();
    if !scale.is_finite() || scale == 0.0 {
        return false;
    }
    l.diagonal()
        .iter()
        .all(|&pivot| pivot.is_finite() && pivot > MIN_RELATIVE_PIVOT * scale)
}

/// Largest absolute difference between `m` and its transpose.
pub fn asymmetry(m: &Matrix3<f64>) -> f64 {
    (m - m.transpose()).amax()
}
