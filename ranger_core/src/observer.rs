// ranger_core/src/observer.rs

use crate::mapping::LandmarkMap;
use crate::types::Belief;
use nalgebra::{Point2, SymmetricEigen};
use serde::{Deserialize, Serialize};

/// Chi-square scale of the confidence ellipse drawn around the position mean.
pub const DEFAULT_CHI_SQUARE_SCALE: f64 = 2.2789;

/// The position-uncertainty ellipse of a belief.
///
/// Built from the x/y block of the covariance. `width` runs along the major
/// axis, `height` along the minor one, and `angle` is the major axis
/// direction in radians.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CovarianceEllipse {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle: f64,
}

impl CovarianceEllipse {
    pub fn from_belief(belief: &Belief, chi_square_scale: f64) -> Self {
        let position_cov = belief.covariance.fixed_view::<2, 2>(0, 0).into_owned();
        let eigen = SymmetricEigen::new(position_cov);

        let (major, minor) = if eigen.eigenvalues[0] >= eigen.eigenvalues[1] {
            (0, 1)
        } else {
            (1, 0)
        };
        // Round-off can push a zero eigenvalue slightly negative.
        let axis = |i: usize| 2.0 * (chi_square_scale * eigen.eigenvalues[i].max(0.0)).sqrt();
        let direction = eigen.eigenvectors.column(major);

        Self {
            center: Point2::new(belief.x(), belief.y()),
            width: axis(major),
            height: axis(minor),
            angle: direction[1].atan2(direction[0]),
        }
    }
}

/// Everything a visualization needs to draw one timestep.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeliefSnapshot {
    /// Index of the timestep that produced this belief; 0 is the initial belief.
    pub timestep: usize,
    pub belief: Belief,
    pub ellipse: CovarianceEllipse,
}

impl BeliefSnapshot {
    pub fn new(timestep: usize, belief: Belief) -> Self {
        Self {
            timestep,
            belief,
            ellipse: CovarianceEllipse::from_belief(&belief, DEFAULT_CHI_SQUARE_SCALE),
        }
    }

    /// Unit vector of the heading, for drawing an arrow at the mean.
    pub fn heading_direction(&self) -> (f64, f64) {
        let (sin, cos) = self.belief.theta().sin_cos();
        (cos, sin)
    }
}

/// Receives belief snapshots from the loop driving the filter.
///
/// Observers are constructed explicitly and handed to the driver. They never
/// feed anything back into the estimate.
pub trait BeliefObserver {
    /// Called once before the first timestep with the landmark map.
    fn on_start(&mut self, landmarks: &LandmarkMap) {
        let _ = landmarks;
    }

    /// Called with the initial belief and then after every timestep.
    fn observe(&mut self, snapshot: &BeliefSnapshot);

    /// Called once after the last timestep.
    fn on_finish(&mut self) {}
}
