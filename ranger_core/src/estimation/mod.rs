// ranger_core/src/estimation/mod.rs

use crate::error::Result;
use crate::messages::{LandmarkObservation, OdometryDelta, TimestepRecord};
use crate::types::{Belief, LandmarkId};
use std::any::Any;

/// The universal input packet for all `StateEstimator` implementations.
#[derive(Debug, Clone, Copy)]
pub enum FilterInput<'a> {
    /// Run only the prediction step.
    Odometry(&'a OdometryDelta),
    /// Run only the correction step.
    Observations(&'a [LandmarkObservation]),
    /// Predict, then correct, as one step.
    Timestep(&'a TimestepRecord),
}

/// What a call to [`StateEstimator::process`] did with its observations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepReport {
    /// Observations that went into the correction.
    pub fused: usize,
    /// Observations dropped because their landmark is not in the map.
    pub skipped: Vec<LandmarkId>,
}

/// The contract for any algorithm that performs the "State Estimator" role.
/// Its sole responsibility is to estimate the pose of the robot.
pub trait StateEstimator: Send + Sync {
    /// The single, unified method for processing all types of input data.
    ///
    /// On error the estimator's belief is left as it was before the call.
    fn process(&mut self, input: FilterInput) -> Result<StepReport>;

    /// Returns a reference to the current best estimate.
    fn get_belief(&self) -> &Belief;

    /// Allows for dynamic downcasting to access algorithm-specific methods if needed.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

pub mod ekf;
pub mod filters;
