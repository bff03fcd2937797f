// ranger_core/src/estimation/filters/ekf.rs

use std::any::Any;

use crate::error::Result;
use crate::estimation::{FilterInput, StateEstimator, StepReport};
use crate::mapping::LandmarkMap;
use crate::messages::{LandmarkObservation, OdometryDelta, TimestepRecord};
use crate::models::{MeasurementModel, MotionModel};
use crate::types::Belief;
use crate::utils::normalize_angle;
use serde::{Deserialize, Serialize};

/// What the filter does with the heading after each step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingMode {
    /// Wrap theta to (-π, π].
    #[default]
    Wrapped,
    /// Leave theta as the models produce it.
    Unbounded,
}

/// What the filter does with an observation of a landmark missing from the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLandmarkPolicy {
    /// Fail the whole correction with
    /// [`EstimationError::UnknownLandmark`](crate::error::EstimationError::UnknownLandmark).
    #[default]
    Abort,
    /// Drop the observation and list it in the [`StepReport`].
    Skip,
}

/// A concrete implementation of an Extended Kalman Filter.
///
/// Owns the current belief between timesteps and sequences the pure
/// prediction and correction steps of its models.
#[derive(Clone)]
pub struct ExtendedKalmanFilter {
    /// The current belief of the filter.
    belief: Belief,
    motion_model: Box<dyn MotionModel>,
    measurement_model: Box<dyn MeasurementModel>,
    landmarks: LandmarkMap,
    heading_mode: HeadingMode,
    unknown_landmarks: UnknownLandmarkPolicy,
}

impl ExtendedKalmanFilter {
    /// Creates a new EKF instance.
    pub fn new(
        initial_belief: Belief,
        motion_model: Box<dyn MotionModel>,
        measurement_model: Box<dyn MeasurementModel>,
        landmarks: LandmarkMap,
    ) -> Self {
        Self {
            belief: initial_belief,
            motion_model,
            measurement_model,
            landmarks,
            heading_mode: HeadingMode::default(),
            unknown_landmarks: UnknownLandmarkPolicy::default(),
        }
    }

    pub fn with_heading_mode(mut self, mode: HeadingMode) -> Self {
        self.heading_mode = mode;
        self
    }

    pub fn with_unknown_landmarks(mut self, policy: UnknownLandmarkPolicy) -> Self {
        self.unknown_landmarks = policy;
        self
    }

    pub fn belief(&self) -> &Belief {
        &self.belief
    }

    pub fn landmarks(&self) -> &LandmarkMap {
        &self.landmarks
    }

    /// Replaces the current belief, e.g. to re-initialize the filter.
    pub fn reset(&mut self, belief: Belief) {
        self.belief = belief;
    }

    /// The prediction step. Advances the belief by one odometry reading.
    pub fn predict(&mut self, u: &OdometryDelta) {
        self.belief = self.predicted(&self.belief, u);
    }

    /// The correction step. Fuses one timestep of observations.
    pub fn correct(&mut self, observations: &[LandmarkObservation]) -> Result<StepReport> {
        let (belief, report) = self.corrected(&self.belief, observations)?;
        self.belief = belief;
        Ok(report)
    }

    /// Predict, then correct. The belief only changes if both succeed.
    pub fn step(&mut self, record: &TimestepRecord) -> Result<StepReport> {
        let predicted = self.predicted(&self.belief, &record.odometry);
        let (belief, report) = self.corrected(&predicted, &record.observations)?;
        self.belief = belief;
        Ok(report)
    }

    // --- Private Helper Methods for the EKF Algorithm ---

    fn predicted(&self, belief: &Belief, u: &OdometryDelta) -> Belief {
        self.apply_heading_mode(self.motion_model.predict(belief, u))
    }

    fn corrected(
        &self,
        belief: &Belief,
        observations: &[LandmarkObservation],
    ) -> Result<(Belief, StepReport)> {
        let mut report = StepReport::default();

        let corrected = match self.unknown_landmarks {
            UnknownLandmarkPolicy::Abort => {
                report.fused = observations.len();
                self.measurement_model
                    .correct(belief, observations, &self.landmarks)?
            }
            UnknownLandmarkPolicy::Skip => {
                let (known, unknown): (Vec<_>, Vec<_>) = observations
                    .iter()
                    .copied()
                    .partition(|obs| self.landmarks.contains(obs.landmark_id));
                report.fused = known.len();
                report.skipped = unknown.iter().map(|obs| obs.landmark_id).collect();
                self.measurement_model
                    .correct(belief, &known, &self.landmarks)?
            }
        };

        Ok((self.apply_heading_mode(corrected), report))
    }

    fn apply_heading_mode(&self, mut belief: Belief) -> Belief {
        if self.heading_mode == HeadingMode::Wrapped {
            belief.mean.z = normalize_angle(belief.mean.z);
        }
        belief
    }
}

impl std::fmt::Debug for ExtendedKalmanFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtendedKalmanFilter")
            .field("belief", &self.belief)
            .field("motion_model", &self.motion_model)
            .field("measurement_model", &self.measurement_model)
            .field("landmarks", &self.landmarks.len())
            .field("heading_mode", &self.heading_mode)
            .field("unknown_landmarks", &self.unknown_landmarks)
            .finish()
    }
}

// --- The Public Trait Implementation ---
impl StateEstimator for ExtendedKalmanFilter {
    fn process(&mut self, input: FilterInput) -> Result<StepReport> {
        match input {
            FilterInput::Odometry(u) => {
                self.predict(u);
                Ok(StepReport::default())
            }
            FilterInput::Observations(observations) => self.correct(observations),
            FilterInput::Timestep(record) => self.step(record),
        }
    }

    fn get_belief(&self) -> &Belief {
        &self.belief
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EstimationError;
    use crate::models::{OdometryMotionModel, RangeMeasurementModel};
    use crate::types::{LandmarkId, Pose};
    use approx::assert_abs_diff_eq;
    use nalgebra::Point2;
    use std::f64::consts::PI;

    fn filter(heading_mode: HeadingMode) -> ExtendedKalmanFilter {
        let landmarks = LandmarkMap::from_landmarks([
            (LandmarkId(1), Point2::new(2.0, 1.0)),
            (LandmarkId(2), Point2::new(0.0, 4.0)),
        ])
        .unwrap();
        ExtendedKalmanFilter::new(
            Belief::default(),
            Box::new(OdometryMotionModel::default()),
            Box::new(RangeMeasurementModel::default()),
            landmarks,
        )
        .with_heading_mode(heading_mode)
    }

    #[test]
    fn step_without_observations_is_pure_prediction() {
        let mut ekf = filter(HeadingMode::Unbounded);
        let u = OdometryDelta::new(0.0, 1.0, 0.0);
        let expected = OdometryMotionModel::default().predict(&Belief::default(), &u);

        let report = ekf.step(&TimestepRecord::new(u, vec![])).unwrap();
        assert_eq!(report, StepReport::default());
        assert_eq!(*ekf.belief(), expected);
        assert_abs_diff_eq!(ekf.belief().mean, Pose::new(1.0, 0.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn wrapped_heading_stays_in_range() {
        let mut wrapped = filter(HeadingMode::Wrapped);
        let mut unbounded = filter(HeadingMode::Unbounded);
        let u = OdometryDelta::new(1.0, 0.0, 1.0);
        for _ in 0..5 {
            wrapped.predict(&u);
            unbounded.predict(&u);
        }
        assert_abs_diff_eq!(unbounded.belief().theta(), 10.0, epsilon = 1e-12);
        assert!(wrapped.belief().theta() > -PI && wrapped.belief().theta() <= PI);
        assert_abs_diff_eq!(
            wrapped.belief().theta(),
            normalize_angle(10.0),
            epsilon = 1e-12
        );
    }

    #[test]
    fn unknown_landmark_aborts_without_touching_belief() {
        let mut ekf = filter(HeadingMode::Wrapped);
        let before = *ekf.belief();
        let record = TimestepRecord::new(
            OdometryDelta::new(0.0, 1.0, 0.0),
            vec![
                LandmarkObservation::new(1, 1.0, 0.0),
                LandmarkObservation::new(9, 1.0, 0.0),
            ],
        );

        let err = ekf.step(&record);
        assert_eq!(
            err,
            Err(EstimationError::UnknownLandmark { id: LandmarkId(9) })
        );
        assert_eq!(*ekf.belief(), before);
    }

    #[test]
    fn unknown_landmark_can_be_skipped() {
        let mut ekf =
            filter(HeadingMode::Wrapped).with_unknown_landmarks(UnknownLandmarkPolicy::Skip);
        let record = TimestepRecord::new(
            OdometryDelta::new(0.0, 1.0, 0.0),
            vec![
                LandmarkObservation::new(1, 1.0, 0.0),
                LandmarkObservation::new(9, 1.0, 0.0),
                LandmarkObservation::new(2, 4.1, 0.0),
            ],
        );

        let report = ekf.step(&record).unwrap();
        assert_eq!(report.fused, 2);
        assert_eq!(report.skipped, vec![LandmarkId(9)]);
    }

    #[test]
    fn process_dispatches_each_input_kind() {
        let mut ekf = filter(HeadingMode::Wrapped);
        let u = OdometryDelta::new(0.0, 1.0, 0.0);
        let obs = [LandmarkObservation::new(1, 1.0, 0.0)];

        ekf.process(FilterInput::Odometry(&u)).unwrap();
        let predicted = *ekf.get_belief();
        let report = ekf.process(FilterInput::Observations(&obs)).unwrap();

        assert_eq!(report.fused, 1);
        assert!(ekf.get_belief().trace() < predicted.trace());
        assert!(ekf
            .as_any_mut()
            .downcast_mut::<ExtendedKalmanFilter>()
            .is_some());
    }

    #[test]
    fn filter_is_cloneable_with_boxed_models() {
        let mut a = filter(HeadingMode::Wrapped);
        let b = a.clone();
        a.predict(&OdometryDelta::new(0.0, 2.0, 0.0));
        assert_ne!(a.belief(), b.belief());
        assert_eq!(*b.belief(), Belief::default());
    }
}
