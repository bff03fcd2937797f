// ranger_core/src/prelude.rs

// --- Core Abstractions (The main contracts of the library) ---
pub use crate::estimation::{FilterInput, StateEstimator, StepReport};
pub use crate::models::{MeasurementModel, MotionModel};
pub use crate::observer::{BeliefObserver, BeliefSnapshot, CovarianceEllipse};

// --- Core Data Structures (The "nouns" of the library) ---
pub use crate::error::EstimationError;
pub use crate::mapping::LandmarkMap;
pub use crate::messages::{LandmarkObservation, ObservationBatch, OdometryDelta, TimestepRecord};
pub use crate::types::{Belief, Covariance, LandmarkId, Pose};

// --- Estimation Algorithms ---
pub use crate::estimation::ekf::{ekf_predict, ekf_update, CovarianceUpdate};
pub use crate::estimation::filters::{ExtendedKalmanFilter, HeadingMode, UnknownLandmarkPolicy};

// --- Concrete Model Implementations ---
pub use crate::models::{MeasurementNoise, OdometryMotionModel, ProcessNoise, RangeMeasurementModel};
