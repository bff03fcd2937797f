// ranger_sim/src/prelude.rs

// Re-export the entire ranger_core prelude so the pure filter types are
// available alongside the driver's own.
pub use ranger_core::prelude::*;

pub use crate::config::structs::*;
pub use crate::error::{DataError, SimError};
pub use crate::observers::{TracingObserver, TrajectoryRecorder};
pub use crate::runner::{position_error, run_scenario, DataSource, RunSummary, Runner};
pub use crate::synthetic::{dead_reckoning, generate, SyntheticScenario};
