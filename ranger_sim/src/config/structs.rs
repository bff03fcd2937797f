// ranger_sim/src/config/structs.rs

use nalgebra::Vector3;
use ranger_core::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

// =========================================================================
// == Top-Level Configuration ==
// =========================================================================

/// # ScenarioConfig
/// The root of the data parsed from a `scenario.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)] // Fail if the TOML has fields not in our struct
pub struct ScenarioConfig {
    #[serde(default)] // Use default if the [filter] section is missing
    pub filter: FilterConfig,

    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub synthetic: SyntheticConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

// =========================================================================
// == Configuration Sub-Structs ==
// These map directly to the sections in a scenario.toml file.
// =========================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    /// Variances of `(rot1, trans, rot2)`.
    pub process_noise: ProcessNoise,
    /// Variance of a single range reading.
    pub measurement_noise: MeasurementNoise,
    /// Starting pose `[x, y, theta]`.
    pub initial_mean: [f64; 3],
    /// Starting covariance is this value times the identity.
    pub initial_variance: f64,
    pub heading_mode: HeadingMode,
    pub covariance_update: CovarianceUpdate,
    pub unknown_landmarks: UnknownLandmarkPolicy,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            process_noise: ProcessNoise::default(),
            measurement_noise: MeasurementNoise::default(),
            initial_mean: [0.0; 3],
            initial_variance: 1.0,
            heading_mode: HeadingMode::default(),
            covariance_update: CovarianceUpdate::default(),
            unknown_landmarks: UnknownLandmarkPolicy::default(),
        }
    }
}

impl FilterConfig {
    pub fn initial_belief(&self) -> Belief {
        Belief::with_variance(Vector3::from(self.initial_mean), self.initial_variance)
    }

    /// Builds a filter over `landmarks` from this configuration.
    pub fn build_filter(&self, landmarks: LandmarkMap) -> ExtendedKalmanFilter {
        let motion = OdometryMotionModel::new(self.process_noise);
        let measurement = RangeMeasurementModel::new(self.measurement_noise)
            .with_covariance_update(self.covariance_update);

        ExtendedKalmanFilter::new(
            self.initial_belief(),
            Box::new(motion),
            Box::new(measurement),
            landmarks,
        )
        .with_heading_mode(self.heading_mode)
        .with_unknown_landmarks(self.unknown_landmarks)
    }
}

/// Where the recorded run lives on disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    /// Landmark file, one `id x y` per line.
    pub world_file: PathBuf,
    /// Sensor log with `ODOMETRY` and `SENSOR` lines.
    pub sensor_file: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            world_file: "assets/data/world.dat".into(),
            sensor_file: "assets/data/sensor_data.dat".into(),
        }
    }
}

/// Parameters of the generated scenario used by `--synthetic`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyntheticConfig {
    /// Optional seed for the pseudo-random number generator for determinism.
    pub seed: Option<u64>,
    /// Number of timesteps to generate.
    pub steps: usize,
    /// Number of landmarks scattered over the arena.
    pub landmarks: usize,
    /// Side length of the square arena, in meters.
    pub arena_size: f64,
    /// Landmarks farther than this are not observed.
    pub sensing_range: f64,
    /// Commanded distance per timestep.
    pub step_length: f64,
    /// Standard deviations of the odometry error on `(rot1, trans, rot2)`.
    pub odometry_std: [f64; 3],
    /// Standard deviation of the range error.
    pub range_std: f64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            seed: None,
            steps: 300,
            landmarks: 9,
            arena_size: 10.0,
            sensing_range: 5.0,
            step_length: 0.1,
            odometry_std: [0.01, 0.02, 0.01],
            range_std: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Log the belief at info level every this many timesteps.
    pub log_every: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { log_every: 50 }
    }
}
