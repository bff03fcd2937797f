// ranger_sim/src/runner.rs

//! The outer loop: feeds timesteps to the filter and snapshots to observers.

use ranger_core::prelude::*;
use tracing::{debug, info, warn};

use crate::config::ScenarioConfig;
use crate::error::{Result, SimError};
use crate::io::{read_sensor_data, read_world};
use crate::synthetic::{dead_reckoning, generate};

/// Totals of one run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub steps: usize,
    /// Observations that went into a correction.
    pub fused: usize,
    /// Observations dropped because their landmark is unknown.
    pub skipped: usize,
    pub final_belief: Belief,
    /// Position error of the final belief, when ground truth is known.
    pub final_position_error: Option<f64>,
    /// Mean position error over all timesteps, when ground truth is known.
    pub mean_position_error: Option<f64>,
}

pub struct Runner {
    filter: ExtendedKalmanFilter,
}

impl Runner {
    pub fn new(filter: ExtendedKalmanFilter) -> Self {
        Self { filter }
    }

    /// Runs every record through the filter.
    ///
    /// Observers see the initial belief as timestep 0 and the belief after
    /// record `i` as timestep `i + 1`. `ground_truth`, if given, must hold
    /// `records.len() + 1` poses in the same indexing.
    pub fn run(
        &mut self,
        records: &[TimestepRecord],
        ground_truth: Option<&[Pose]>,
        observers: &mut [&mut dyn BeliefObserver],
    ) -> Result<RunSummary> {
        if let Some(truth) = ground_truth {
            if truth.len() != records.len() + 1 {
                return Err(SimError::InvalidConfig(format!(
                    "ground truth has {} poses for {} timesteps",
                    truth.len(),
                    records.len()
                )));
            }
        }

        info!(
            "Running filter over {} timesteps with {} landmarks",
            records.len(),
            self.filter.landmarks().len()
        );

        for observer in observers.iter_mut() {
            observer.on_start(self.filter.landmarks());
        }
        notify(observers, &BeliefSnapshot::new(0, *self.filter.belief()));

        let mut fused = 0;
        let mut skipped = 0;
        let mut error_sum = 0.0;

        for (i, record) in records.iter().enumerate() {
            let timestep = i + 1;
            let report = self
                .filter
                .step(record)
                .map_err(|source| SimError::Estimation { timestep, source })?;

            fused += report.fused;
            if !report.skipped.is_empty() {
                skipped += report.skipped.len();
                warn!(
                    "Timestep {}: skipped observations of unknown landmarks {:?}",
                    timestep, report.skipped
                );
            }

            let belief = *self.filter.belief();
            if let Some(truth) = ground_truth {
                error_sum += position_error(&belief, &truth[timestep]);
            }
            debug!(
                "Timestep {}: fused {} ranges, trace {:.4}",
                timestep,
                report.fused,
                belief.trace()
            );
            notify(observers, &BeliefSnapshot::new(timestep, belief));
        }

        for observer in observers.iter_mut() {
            observer.on_finish();
        }

        let final_belief = *self.filter.belief();
        let summary = RunSummary {
            steps: records.len(),
            fused,
            skipped,
            final_belief,
            final_position_error: ground_truth
                .and_then(|truth| truth.last())
                .map(|truth| position_error(&final_belief, truth)),
            mean_position_error: ground_truth
                .filter(|_| !records.is_empty())
                .map(|_| error_sum / records.len() as f64),
        };

        info!(
            "Finished: {} timesteps, {} ranges fused, {} skipped, final pose ({:.3}, {:.3}, {:.3})",
            summary.steps,
            summary.fused,
            summary.skipped,
            final_belief.x(),
            final_belief.y(),
            final_belief.theta()
        );
        if let (Some(last), Some(mean)) = (summary.final_position_error, summary.mean_position_error)
        {
            info!("Position error: final {:.3} m, mean {:.3} m", last, mean);
        }

        Ok(summary)
    }
}

fn notify(observers: &mut [&mut dyn BeliefObserver], snapshot: &BeliefSnapshot) {
    for observer in observers.iter_mut() {
        observer.observe(snapshot);
    }
}

/// Where a scenario takes its timesteps from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    /// The world and sensor files named in `[data]`.
    Recorded,
    /// A run generated from `[synthetic]`.
    Synthetic,
}

/// Builds the filter described by `config` and runs it over the chosen data.
///
/// A synthetic run starts the filter at the true start pose with the
/// configured initial variance and also reports the dead-reckoning error
/// for comparison.
pub fn run_scenario(
    config: &ScenarioConfig,
    source: DataSource,
    observers: &mut [&mut dyn BeliefObserver],
) -> Result<RunSummary> {
    match source {
        DataSource::Recorded => {
            let landmarks = read_world(&config.data.world_file)?;
            let records = read_sensor_data(&config.data.sensor_file)?;
            info!(
                "Read {} landmarks from {} and {} timesteps from {}",
                landmarks.len(),
                config.data.world_file.display(),
                records.len(),
                config.data.sensor_file.display()
            );
            Runner::new(config.filter.build_filter(landmarks)).run(&records, None, observers)
        }
        DataSource::Synthetic => {
            let scenario = generate(&config.synthetic)?;
            let mut filter = config.filter.build_filter(scenario.landmarks.clone());
            filter.reset(Belief::with_variance(
                scenario.start(),
                config.filter.initial_variance,
            ));

            let summary = Runner::new(filter).run(
                &scenario.records,
                Some(scenario.ground_truth()),
                observers,
            )?;

            let odometry_only = dead_reckoning(scenario.start(), &scenario.records);
            let truth = scenario.ground_truth();
            if let (Some(last), Some(truth)) = (odometry_only.last(), truth.last()) {
                info!(
                    "Dead reckoning final position error: {:.3} m",
                    (last.xy() - truth.xy()).norm()
                );
            }
            Ok(summary)
        }
    }
}

/// Euclidean distance between the belief mean and a true pose.
pub fn position_error(belief: &Belief, truth: &Pose) -> f64 {
    (belief.mean.xy() - truth.xy()).norm()
}
