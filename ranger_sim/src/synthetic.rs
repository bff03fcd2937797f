// ranger_sim/src/synthetic.rs

//! A seeded scenario generator: landmarks, ground truth and noisy logs.
//!
//! The robot drives a circle around the middle of a square arena. Odometry is
//! the true motion plus Gaussian noise; ranges are taken to every landmark
//! within the sensing radius and perturbed the same way.

use nalgebra::Point2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use ranger_core::prelude::*;
use ranger_core::utils::normalize_angle;
use std::f64::consts::FRAC_PI_2;

use crate::config::SyntheticConfig;
use crate::error::{Result, SimError};

/// A generated run together with the truth it was generated from.
#[derive(Debug, Clone)]
pub struct SyntheticScenario {
    pub landmarks: LandmarkMap,
    pub records: Vec<TimestepRecord>,
    /// True pose before the first step and after each step; `records.len() + 1` entries.
    ground_truth: Vec<Pose>,
}

impl SyntheticScenario {
    pub fn start(&self) -> Pose {
        self.ground_truth[0]
    }

    pub fn ground_truth(&self) -> &[Pose] {
        &self.ground_truth
    }
}

fn normal(std_dev: f64) -> Result<Normal<f64>> {
    Normal::new(0.0, std_dev).map_err(|e| SimError::InvalidConfig(format!("noise {std_dev}: {e}")))
}

/// Builds the deterministic pseudo-random generator used by the scenario.
pub fn scenario_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_entropy(),
    }
}

pub fn generate(config: &SyntheticConfig) -> Result<SyntheticScenario> {
    let size = config.arena_size;
    if !(size.is_finite() && size > 0.0) {
        return Err(SimError::InvalidConfig(format!("arena size {size}")));
    }
    let mut rng = scenario_rng(config.seed);

    let count = u32::try_from(config.landmarks)
        .map_err(|_| SimError::InvalidConfig(format!("{} landmarks", config.landmarks)))?;
    let mut landmarks = LandmarkMap::new();
    for id in 1..=count {
        let position = Point2::new(rng.gen_range(0.0..size), rng.gen_range(0.0..size));
        landmarks
            .insert(LandmarkId(id), position)
            .map_err(|e| SimError::InvalidConfig(e.to_string()))?;
    }

    let odometry_noise = [
        normal(config.odometry_std[0])?,
        normal(config.odometry_std[1])?,
        normal(config.odometry_std[2])?,
    ];
    let range_noise = normal(config.range_std)?;

    // Circle of radius size/3 around the arena center, counter-clockwise.
    let radius = size / 3.0;
    let center = size / 2.0;
    let half_turn = config.step_length / radius / 2.0;

    let mut truth = Pose::new(center + radius, center, FRAC_PI_2);
    let mut ground_truth = Vec::with_capacity(config.steps + 1);
    let mut records = Vec::with_capacity(config.steps);
    ground_truth.push(truth);

    for _ in 0..config.steps {
        let true_u = OdometryDelta::new(half_turn, config.step_length, half_turn);
        truth = advance(&truth, &true_u);
        ground_truth.push(truth);

        let odometry = OdometryDelta::new(
            true_u.rot1 + odometry_noise[0].sample(&mut rng),
            (true_u.trans + odometry_noise[1].sample(&mut rng)).max(0.0),
            true_u.rot2 + odometry_noise[2].sample(&mut rng),
        );

        let observations = landmarks
            .iter()
            .filter_map(|(id, landmark)| {
                let offset = landmark.coords - truth.xy();
                let distance = offset.norm();
                (distance <= config.sensing_range).then(|| {
                    let range = (distance + range_noise.sample(&mut rng)).max(0.0);
                    let bearing = normalize_angle(offset.y.atan2(offset.x) - truth.z);
                    LandmarkObservation::new(id, range, bearing)
                })
            })
            .collect();

        records.push(TimestepRecord::new(odometry, observations));
    }

    Ok(SyntheticScenario {
        landmarks,
        records,
        ground_truth,
    })
}

/// Noise-free motion through the same model the filter predicts with.
fn advance(pose: &Pose, u: &OdometryDelta) -> Pose {
    let mut next = OdometryMotionModel::default().predict_mean(pose, u);
    next.z = normalize_angle(next.z);
    next
}

/// Integrates odometry alone from `start`, the baseline the filter should beat.
pub fn dead_reckoning(start: Pose, records: &[TimestepRecord]) -> Vec<Pose> {
    let mut poses = Vec::with_capacity(records.len() + 1);
    let mut pose = start;
    poses.push(pose);
    for record in records {
        pose = advance(&pose, &record.odometry);
        poses.push(pose);
    }
    poses
}
