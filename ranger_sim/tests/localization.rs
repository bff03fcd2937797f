// ranger_sim/tests/localization.rs

use ranger_core::estimation::ekf::asymmetry;
use ranger_sim::prelude::*;

fn synthetic_config() -> ScenarioConfig {
    ScenarioConfig::from_toml_str(include_str!("../assets/scenarios/synthetic.toml"))
        .expect("bundled synthetic scenario should parse")
}

fn mean_error(estimates: &[Pose], truth: &[Pose]) -> f64 {
    let total: f64 = estimates
        .iter()
        .zip(truth)
        .map(|(e, t)| (e.xy() - t.xy()).norm())
        .sum();
    total / estimates.len() as f64
}

#[test]
fn filter_beats_dead_reckoning_on_a_seeded_run() {
    let config = synthetic_config();
    let scenario = generate(&config.synthetic).unwrap();

    let mut recorder = TrajectoryRecorder::default();
    let summary = run_scenario(
        &config,
        DataSource::Synthetic,
        &mut [&mut recorder as &mut dyn BeliefObserver],
    )
    .unwrap();

    assert_eq!(summary.steps, config.synthetic.steps);
    assert_eq!(summary.skipped, 0);
    assert!(summary.fused > 0);

    let filtered = recorder.poses();
    let odometry_only = dead_reckoning(scenario.start(), &scenario.records);
    assert_eq!(filtered.len(), scenario.ground_truth().len());

    let filter_error = mean_error(&filtered, scenario.ground_truth());
    let reckoning_error = mean_error(&odometry_only, scenario.ground_truth());
    assert!(
        filter_error < reckoning_error,
        "filter {filter_error:.3} m vs dead reckoning {reckoning_error:.3} m"
    );
    assert!(summary.final_position_error.unwrap() < 1.0);
}

#[test]
fn covariance_stays_symmetric_and_positive() {
    let config = synthetic_config();
    let mut recorder = TrajectoryRecorder::default();
    run_scenario(
        &config,
        DataSource::Synthetic,
        &mut [&mut recorder as &mut dyn BeliefObserver],
    )
    .unwrap();

    for snapshot in recorder.snapshots() {
        let covariance = &snapshot.belief.covariance;
        assert!(asymmetry(covariance) < 1e-9, "t={}", snapshot.timestep);
        assert!(covariance.diagonal().iter().all(|v| *v > 0.0));
        assert!(snapshot.ellipse.width >= snapshot.ellipse.height);
        assert!(snapshot.belief.theta().abs() <= std::f64::consts::PI);
    }
}

#[test]
fn same_seed_gives_the_same_estimate() {
    let config = synthetic_config();
    let a = run_scenario(&config, DataSource::Synthetic, &mut []).unwrap();
    let b = run_scenario(&config, DataSource::Synthetic, &mut []).unwrap();
    assert_eq!(a, b);
}
