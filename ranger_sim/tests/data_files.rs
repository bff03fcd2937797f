// ranger_sim/tests/data_files.rs

use ranger_sim::io::{read_sensor_data, read_world};
use ranger_sim::prelude::*;
use std::path::{Path, PathBuf};

fn asset(relative: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join(relative)
}

#[test]
fn bundled_logs_reference_known_landmarks() {
    let landmarks = read_world(&asset("assets/data/world.dat")).unwrap();
    let records = read_sensor_data(&asset("assets/data/sensor_data.dat")).unwrap();

    assert_eq!(landmarks.len(), 9);
    assert_eq!(records.len(), 36);
    for record in &records {
        for obs in &record.observations {
            assert!(landmarks.contains(obs.landmark_id), "{}", obs.landmark_id);
        }
    }
}

#[test]
fn recorded_scenario_runs_end_to_end() {
    let mut config = ScenarioConfig::load(&asset("assets/scenarios/default.toml")).unwrap();
    config.data.world_file = asset("assets/data/world.dat");
    config.data.sensor_file = asset("assets/data/sensor_data.dat");

    let mut recorder = TrajectoryRecorder::default();
    let summary = run_scenario(
        &config,
        DataSource::Recorded,
        &mut [&mut recorder as &mut dyn BeliefObserver],
    )
    .unwrap();

    assert_eq!(summary.steps, 36);
    assert_eq!(recorder.snapshots().len(), 37);
    assert!(recorder.is_finished());
    assert_eq!(summary.final_position_error, None);
    // The log was recorded along a path ending near (-0.34, -1.23).
    let end = Pose::new(-0.344, -1.228, 0.0);
    assert!(position_error(&summary.final_belief, &end) < 0.25);
    assert!(summary.final_belief.trace() < Belief::default().trace());
}

#[test]
fn missing_files_are_reported_with_their_path() {
    let mut config = ScenarioConfig::default();
    config.data.world_file = asset("assets/data/does_not_exist.dat");

    let err = run_scenario(&config, DataSource::Recorded, &mut []).unwrap_err();
    assert!(matches!(err, SimError::Data(DataError::Io { .. })));
    assert!(err.to_string().contains("does_not_exist.dat"));
}
