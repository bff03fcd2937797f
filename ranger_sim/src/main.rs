// ranger_sim/src/main.rs

//! Runs one localization scenario from the command line.
//!
//! `cargo run --bin ranger -- --scenario assets/scenarios/default.toml`
//! `cargo run --bin ranger -- --synthetic --seed 7`
//!
//! Log verbosity follows `RUST_LOG`, defaulting to `ranger=info,ranger_sim=info`.

use clap::Parser;
use ranger_sim::cli::Cli;
use ranger_sim::prelude::*;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("ranger=info,ranger_sim=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<RunSummary, SimError> {
    let mut config = ScenarioConfig::load(&cli.scenario)?;

    // Command-line flags win over the scenario file and the environment.
    if let Some(world) = &cli.world {
        config.data.world_file = world.clone();
    }
    if let Some(sensor_data) = &cli.sensor_data {
        config.data.sensor_file = sensor_data.clone();
    }
    if cli.seed.is_some() {
        config.synthetic.seed = cli.seed;
    }

    let source = if cli.synthetic {
        DataSource::Synthetic
    } else {
        DataSource::Recorded
    };

    let mut logger = TracingObserver::new(config.output.log_every);
    run_scenario(&config, source, &mut [&mut logger as &mut dyn BeliefObserver])
}
