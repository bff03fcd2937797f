use clap::Parser;
use std::path::PathBuf;

/// Ranger: range-only EKF localization over recorded or generated runs.
///
/// This struct defines the command-line arguments of the `ranger` binary.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The path to the scenario TOML file to run.
    #[arg(short, long, default_value = "assets/scenarios/default.toml")]
    pub scenario: PathBuf,

    /// Landmark file, overriding `data.world_file`.
    #[arg(long)]
    pub world: Option<PathBuf>,

    /// Sensor log, overriding `data.sensor_file`.
    #[arg(long)]
    pub sensor_data: Option<PathBuf>,

    /// Generate a synthetic run instead of reading the data files.
    #[arg(long, default_value_t = false)]
    pub synthetic: bool,

    /// Seed for the synthetic run, overriding `synthetic.seed`.
    #[arg(long, requires = "synthetic")]
    pub seed: Option<u64>,
}
