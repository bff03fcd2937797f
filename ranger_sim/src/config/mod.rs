// ranger_sim/src/config/mod.rs

//! This module handles loading and validating the scenario configuration
//! from disk and from the environment.

pub mod structs;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use std::path::Path;
use tracing::info;

use crate::error::{Result, SimError};
pub use structs::{DataConfig, FilterConfig, OutputConfig, ScenarioConfig, SyntheticConfig};

/// Prefix of environment variables that override the scenario file.
/// Nested keys are separated by `__`, e.g. `RANGER_FILTER__MEASUREMENT_NOISE=0.3`.
pub const ENV_PREFIX: &str = "RANGER_";

/// Top-level tables of a scenario. Other `RANGER_*` variables are ignored.
const SECTIONS: [&str; 4] = ["filter", "data", "synthetic", "output"];

fn is_scenario_key(key: &str) -> bool {
    key.split_once('.')
        .is_some_and(|(section, _)| SECTIONS.iter().any(|s| section.eq_ignore_ascii_case(s)))
}

impl ScenarioConfig {
    /// Loads a scenario: defaults, then the TOML file, then `RANGER_*` variables.
    /// A missing file is not an error; the defaults are used instead.
    pub fn load(path: &Path) -> Result<Self> {
        info!("Loading scenario from: {}", path.display());
        let config: ScenarioConfig = Figment::from(Serialized::defaults(ScenarioConfig::default()))
            .merge(Toml::file(path))
            .merge(
                Env::prefixed(ENV_PREFIX)
                    .split("__")
                    .filter(|key| is_scenario_key(key.as_str())),
            )
            .extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a scenario from TOML text alone.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: ScenarioConfig =
            toml::from_str(text).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the values serde cannot check on its own.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(SimError::InvalidConfig(msg.to_string()));

        if !(self.filter.initial_variance.is_finite() && self.filter.initial_variance >= 0.0) {
            return invalid("filter.initial_variance must be a finite, non-negative number");
        }
        if self.filter.initial_mean.iter().any(|v| !v.is_finite()) {
            return invalid("filter.initial_mean must be finite");
        }
        if self.output.log_every == 0 {
            return invalid("output.log_every must be at least 1");
        }

        let synthetic = &self.synthetic;
        if synthetic.landmarks == 0 {
            return invalid("synthetic.landmarks must be at least 1");
        }
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(synthetic.arena_size) || !positive(synthetic.sensing_range) {
            return invalid("synthetic.arena_size and synthetic.sensing_range must be positive");
        }
        if !synthetic.step_length.is_finite() || synthetic.step_length < 0.0 {
            return invalid("synthetic.step_length must be non-negative");
        }
        if synthetic
            .odometry_std
            .iter()
            .chain(std::iter::once(&synthetic.range_std))
            .any(|s| !(s.is_finite() && *s >= 0.0))
        {
            return invalid("synthetic noise standard deviations must be finite and non-negative");
        }
        Ok(())
    }
}
