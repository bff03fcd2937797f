// ranger_sim/src/error.rs

use ranger_core::error::EstimationError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading world or sensor logs.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("line {line}: {source}")]
    Landmark {
        line: usize,
        #[source]
        source: EstimationError,
    },
}

impl DataError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }
}

/// Top-level error of the driver.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error("timestep {timestep}: {source}")]
    Estimation {
        timestep: usize,
        #[source]
        source: EstimationError,
    },
}

impl From<figment::Error> for SimError {
    fn from(e: figment::Error) -> Self {
        Self::Config(Box::new(e))
    }
}

pub type Result<T, E = SimError> = std::result::Result<T, E>;
