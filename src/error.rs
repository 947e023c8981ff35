//! Error type shared by the configuration, analysis and report layers.
//!
//! The sampling core itself never returns errors: a remove attempt on an
//! empty diagram is a driver bug and panics.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed configuration: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write table: {0}")]
    Csv(#[from] csv::Error),

    /// Every rejected parameter, one message each.
    #[error("invalid simulation parameters:\n{}", .0.join("\n"))]
    InvalidParameters(Vec<String>),

    #[error("cannot analyse an empty sample")]
    EmptySample,
}

pub type Result<T> = std::result::Result<T, Error>;
