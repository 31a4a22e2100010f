//! Crate-level error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum KinkError {
    #[error("invalid lattice configuration: {0}")]
    InvalidConfig(String),

    #[error("lattice size mismatch: configuration has {expected} nodes, state has {found}")]
    LatticeMismatch { expected: usize, found: usize },

    #[error("invalid heat bath parameters: {0}")]
    InvalidHeatBath(String),

    #[error("pair-count series too short: need {required} frames (tmax_frame + buff_frame), got {found}")]
    InsufficientSeriesLength { required: usize, found: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, KinkError>;
