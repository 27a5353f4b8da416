use std::{fmt, path::PathBuf};

use thiserror::Error;

/// Which of the two compared point clouds a value refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CloudSide {
    /// The reconstructed point cloud
    Source,
    /// The ground truth point cloud
    Target,
}

impl fmt::Display for CloudSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CloudSide::Source => write!(f, "source"),
            CloudSide::Target => write!(f, "target"),
        }
    }
}

/// Errors that abort an evaluation run
#[derive(Debug, Error)]
pub enum EvalError {
    /// The input file is not in a supported point cloud format
    #[error("{} is not a '.ply' file", .0.display())]
    InvalidFormat(PathBuf),
    /// A mask or plane file is missing or lacks an expected variable
    #[error("Missing mask data in {}: {details}", .path.display())]
    MissingMaskData { path: PathBuf, details: String },
    /// No point of one cloud survived filtering and outlier removal, so no metric is defined for it
    #[error("No valid {0} points remain after filtering, metrics are undefined")]
    EmptyValidSet(CloudSide),
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

pub type EvalResult<T> = Result<T, EvalError>;
