use std::path::PathBuf;

use thiserror::Error;

/// Error while decoding a single LAS/LAZ file into points
#[derive(Debug, Error)]
#[error("Could not decode point cloud file {}", .path.display())]
pub struct DecodeError {
    pub path: PathBuf,
    #[source]
    pub source: anyhow::Error,
}

impl DecodeError {
    pub fn new(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self {
            path: path.into(),
            source,
        }
    }
}

/// Errors that abort a conversion run. None of them are retried, the run stops at the first one
#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("No input files given")]
    NoInputs,
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Could not write to output file {}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConvertError {
    pub(crate) fn output(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Output {
            path: path.into(),
            source,
        }
    }
}
