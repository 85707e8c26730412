use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure of a whole pipeline stage. A stage that returns one of these wrote no output.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("input file {} not found", path.display())]
    MissingInput { path: PathBuf },
    #[error("required column '{0}' is missing")]
    MissingColumn(&'static str),
    #[error("no records available for annotation")]
    EmptySample,
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
