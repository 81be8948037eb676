use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TftldrError {
    #[error(transparent)]
    Plan(#[from] crate::terraform::PlanError),

    #[error("configuration error in '{}': {message}", .path.display())]
    Config { path: PathBuf, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
