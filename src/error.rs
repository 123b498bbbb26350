use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BenchError>;

#[derive(Debug, Error)]
pub enum BenchError {
    /// The plotting backend could not create or write the figure.
    #[error("failed to render plot to {path}: {message}")]
    Plot { path: PathBuf, message: String },

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The lock under test did not provide mutual exclusion.
    #[error("lock {name} lost updates: expected {expected}, counted {actual}")]
    LostUpdates {
        name: &'static str,
        expected: u64,
        actual: u64,
    },

    #[error("worker thread for lock {name} panicked")]
    WorkerPanicked { name: &'static str },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
