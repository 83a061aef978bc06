//! Error types for contention-bench

use std::io;
use thiserror::Error;

/// Top-level benchmark error
#[derive(Error, Debug)]
pub enum BenchmarkError {
    /// Rejected before any worker is spawned
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A worker could not finish its increments
    #[error("Worker {worker_id} failed: {reason}")]
    WorkerFailure { worker_id: usize, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BenchmarkError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub fn worker(worker_id: usize, reason: impl Into<String>) -> Self {
        Self::WorkerFailure {
            worker_id,
            reason: reason.into(),
        }
    }

    pub fn is_invalid_configuration(&self) -> bool {
        matches!(self, Self::InvalidConfiguration(_))
    }

    pub fn is_worker_failure(&self) -> bool {
        matches!(self, Self::WorkerFailure { .. })
    }
}

pub type Result<T> = std::result::Result<T, BenchmarkError>;
