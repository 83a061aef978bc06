//! Benchmark worker thread implementation
//!
//! Each worker shares one `SharedCounter` with its siblings and applies a
//! fixed number of increments using a single strategy. Failures are returned
//! to the driver, never swallowed: a skipped increment would make the final
//! value meaningless.

use std::sync::Arc;

use tracing::debug;

use super::counter::SharedCounter;
use super::strategy::Strategy;
use crate::utils::Result;

/// Result from a worker thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerResult {
    /// Worker ID
    pub worker_id: usize,
    /// Increments applied
    pub increments: u64,
    /// Guard acquisitions performed
    pub lock_acquisitions: u64,
}

/// A single counter-incrementing worker
pub struct Worker {
    worker_id: usize,
    strategy: Strategy,
    increments: u64,
    counter: Arc<SharedCounter>,
}

impl Worker {
    pub fn new(
        worker_id: usize,
        strategy: Strategy,
        increments: u64,
        counter: Arc<SharedCounter>,
    ) -> Self {
        Self {
            worker_id,
            strategy,
            increments,
            counter,
        }
    }

    pub fn worker_id(&self) -> usize {
        self.worker_id
    }

    /// Run all increments to completion
    pub fn run(self) -> Result<WorkerResult> {
        debug!(
            "Worker {}: {} x {} starting",
            self.worker_id, self.strategy, self.increments
        );

        let lock_acquisitions = self
            .strategy
            .apply(&self.counter, self.increments, self.worker_id)?;

        debug!(
            "Worker {}: done ({} lock acquisitions)",
            self.worker_id, lock_acquisitions
        );

        Ok(WorkerResult {
            worker_id: self.worker_id,
            increments: self.increments,
            lock_acquisitions,
        })
    }
}
