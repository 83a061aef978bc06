//! Per-strategy aggregation over repeated trials

use hdrhistogram::Histogram;

use crate::benchmark::{RunResult, Strategy};

/// Upper bound for recorded elapsed time: one hour in microseconds
const MAX_ELAPSED_US: u64 = 3_600_000_000;

/// All runs of one strategy plus their elapsed-time distribution
pub struct StrategyReport {
    pub strategy: Strategy,
    /// Individual runs in trial order
    pub runs: Vec<RunResult>,
    /// Elapsed time per run, in microseconds
    pub histogram: Histogram<u64>,
}

impl StrategyReport {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            runs: Vec::new(),
            histogram: Histogram::new_with_bounds(1, MAX_ELAPSED_US, 3)
                .expect("Failed to create histogram"),
        }
    }

    /// Add one finished run
    pub fn record(&mut self, run: RunResult) {
        let elapsed_us = (run.elapsed.as_micros() as u64).max(1);
        self.histogram.saturating_record(elapsed_us);
        self.runs.push(run);
    }

    pub fn trials(&self) -> usize {
        self.runs.len()
    }

    /// Total every run should have reached
    pub fn expected(&self) -> u64 {
        self.runs.first().map(|r| r.expected()).unwrap_or(0)
    }

    /// True if no run lost an update
    pub fn all_exact(&self) -> bool {
        self.runs.iter().all(|r| r.is_exact())
    }

    pub fn mean_lost_updates(&self) -> f64 {
        if self.runs.is_empty() {
            return 0.0;
        }
        let total: u64 = self.runs.iter().map(|r| r.lost_updates()).sum();
        total as f64 / self.runs.len() as f64
    }

    pub fn mean_ms(&self) -> f64 {
        self.histogram.mean() / 1000.0
    }

    pub fn min_ms(&self) -> f64 {
        self.histogram.min() as f64 / 1000.0
    }

    pub fn max_ms(&self) -> f64 {
        self.histogram.max() as f64 / 1000.0
    }

    pub fn percentile_ms(&self, p: f64) -> f64 {
        self.histogram.value_at_percentile(p) as f64 / 1000.0
    }
}
