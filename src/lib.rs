//! contention-bench library
//!
//! Shared-counter benchmark comparing unsynchronized, mutex-guarded and
//! batched increments across concurrent worker threads.

pub mod benchmark;
pub mod config;
pub mod metrics;
pub mod utils;

pub use benchmark::{run_benchmark, Orchestrator, RunConfig, RunResult, SharedCounter, Strategy};
pub use utils::{BenchmarkError, Result};
