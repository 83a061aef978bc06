//! Benchmark orchestration and workers
//!
//! This module provides the multi-threaded benchmark execution system:
//! - SharedCounter: the counter and its guard, one per run
//! - Strategy: unlocked, locked and batched update procedures
//! - Worker: applies one strategy on its own thread
//! - run_benchmark: spawns, joins and times a single run
//! - Orchestrator: runs every configured strategy over repeated trials

pub mod counter;
pub mod driver;
pub mod orchestrator;
pub mod strategy;
pub mod worker;

pub use counter::{CriticalSection, SharedCounter};
pub use driver::{run_benchmark, run_with_counter, RunConfig, RunResult};
pub use orchestrator::Orchestrator;
pub use strategy::Strategy;
pub use worker::{Worker, WorkerResult};
