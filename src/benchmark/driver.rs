//! Single benchmark run: spawn workers against one counter, join, measure

use std::any::Any;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use super::counter::SharedCounter;
use super::strategy::Strategy;
use super::worker::{Worker, WorkerResult};
use crate::utils::{BenchmarkError, Result};

/// Validated parameters of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunConfig {
    pub worker_count: usize,
    pub increments_per_worker: u64,
    pub strategy: Strategy,
}

impl RunConfig {
    /// Validate and build a run configuration
    pub fn new(
        worker_count: usize,
        increments_per_worker: u64,
        strategy: Strategy,
    ) -> Result<Self> {
        if worker_count == 0 {
            return Err(BenchmarkError::invalid("worker count must be at least 1"));
        }
        if (worker_count as u64)
            .checked_mul(increments_per_worker)
            .is_none()
        {
            return Err(BenchmarkError::invalid(format!(
                "{} workers x {} increments overflows the counter",
                worker_count, increments_per_worker
            )));
        }

        Ok(Self {
            worker_count,
            increments_per_worker,
            strategy,
        })
    }

    /// Build from a strategy name, rejecting unknown names
    pub fn parse(worker_count: usize, increments_per_worker: u64, strategy: &str) -> Result<Self> {
        let strategy = strategy.parse::<Strategy>()?;
        Self::new(worker_count, increments_per_worker, strategy)
    }

    /// Exact total if no update is lost
    pub fn expected(&self) -> u64 {
        self.worker_count as u64 * self.increments_per_worker
    }
}

/// Outcome of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunResult {
    pub strategy: Strategy,
    pub worker_count: usize,
    pub increments_per_worker: u64,
    /// Counter value after every worker joined
    pub final_value: u64,
    /// Wall time from first spawn to last join
    pub elapsed: Duration,
    /// Guard acquisitions summed over all workers
    pub lock_acquisitions: u64,
}

impl RunResult {
    pub fn expected(&self) -> u64 {
        self.worker_count as u64 * self.increments_per_worker
    }

    /// Increments that never made it into the counter
    pub fn lost_updates(&self) -> u64 {
        self.expected().saturating_sub(self.final_value)
    }

    pub fn is_exact(&self) -> bool {
        self.final_value == self.expected()
    }

    pub fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }
}

/// Run `worker_count` workers, each applying `increments_per_worker`
/// updates with `strategy`, against a fresh counter.
pub fn run_benchmark(
    worker_count: usize,
    increments_per_worker: u64,
    strategy: Strategy,
) -> Result<RunResult> {
    let config = RunConfig::new(worker_count, increments_per_worker, strategy)?;
    run_with_counter(&config, Arc::new(SharedCounter::new()))
}

/// Run against a caller-provided counter.
///
/// The counter is reset first. It must not be shared with another run in
/// flight.
pub fn run_with_counter(config: &RunConfig, counter: Arc<SharedCounter>) -> Result<RunResult> {
    counter.reset();

    let mut handles: Vec<(usize, thread::JoinHandle<Result<WorkerResult>>)> =
        Vec::with_capacity(config.worker_count);
    let mut spawn_error = None;

    let start_time = Instant::now();

    for worker_id in 0..config.worker_count {
        let worker = Worker::new(
            worker_id,
            config.strategy,
            config.increments_per_worker,
            Arc::clone(&counter),
        );

        let spawned = thread::Builder::new()
            .name(format!("counter-worker-{}", worker_id))
            .spawn(move || worker.run());

        match spawned {
            Ok(handle) => handles.push((worker_id, handle)),
            Err(e) => {
                spawn_error = Some(BenchmarkError::worker(
                    worker_id,
                    format!("failed to spawn thread: {}", e),
                ));
                break;
            }
        }
    }

    // Join every spawned worker before looking at the counter or failing
    let mut first_failure = None;
    let mut lock_acquisitions = 0u64;

    for (worker_id, handle) in handles {
        let outcome = handle
            .join()
            .unwrap_or_else(|panic| Err(BenchmarkError::worker(worker_id, panic_reason(&*panic))));

        match outcome {
            Ok(result) => lock_acquisitions += result.lock_acquisitions,
            Err(e) if first_failure.is_none() => first_failure = Some(e),
            Err(e) => warn!("Additional worker failure: {}", e),
        }
    }

    let elapsed = start_time.elapsed();

    if let Some(e) = first_failure.or(spawn_error) {
        return Err(e);
    }

    let final_value = counter.value();
    debug!(
        "{}: final={} expected={} in {:?}",
        config.strategy,
        final_value,
        config.expected(),
        elapsed
    );

    Ok(RunResult {
        strategy: config.strategy,
        worker_count: config.worker_count,
        increments_per_worker: config.increments_per_worker,
        final_value,
        elapsed,
        lock_acquisitions,
    })
}

fn panic_reason(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        format!("worker panicked: {}", s)
    } else if let Some(s) = panic.downcast_ref::<String>() {
        format!("worker panicked: {}", s)
    } else {
        "worker panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_config_validation() {
        assert!(RunConfig::new(1, 0, Strategy::Locked).is_ok());
        assert!(RunConfig::new(0, 10, Strategy::Locked)
            .unwrap_err()
            .is_invalid_configuration());
        assert!(RunConfig::new(2, u64::MAX, Strategy::Locked)
            .unwrap_err()
            .is_invalid_configuration());
        assert!(RunConfig::parse(2, 100, "bogus")
            .unwrap_err()
            .is_invalid_configuration());
        assert_eq!(
            RunConfig::parse(2, 100, "improved").unwrap().strategy,
            Strategy::BatchedLocal
        );
    }

    #[test]
    fn test_expected() {
        let config = RunConfig::new(4, 250, Strategy::Locked).unwrap();
        assert_eq!(config.expected(), 1000);
    }

    #[test]
    fn test_locked_exact() {
        let result = run_benchmark(4, 5_000, Strategy::Locked).unwrap();
        assert_eq!(result.final_value, 20_000);
        assert_eq!(result.lock_acquisitions, 20_000);
        assert!(result.is_exact());
        assert_eq!(result.lost_updates(), 0);
    }

    #[test]
    fn test_batched_exact() {
        let result = run_benchmark(4, 5_000, Strategy::BatchedLocal).unwrap();
        assert_eq!(result.final_value, 20_000);
        assert_eq!(result.lock_acquisitions, 4);
    }

    #[test]
    fn test_unlocked_upper_bound() {
        let result = run_benchmark(4, 5_000, Strategy::Unlocked).unwrap();
        assert!(result.final_value <= 20_000);
        assert_eq!(result.lost_updates(), 20_000 - result.final_value);
        assert_eq!(result.lock_acquisitions, 0);
    }

    #[test]
    fn test_counter_reset_between_runs() {
        let counter = Arc::new(SharedCounter::new());
        let config = RunConfig::new(2, 100, Strategy::Locked).unwrap();

        run_with_counter(&config, Arc::clone(&counter)).unwrap();
        let second = run_with_counter(&config, Arc::clone(&counter)).unwrap();
        assert_eq!(second.final_value, 200);
    }

    #[test]
    fn test_poisoned_guard_fails_run() {
        let counter = Arc::new(SharedCounter::new());
        let c = Arc::clone(&counter);
        let _ = thread::spawn(move || {
            let _section = c.lock(0).unwrap();
            panic!("poison the guard");
        })
        .join();

        let config = RunConfig::new(3, 10, Strategy::Locked).unwrap();
        let err = run_with_counter(&config, counter).unwrap_err();
        match err {
            BenchmarkError::WorkerFailure { worker_id, .. } => assert_eq!(worker_id, 0),
            other => panic!("expected WorkerFailure, got {}", other),
        }
    }

    #[test]
    fn test_panic_reason() {
        let boxed: Box<dyn Any + Send> = Box::new("boom");
        assert_eq!(panic_reason(boxed.as_ref()), "worker panicked: boom");
        let boxed: Box<dyn Any + Send> = Box::new(String::from("bang"));
        assert_eq!(panic_reason(boxed.as_ref()), "worker panicked: bang");
        let boxed: Box<dyn Any + Send> = Box::new(42u32);
        assert_eq!(panic_reason(boxed.as_ref()), "worker panicked");
    }
}
