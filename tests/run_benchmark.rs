//! End-to-end checks of the counter benchmark guarantees

use std::sync::Arc;
use std::thread;

use clap::Parser;

use contention_bench::benchmark::run_with_counter;
use contention_bench::config::{BenchmarkConfig, CliArgs};
use contention_bench::{run_benchmark, BenchmarkError, RunConfig, SharedCounter, Strategy};

#[test]
fn locked_is_exact_for_two_workers() {
    for _ in 0..3 {
        let result = run_benchmark(2, 100_000, Strategy::Locked).unwrap();
        assert_eq!(result.final_value, 200_000);
    }
}

#[test]
fn batched_is_exact_for_two_workers() {
    for _ in 0..3 {
        let result = run_benchmark(2, 100_000, Strategy::BatchedLocal).unwrap();
        assert_eq!(result.final_value, 200_000);
        assert_eq!(result.lock_acquisitions, 2);
    }
}

#[test]
fn guarded_strategies_are_exact_across_shapes() {
    for workers in [1usize, 2, 3, 8] {
        for increments in [0u64, 1, 17, 2_500] {
            for strategy in [Strategy::Locked, Strategy::BatchedLocal] {
                let result = run_benchmark(workers, increments, strategy).unwrap();
                assert_eq!(
                    result.final_value,
                    workers as u64 * increments,
                    "{} with {} workers x {}",
                    strategy,
                    workers,
                    increments
                );
            }
        }
    }
}

#[test]
fn unlocked_never_exceeds_expected() {
    for workers in [1usize, 2, 4, 8] {
        let result = run_benchmark(workers, 50_000, Strategy::Unlocked).unwrap();
        assert!(result.final_value <= workers as u64 * 50_000);
        assert_eq!(result.lock_acquisitions, 0);
    }
}

#[test]
fn single_worker_strategies_agree() {
    let values: Vec<u64> = Strategy::ALL
        .iter()
        .map(|s| run_benchmark(1, 40_000, *s).unwrap().final_value)
        .collect();
    assert_eq!(values, vec![40_000; 3]);
}

#[test]
fn zero_increments_yield_zero() {
    for workers in [1usize, 2, 5] {
        for strategy in Strategy::ALL {
            let result = run_benchmark(workers, 0, strategy).unwrap();
            assert_eq!(result.final_value, 0);
        }
    }
}

#[test]
fn bogus_strategy_is_rejected_before_running() {
    let err = RunConfig::parse(2, 100, "bogus").unwrap_err();
    assert!(matches!(err, BenchmarkError::InvalidConfiguration(_)));

    // A bogus entry rejects the whole list, so valid strategies never run
    let args = CliArgs::parse_from(["test", "-w", "2", "-n", "100", "-s", "locked,bogus"]);
    let err = BenchmarkConfig::from_cli(&args).unwrap_err();
    assert!(matches!(err, BenchmarkError::InvalidConfiguration(_)));
}

#[test]
fn zero_workers_is_invalid() {
    let err = run_benchmark(0, 100, Strategy::Locked).unwrap_err();
    assert!(err.is_invalid_configuration());
}

#[test]
fn poisoned_guard_surfaces_worker_failure() {
    let counter = Arc::new(SharedCounter::new());
    let c = Arc::clone(&counter);
    let _ = thread::spawn(move || {
        let _section = c.lock(0).unwrap();
        panic!("fault inside critical section");
    })
    .join();

    for strategy in [Strategy::Locked, Strategy::BatchedLocal] {
        let config = RunConfig::new(2, 1_000, strategy).unwrap();
        let err = run_with_counter(&config, Arc::clone(&counter)).unwrap_err();
        assert!(err.is_worker_failure(), "{}: {}", strategy, err);
    }
}

#[test]
fn lock_acquisition_counts() {
    let locked = run_benchmark(3, 1_000, Strategy::Locked).unwrap();
    assert_eq!(locked.lock_acquisitions, 3_000);

    let batched = run_benchmark(3, 1_000, Strategy::BatchedLocal).unwrap();
    assert_eq!(batched.lock_acquisitions, 3);

    let unlocked = run_benchmark(3, 1_000, Strategy::Unlocked).unwrap();
    assert_eq!(unlocked.lock_acquisitions, 0);
}
