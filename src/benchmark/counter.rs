//! Shared counter state for a single benchmark run
//!
//! The counter value lives in an `AtomicU64` so that the unsynchronized path
//! can read and write it without undefined behaviour. The read and the write
//! are separate operations though, so an unguarded increment is a plain
//! read-modify-write that loses updates under contention. The guarded paths
//! do the same load/store pair while holding `guard`.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::utils::{BenchmarkError, Result};

/// Counter plus the mutex that is supposed to protect it
#[derive(Debug, Default)]
pub struct SharedCounter {
    value: AtomicU64,
    guard: Mutex<()>,
}

impl SharedCounter {
    /// Create a counter starting at zero
    pub fn new() -> Self {
        Self {
            value: AtomicU64::new(0),
            guard: Mutex::new(()),
        }
    }

    /// Read the current value
    #[inline]
    pub fn value(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Reset the value to zero (between runs, never during one)
    pub fn reset(&self) {
        self.value.store(0, Ordering::SeqCst);
    }

    /// Increment without taking the guard.
    ///
    /// Load and store are individually atomic, the pair is not.
    #[inline]
    pub fn increment_unguarded(&self) {
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current.wrapping_add(1), Ordering::Relaxed);
    }

    /// Acquire the guard for the given worker.
    ///
    /// The returned guard is the critical section; dropping it releases the
    /// lock on every exit path, unwinding included.
    pub fn lock(&self, worker_id: usize) -> Result<CriticalSection<'_>> {
        let guard = self
            .guard
            .lock()
            .map_err(|_| BenchmarkError::worker(worker_id, "counter guard is poisoned"))?;
        Ok(CriticalSection {
            value: &self.value,
            _guard: guard,
        })
    }
}

/// Exclusive access to the counter value while the guard is held
pub struct CriticalSection<'a> {
    value: &'a AtomicU64,
    _guard: MutexGuard<'a, ()>,
}

impl CriticalSection<'_> {
    /// Read-modify-write `value += amount`
    #[inline]
    pub fn add(&mut self, amount: u64) {
        // The mutex orders these accesses, relaxed is enough here.
        let current = self.value.load(Ordering::Relaxed);
        self.value.store(current + amount, Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> u64 {
        self.value.load(Ordering::Relaxed)
    }
}
