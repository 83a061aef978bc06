//! Counter update strategies

use std::fmt;
use std::hint::black_box;
use std::str::FromStr;

use serde::Serialize;

use super::counter::SharedCounter;
use crate::utils::{BenchmarkError, Result};

/// How a worker applies its increments to the shared counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Strategy {
    /// Read, add one, write back with no synchronization.
    /// Loses updates under contention.
    #[serde(rename = "UNLOCKED")]
    Unlocked,
    /// Take the guard around every single increment
    #[serde(rename = "LOCKED")]
    Locked,
    /// Count locally, then merge once under the guard
    #[serde(rename = "BATCHED")]
    BatchedLocal,
}

impl Strategy {
    /// All strategies in demo order
    pub const ALL: [Strategy; 3] = [Self::Unlocked, Self::Locked, Self::BatchedLocal];

    /// Parse strategy from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "unlocked" | "without_lock" | "without-lock" | "no-lock" => Some(Self::Unlocked),
            "locked" | "with_lock" | "with-lock" | "mutex" => Some(Self::Locked),
            "batched" | "batched-local" | "batched_local" | "improved" => Some(Self::BatchedLocal),
            _ => None,
        }
    }

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unlocked => "UNLOCKED",
            Self::Locked => "LOCKED",
            Self::BatchedLocal => "BATCHED",
        }
    }

    /// Whether the final value is guaranteed to equal the expected total
    pub fn is_exact(&self) -> bool {
        !matches!(self, Self::Unlocked)
    }

    /// Guard acquisitions one worker performs for `increments` updates
    pub fn lock_acquisitions(&self, increments: u64) -> u64 {
        match self {
            Self::Unlocked => 0,
            Self::Locked => increments,
            Self::BatchedLocal => 1,
        }
    }

    /// Apply `increments` updates to `counter` on behalf of `worker_id`.
    ///
    /// Returns the number of guard acquisitions performed.
    pub fn apply(&self, counter: &SharedCounter, increments: u64, worker_id: usize) -> Result<u64> {
        match self {
            Self::Unlocked => {
                for _ in 0..increments {
                    counter.increment_unguarded();
                }
                Ok(0)
            }
            Self::Locked => {
                for _ in 0..increments {
                    counter.lock(worker_id)?.add(1);
                }
                Ok(increments)
            }
            Self::BatchedLocal => {
                let mut local = 0u64;
                for _ in 0..increments {
                    // Keep the per-increment loop instead of folding it to `local = increments`
                    local = black_box(local) + 1;
                }
                counter.lock(worker_id)?.add(local);
                Ok(1)
            }
        }
    }
}

impl FromStr for Strategy {
    type Err = BenchmarkError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            BenchmarkError::invalid(format!(
                "unknown strategy '{}' (expected unlocked, locked or batched)",
                s
            ))
        })
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_strategies() {
        assert_eq!(Strategy::parse("locked"), Some(Strategy::Locked));
        assert_eq!(Strategy::parse("LOCKED"), Some(Strategy::Locked));
        assert_eq!(Strategy::parse("with_lock"), Some(Strategy::Locked));
        assert_eq!(Strategy::parse("without_lock"), Some(Strategy::Unlocked));
        assert_eq!(Strategy::parse("improved"), Some(Strategy::BatchedLocal));
        assert_eq!(Strategy::parse(" batched "), Some(Strategy::BatchedLocal));
        assert_eq!(Strategy::parse("bogus"), None);
        assert_eq!(Strategy::parse(""), None);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        let err = "bogus".parse::<Strategy>().unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn test_single_thread_apply() {
        for strategy in Strategy::ALL {
            let counter = SharedCounter::new();
            let acquisitions = strategy.apply(&counter, 1000, 0).unwrap();
            assert_eq!(counter.value(), 1000, "{}", strategy);
            assert_eq!(acquisitions, strategy.lock_acquisitions(1000));
        }
    }

    #[test]
    fn test_zero_increments() {
        for strategy in Strategy::ALL {
            let counter = SharedCounter::new();
            strategy.apply(&counter, 0, 0).unwrap();
            assert_eq!(counter.value(), 0);
        }
        // The batched merge still happens once
        assert_eq!(Strategy::BatchedLocal.lock_acquisitions(0), 1);
    }

    #[test]
    fn test_is_exact() {
        assert!(!Strategy::Unlocked.is_exact());
        assert!(Strategy::Locked.is_exact());
        assert!(Strategy::BatchedLocal.is_exact());
    }

    #[test]
    fn test_display() {
        assert_eq!(Strategy::Unlocked.to_string(), "UNLOCKED");
        assert_eq!(Strategy::BatchedLocal.to_string(), "BATCHED");
    }

    #[test]
    fn test_serialized_label_matches_display() {
        for strategy in Strategy::ALL {
            let json = serde_json::to_value(strategy).unwrap();
            assert_eq!(json, strategy.as_str());
        }
    }
}
