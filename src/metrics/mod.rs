//! Metrics collection and reporting
//!
//! This module provides:
//! - Per-strategy aggregation over repeated trials
//! - Text, JSON and CSV output

pub mod reporter;
pub mod summary;

pub use reporter::{format_count, MetricsReporter};
pub use summary::StrategyReport;
