//! Benchmark orchestrator
//!
//! Runs every configured strategy for the configured number of trials and
//! collects the results per strategy.

use std::path::Path;
use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

use super::counter::SharedCounter;
use super::driver::run_with_counter;
use super::strategy::Strategy;
use crate::config::BenchmarkConfig;
use crate::metrics::{MetricsReporter, StrategyReport};
use crate::utils::{BenchmarkError, Result};

/// Benchmark orchestrator
pub struct Orchestrator {
    config: BenchmarkConfig,
}

impl Orchestrator {
    /// Create new orchestrator, rejecting configurations that cannot run
    pub fn new(config: BenchmarkConfig) -> Result<Self> {
        for strategy in &config.strategies {
            config.run_config(*strategy)?;
        }
        if config.trials == 0 {
            return Err(BenchmarkError::invalid("trials must be at least 1"));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &BenchmarkConfig {
        &self.config
    }

    fn progress_bar(&self, strategy: Strategy) -> Option<ProgressBar> {
        if self.config.quiet || self.config.trials <= 1 {
            return None;
        }

        let pb = ProgressBar::new(self.config.trials as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .map(|s| s.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        pb.set_style(style);
        pb.set_message(strategy.to_string());
        Some(pb)
    }

    /// Run one strategy for every trial
    pub fn run_strategy(&self, strategy: Strategy) -> Result<StrategyReport> {
        let run_config = self.config.run_config(strategy)?;
        let mut report = StrategyReport::new(strategy);
        let progress = self.progress_bar(strategy);

        // Each trial gets its own counter
        for trial in 0..self.config.trials {
            let result = match run_with_counter(&run_config, Arc::new(SharedCounter::new())) {
                Ok(result) => result,
                Err(e) => {
                    if let Some(ref pb) = progress {
                        pb.abandon_with_message(format!("{} failed", strategy));
                    }
                    return Err(e);
                }
            };

            info!(
                "{} trial {}: final={} expected={} elapsed={:.3}ms",
                strategy,
                trial + 1,
                result.final_value,
                result.expected(),
                result.elapsed_ms()
            );

            report.record(result);
            if let Some(ref pb) = progress {
                pb.inc(1);
            }
        }

        if let Some(pb) = progress {
            pb.finish_with_message(format!("{} done", strategy));
        }

        Ok(report)
    }

    /// Run all configured strategies in order
    pub fn run_all(&self) -> Result<Vec<StrategyReport>> {
        let mut reports = Vec::with_capacity(self.config.strategies.len());

        for strategy in &self.config.strategies {
            info!(
                "Running {}: {} workers x {} increments, {} trial(s)",
                strategy, self.config.workers, self.config.increments, self.config.trials
            );
            reports.push(self.run_strategy(*strategy)?);
        }

        Ok(reports)
    }

    /// Export results to JSON file
    pub fn export_json(&self, reports: &[StrategyReport], path: &Path) -> Result<()> {
        MetricsReporter::new(self.config.output_format)
            .write_json_file(path, &self.config, reports)
    }

    /// Export results to CSV file
    pub fn export_csv(&self, reports: &[StrategyReport], path: &Path) -> Result<()> {
        MetricsReporter::new(self.config.output_format)
            .write_csv_file(path, reports)
    }
}
