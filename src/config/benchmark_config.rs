//! Benchmark configuration derived from CLI arguments

use std::path::PathBuf;

use super::cli::{CliArgs, OutputFormat};
use crate::benchmark::{RunConfig, Strategy};
use crate::utils::{BenchmarkError, Result};

/// Complete benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchmarkConfig {
    // Workload
    pub workers: usize,
    pub increments: u64,
    pub strategies: Vec<Strategy>,
    pub trials: u32,

    // Output
    pub output_path: Option<PathBuf>,
    pub csv_output: Option<PathBuf>,
    pub output_format: OutputFormat,
    pub quiet: bool,
    pub verbose: bool,
}

impl BenchmarkConfig {
    /// Create configuration from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Result<Self> {
        args.validate().map_err(BenchmarkError::InvalidConfiguration)?;

        let strategies = args
            .strategies
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Strategy>())
            .collect::<Result<Vec<_>>>()?;

        let config = Self {
            workers: args.workers,
            increments: args.increments,
            strategies,
            trials: args.trials,

            output_path: args.output.clone(),
            csv_output: args.csv_output.clone(),
            output_format: args.output_format,
            quiet: args.quiet,
            verbose: args.verbose,
        };

        // Surface overflow and worker-count errors before anything runs
        for strategy in &config.strategies {
            config.run_config(*strategy)?;
        }

        Ok(config)
    }

    /// Library configuration: all strategies, one trial, text format.
    ///
    /// Quiet, unlike the CLI default, so embedding callers and tests get no
    /// banner or progress bars.
    pub fn new(workers: usize, increments: u64) -> Self {
        Self {
            workers,
            increments,
            strategies: Strategy::ALL.to_vec(),
            trials: 1,
            output_path: None,
            csv_output: None,
            output_format: OutputFormat::Text,
            quiet: true,
            verbose: false,
        }
    }

    /// Validated per-run parameters for one strategy
    pub fn run_config(&self, strategy: Strategy) -> Result<RunConfig> {
        RunConfig::new(self.workers, self.increments, strategy)
    }

    /// Exact total if no update is lost
    pub fn expected(&self) -> u64 {
        self.workers as u64 * self.increments
    }
}
