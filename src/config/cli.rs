//! Command-line argument parsing

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Measure lost updates and lock overhead on a shared counter
#[derive(Parser, Debug, Clone)]
#[command(name = "contention-bench")]
#[command(version, about, long_about = None)]
pub struct CliArgs {
    // ===== Workload =====
    /// Number of concurrent workers per run
    #[arg(short = 'w', long = "workers", default_value_t = 2)]
    pub workers: usize,

    /// Increments performed by each worker
    #[arg(short = 'n', long = "increments", default_value_t = 100000)]
    pub increments: u64,

    /// Strategies to run, in order (unlocked, locked, batched)
    #[arg(
        short = 's',
        long = "strategies",
        value_delimiter = ',',
        default_values = ["unlocked", "locked", "batched"]
    )]
    pub strategies: Vec<String>,

    /// Runs per strategy
    #[arg(long = "trials", default_value_t = 1)]
    pub trials: u32,

    // ===== Output Options =====
    /// Write JSON report to file
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Write CSV report to file
    #[arg(long = "csv")]
    pub csv_output: Option<PathBuf>,

    /// Format used on stdout
    #[arg(long = "output-format", value_enum, default_value_t = OutputFormat::Text)]
    pub output_format: OutputFormat,

    /// Quiet mode (minimal output)
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Verbose output
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

/// Output format for results
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Csv,
}

impl CliArgs {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate argument combinations
    pub fn validate(&self) -> Result<(), String> {
        if self.workers == 0 {
            return Err("--workers must be at least 1".to_string());
        }

        if self.trials == 0 {
            return Err("--trials must be at least 1".to_string());
        }

        if self.strategies.iter().all(|s| s.trim().is_empty()) {
            return Err("--strategies must name at least one strategy".to_string());
        }

        if self.quiet && self.verbose {
            return Err("--quiet and --verbose are mutually exclusive".to_string());
        }

        Ok(())
    }
}
