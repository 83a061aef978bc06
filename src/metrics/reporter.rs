//! Metrics reporter - output formatting and export
//!
//! Supports multiple output formats:
//! - Text (one line per run, like the classic demo)
//! - JSON
//! - CSV

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::summary::StrategyReport;
use crate::benchmark::RunResult;
use crate::config::{BenchmarkConfig, OutputFormat};
use crate::utils::Result;

const CSV_HEADER: &str = "strategy,trial,workers,increments,expected,final_value,lost_updates,lock_acquisitions,elapsed_ms";

/// Metrics reporter
pub struct MetricsReporter {
    format: OutputFormat,
}

impl MetricsReporter {
    /// Create new reporter with specified format
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Report every strategy to stdout
    pub fn report(&self, config: &BenchmarkConfig, reports: &[StrategyReport]) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                for report in reports {
                    for run in &report.runs {
                        println!("{}", format_run_line(run));
                    }
                    if report.trials() > 1 {
                        println!("{}", format_summary_line(report));
                    }
                }
            }
            OutputFormat::Json => {
                let json = to_json(config, reports);
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
            OutputFormat::Csv => {
                print!("{}", to_csv(reports));
            }
        }
        Ok(())
    }

    /// Write JSON report to file
    pub fn write_json_file(
        &self,
        path: &Path,
        config: &BenchmarkConfig,
        reports: &[StrategyReport],
    ) -> Result<()> {
        let json = to_json(config, reports);
        let mut file = File::create(path)?;
        writeln!(file, "{}", serde_json::to_string_pretty(&json)?)?;
        Ok(())
    }

    /// Write CSV report to file
    pub fn write_csv_file(&self, path: &Path, reports: &[StrategyReport]) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(to_csv(reports).as_bytes())?;
        Ok(())
    }
}

/// `[LOCKED]     final = 200000 (expected 200000), elapsed 0.012s`
pub fn format_run_line(run: &RunResult) -> String {
    let label = format!("[{}]", run.strategy);
    let mut line = format!(
        "{:<12} final = {} (expected {}), elapsed {:.3}s",
        label,
        run.final_value,
        run.expected(),
        run.elapsed.as_secs_f64()
    );
    if run.lost_updates() > 0 {
        line.push_str(&format!(", lost {}", format_count(run.lost_updates())));
    }
    line
}

pub fn format_summary_line(report: &StrategyReport) -> String {
    let label = format!("[{}]", report.strategy);
    format!(
        "{:<12} {} trials: elapsed (ms) min={:.3} mean={:.3} p50={:.3} max={:.3} | lost avg={:.1}",
        label,
        report.trials(),
        report.min_ms(),
        report.mean_ms(),
        report.percentile_ms(50.0),
        report.max_ms(),
        report.mean_lost_updates()
    )
}

pub fn to_json(config: &BenchmarkConfig, reports: &[StrategyReport]) -> serde_json::Value {
    serde_json::json!({
        "workers": config.workers,
        "increments_per_worker": config.increments,
        "expected": config.expected(),
        "strategies": reports.iter().map(|report| {
            serde_json::json!({
                "strategy": report.strategy,
                "trials": report.trials(),
                "runs": report.runs.iter().map(|run| {
                    serde_json::json!({
                        "final_value": run.final_value,
                        "elapsed_ms": run.elapsed_ms(),
                        "lost_updates": run.lost_updates(),
                        "lock_acquisitions": run.lock_acquisitions,
                    })
                }).collect::<Vec<_>>(),
                "elapsed_ms": {
                    "min": report.min_ms(),
                    "mean": report.mean_ms(),
                    "p50": report.percentile_ms(50.0),
                    "max": report.max_ms(),
                }
            })
        }).collect::<Vec<_>>()
    })
}

pub fn to_csv(reports: &[StrategyReport]) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for report in reports {
        for (trial, run) in report.runs.iter().enumerate() {
            out.push_str(&format!(
                "{},{},{},{},{},{},{},{},{:.3}\n",
                run.strategy,
                trial + 1,
                run.worker_count,
                run.increments_per_worker,
                run.expected(),
                run.final_value,
                run.lost_updates(),
                run.lock_acquisitions,
                run.elapsed_ms()
            ));
        }
    }
    out
}

/// Format large numbers with thousands separators
/// Examples: 1,234,567 or 987,654
pub fn format_count(value: u64) -> String {
    let s = value.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}
