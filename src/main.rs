//! contention-bench - lost updates versus lock overhead on a shared counter
//!
//! Runs each update strategy with the same worker and increment counts and
//! prints the final counter value against the expected total.

use anyhow::{Context, Result};
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use contention_bench::config::{BenchmarkConfig, CliArgs, OutputFormat};
use contention_bench::metrics::MetricsReporter;
use contention_bench::Orchestrator;

fn setup_logging(verbose: bool, quiet: bool) {
    let level = if quiet {
        Level::ERROR
    } else if verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn print_banner(config: &BenchmarkConfig) {
    if config.quiet || config.output_format != OutputFormat::Text {
        return;
    }

    println!("contention-bench v{}", env!("CARGO_PKG_VERSION"));
    println!("====================================");
    println!(
        "Workers: {}, Increments per worker: {}, Expected: {}",
        config.workers,
        config.increments,
        config.expected()
    );
    println!(
        "Strategies: {}, Trials: {}",
        config
            .strategies
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", "),
        config.trials
    );
    println!("====================================\n");
}

fn run() -> Result<()> {
    let args = CliArgs::parse_args();

    setup_logging(args.verbose, args.quiet);

    let config = BenchmarkConfig::from_cli(&args).context("Configuration error")?;

    print_banner(&config);

    let orchestrator = Orchestrator::new(config.clone())?;
    let reports = orchestrator.run_all().context("Benchmark failed")?;

    MetricsReporter::new(config.output_format).report(&config, &reports)?;

    if let Some(ref output_path) = config.output_path {
        info!("Writing results to: {:?}", output_path);
        orchestrator
            .export_json(&reports, output_path)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
    }

    if let Some(ref csv_path) = config.csv_output {
        info!("Writing CSV to: {:?}", csv_path);
        orchestrator
            .export_csv(&reports, csv_path)
            .with_context(|| format!("Failed to write {}", csv_path.display()))?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        error!("Error: {:#}", e);
        std::process::exit(1);
    }
}
