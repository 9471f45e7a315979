//! Benchmark every floating-point operation category on this machine
//!
//! Prints a summary table and the derived weights; optionally writes the full
//! results and the weights as JSON.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use counted_float_bench::FlopsBenchmarkSuite;
use counted_float_core::BenchmarkSettings;
use counted_float_tracing::{init_global_tracing, TracingConfig};

#[derive(Debug, Parser)]
#[command(name = "flops-benchmark")]
#[command(about = "Measure per-operation floating-point costs and derive FLOP weights")]
struct Args {
    /// Length of the input and output arrays
    #[arg(long, default_value_t = 1000)]
    array_size: usize,

    /// Runs per benchmark, warmup included
    #[arg(long, default_value_t = 30)]
    n_runs_total: usize,

    /// Leading runs excluded from the statistics
    #[arg(long, default_value_t = 10)]
    n_runs_warmup: usize,

    /// Target duration of a single run, in seconds
    #[arg(long, default_value_t = 0.5)]
    n_seconds_per_run_target: f64,

    /// Write the full benchmark results to this JSON file
    #[arg(long)]
    results_json: Option<PathBuf>,

    /// Write the derived weights to this JSON file
    #[arg(long)]
    weights_json: Option<PathBuf>,

    /// Round the derived weights to integers
    #[arg(long)]
    rounded: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    init_global_tracing(&TracingConfig::from_env().with_verbosity(args.verbose))?;

    let settings = BenchmarkSettings {
        array_size: args.array_size,
        n_runs_total: args.n_runs_total,
        n_runs_warmup: args.n_runs_warmup,
        n_seconds_per_run_target: args.n_seconds_per_run_target,
    };
    settings.validate()?;

    let results = FlopsBenchmarkSuite::run(&settings)?;
    println!("{}", results.summary());

    let weights = results.flop_weights()?;
    let weights = if args.rounded { weights.round() } else { weights };
    println!("{weights}");

    if let Some(path) = &args.results_json {
        fs::write(path, results.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), "benchmark_results_written");
    }
    if let Some(path) = &args.weights_json {
        fs::write(path, weights.to_json_pretty()?)?;
        tracing::info!(path = %path.display(), "flop_weights_written");
    }

    Ok(())
}
