//! The FLOPs benchmark suite
//!
//! One [`FlopsMicroBenchmark`] per [`FlopType`] plus the baseline loop. Running the
//! suite yields a [`FlopsBenchmarkResults`] from which empirical weights follow.

use std::collections::BTreeMap;

use counted_float_core::{BenchmarkSettings, FlopType, FlopsBenchmarkDurations, FlopsBenchmarkResults, SystemInfo};

use crate::error::Result;
use crate::flops_micro_benchmark::FlopsMicroBenchmark;
use crate::kernels::{baseline, kernel_for};
use crate::micro_benchmark::MicroBenchmark;

/// The baseline benchmark and one benchmark per category, all over the same array size
pub struct FlopsBenchmarkSuite {
    pub baseline: FlopsMicroBenchmark,
    pub flops: BTreeMap<FlopType, FlopsMicroBenchmark>,
}

impl FlopsBenchmarkSuite {
    pub fn get_flops_benchmarking_suite(size: usize) -> Self {
        let flops = FlopType::iter()
            .map(|flop_type| {
                let (label, kernel) = kernel_for(flop_type);
                (flop_type, FlopsMicroBenchmark::new(label, kernel, size))
            })
            .collect();
        Self {
            baseline: FlopsMicroBenchmark::new("baseline", baseline, size),
            flops,
        }
    }

    /// Build the suite for `settings.array_size` and run every benchmark
    pub fn run(settings: &BenchmarkSettings) -> Result<FlopsBenchmarkResults> {
        settings.validate()?;
        let mut suite = Self::get_flops_benchmarking_suite(settings.array_size);

        tracing::info!(
            array_size = settings.array_size,
            n_runs_total = settings.n_runs_total,
            n_runs_warmup = settings.n_runs_warmup,
            n_seconds_per_run_target = settings.n_seconds_per_run_target,
            n_benchmarks = suite.flops.len() + 1,
            "flops_benchmark_suite_started"
        );

        let baseline = suite.baseline.run_many(settings)?.summary_stats()?;
        let mut flops = BTreeMap::new();
        for (flop_type, benchmark) in suite.flops.iter_mut() {
            let stats = benchmark.run_many(settings)?.summary_stats()?;
            tracing::info!(
                flop_type = flop_type.as_str(),
                benchmark = benchmark.name(),
                median_nsec = stats.q50,
                "flop_benchmarked"
            );
            flops.insert(*flop_type, stats);
        }

        tracing::info!(baseline_median_nsec = baseline.q50, "flops_benchmark_suite_complete");
        Ok(FlopsBenchmarkResults {
            system_info: SystemInfo::current(),
            benchmark_settings: *settings,
            results_ns: FlopsBenchmarkDurations { baseline, flops },
        })
    }
}
