//! Generic micro benchmark harness
//!
//! A [`MicroBenchmark`] prepares a workload of `n_operations` and runs it. The
//! harness times each run and, across repeated runs, adapts the operation count
//! so that a single run lasts roughly the requested target duration. The first
//! runs are kept as warmup and left out of the statistics.

use counted_float_core::{BenchmarkSettings, Quantiles};
use counted_float_tracing::performance::{record_benchmark_run, Timer};

use crate::error::{BenchError, Result};

/// Largest factor by which the operation count may grow between two runs
const MAX_GROWTH_PER_RUN: f64 = 100.0;

/// Outcome of one timed run
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SingleRunResult {
    pub n_operations: u64,
    pub t_nsecs: u64,
}

impl SingleRunResult {
    pub fn nsec_per_operation(&self) -> f64 {
        self.t_nsecs as f64 / self.n_operations.max(1) as f64
    }

    pub fn t_secs(&self) -> f64 {
        self.t_nsecs as f64 / 1e9
    }
}

/// All runs of one benchmark, warmup runs kept apart
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MicroBenchmarkResult {
    pub warmup_runs: Vec<SingleRunResult>,
    pub benchmark_runs: Vec<SingleRunResult>,
}

impl MicroBenchmarkResult {
    /// Quantiles of the nanoseconds per operation over the measured runs
    pub fn summary_stats(&self) -> Result<Quantiles> {
        let samples: Vec<f64> = self.benchmark_runs.iter().map(SingleRunResult::nsec_per_operation).collect();
        Ok(Quantiles::from_samples(&samples)?)
    }
}

/// A workload that can be timed for a chosen number of operations
pub trait MicroBenchmark {
    fn name(&self) -> &str;

    /// Set up a run of (about) `n_operations`; returns the count that will actually run
    fn prepare_benchmark(&mut self, n_operations: u64) -> u64;

    /// Execute the prepared workload; only this call is timed
    fn run_benchmark(&mut self);

    fn run_once(&mut self, n_operations: u64) -> Result<SingleRunResult> {
        let n_operations = self.prepare_benchmark(n_operations.max(1));

        let mut timer = Timer::started();
        self.run_benchmark();
        timer.stop();

        let t_nsecs = u64::try_from(timer.elapsed_nsec()?).unwrap_or(u64::MAX);
        record_benchmark_run(self.name(), n_operations, t_nsecs);
        Ok(SingleRunResult { n_operations, t_nsecs })
    }

    /// Run `settings.n_runs_total` times, growing the workload toward the target run duration
    fn run_many(&mut self, settings: &BenchmarkSettings) -> Result<MicroBenchmarkResult> {
        settings.validate()?;

        let mut result = MicroBenchmarkResult::default();
        let mut n_operations: u64 = 1;
        for run in 0..settings.n_runs_total {
            let single = self.run_once(n_operations)?;
            n_operations = next_n_operations(&single, settings.n_seconds_per_run_target);

            if run < settings.n_runs_warmup {
                result.warmup_runs.push(single);
            } else {
                result.benchmark_runs.push(single);
            }
        }

        if result.benchmark_runs.is_empty() {
            return Err(BenchError::NoMeasuredRuns(self.name().to_string()));
        }

        tracing::debug!(
            benchmark = self.name(),
            warmup_runs = result.warmup_runs.len(),
            benchmark_runs = result.benchmark_runs.len(),
            final_n_operations = n_operations,
            "micro_benchmark_complete"
        );
        Ok(result)
    }
}

/// Operation count expected to take `t_target_secs`, based on the previous run
fn next_n_operations(previous: &SingleRunResult, t_target_secs: f64) -> u64 {
    let n = previous.n_operations.max(1) as f64;
    let t = previous.t_secs().max(1e-9);
    let estimate = (n * t_target_secs / t).clamp(1.0, n * MAX_GROWTH_PER_RUN);
    estimate.round() as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nsec_per_operation() {
        let run = SingleRunResult {
            n_operations: 4,
            t_nsecs: 10,
        };
        assert_eq!(run.nsec_per_operation(), 2.5);

        let empty = SingleRunResult {
            n_operations: 0,
            t_nsecs: 10,
        };
        assert_eq!(empty.nsec_per_operation(), 10.0);
    }

    #[test]
    fn test_next_n_operations_targets_duration() {
        let run = SingleRunResult {
            n_operations: 1_000,
            t_nsecs: 1_000_000,
        };
        assert_eq!(next_n_operations(&run, 0.01), 10_000);
        assert_eq!(next_n_operations(&run, 0.0005), 500);
    }

    #[test]
    fn test_next_n_operations_limits_growth() {
        let run = SingleRunResult {
            n_operations: 1,
            t_nsecs: 20,
        };
        assert_eq!(next_n_operations(&run, 0.5), 100);

        let slow = SingleRunResult {
            n_operations: 1,
            t_nsecs: 2_000_000_000,
        };
        assert_eq!(next_n_operations(&slow, 0.5), 1);
    }

    #[test]
    fn test_summary_stats_requires_runs() {
        assert!(MicroBenchmarkResult::default().summary_stats().is_err());
    }

    #[test]
    fn test_summary_stats_over_measured_runs_only() {
        let run = |t_nsecs| SingleRunResult {
            n_operations: 10,
            t_nsecs,
        };
        let result = MicroBenchmarkResult {
            warmup_runs: vec![run(10_000)],
            benchmark_runs: vec![run(10), run(20), run(30), run(40), run(50)],
        };
        let stats = result.summary_stats().unwrap();
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.q50, 3.0);
        assert_eq!(stats.max, 5.0);
    }
}
