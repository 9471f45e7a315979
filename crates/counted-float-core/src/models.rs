//! Serializable result models
//!
//! These types describe benchmark measurements and instruction latency tables.
//! Both can be turned into a [`FlopWeights`] table, which is how the default
//! weights are derived from the built-in reference data.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use counted_float_tracing::performance::format_time_durations;

use crate::error::{CountingError, Result};
use crate::flop_type::FlopType;
use crate::flop_weights::FlopWeights;

/// Smallest net duration (ns) attributed to one operation after baseline subtraction
pub const MIN_NET_NSEC: f64 = 1e-3;

// ================================================================================================
// Quantiles
// ================================================================================================

/// Five-number summary of a sample
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Quantiles {
    pub min: f64,
    pub q25: f64,
    pub q50: f64,
    pub q75: f64,
    pub max: f64,
}

impl Quantiles {
    /// Summarize `samples` using linear interpolation between order statistics
    pub fn from_samples(samples: &[f64]) -> Result<Self> {
        if samples.is_empty() {
            return Err(CountingError::invalid_data("Quantiles", "cannot summarize an empty sample"));
        }
        let mut sorted = samples.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            min: sorted[0],
            q25: interpolate(&sorted, 0.25),
            q50: interpolate(&sorted, 0.50),
            q75: interpolate(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }

    /// Half the inter-quartile range
    pub fn half_iqr(&self) -> f64 {
        (self.q75 - self.q25) / 2.0
    }
}

fn interpolate(sorted: &[f64], q: f64) -> f64 {
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

// ================================================================================================
// Benchmark metadata
// ================================================================================================

/// Description of the machine a benchmark ran on
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SystemInfo {
    pub os: String,
    pub os_family: String,
    pub arch: String,
    pub cpu_count_logical: Option<usize>,
    pub crate_version: String,
}

impl SystemInfo {
    /// Information about the current process
    pub fn current() -> Self {
        Self {
            os: std::env::consts::OS.to_string(),
            os_family: std::env::consts::FAMILY.to_string(),
            arch: std::env::consts::ARCH.to_string(),
            cpu_count_logical: std::thread::available_parallelism().ok().map(|n| n.get()),
            crate_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Short identifier such as `x86_64-linux`
    pub fn platform_id(&self) -> String {
        format!("{}-{}", self.arch, self.os)
    }
}

/// Parameters of a benchmark suite run
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkSettings {
    /// Length of the input and output arrays
    pub array_size: usize,
    /// Runs per benchmark, warmup included
    pub n_runs_total: usize,
    /// Leading runs kept apart from the statistics
    pub n_runs_warmup: usize,
    /// Target duration of a single run
    pub n_seconds_per_run_target: f64,
}

impl Default for BenchmarkSettings {
    fn default() -> Self {
        Self {
            array_size: 1000,
            n_runs_total: 30,
            n_runs_warmup: 10,
            n_seconds_per_run_target: 0.5,
        }
    }
}

impl BenchmarkSettings {
    /// Check that the settings can produce at least one measured run
    pub fn validate(&self) -> Result<()> {
        if self.array_size == 0 {
            return Err(CountingError::InvalidSettings("array_size must be positive".into()));
        }
        if self.n_runs_warmup >= self.n_runs_total {
            return Err(CountingError::InvalidSettings(format!(
                "n_runs_total ({}) must exceed n_runs_warmup ({})",
                self.n_runs_total, self.n_runs_warmup
            )));
        }
        if !(self.n_seconds_per_run_target.is_finite() && self.n_seconds_per_run_target > 0.0) {
            return Err(CountingError::InvalidSettings(format!(
                "n_seconds_per_run_target must be positive, got {}",
                self.n_seconds_per_run_target
            )));
        }
        Ok(())
    }

    /// Number of runs that enter the statistics
    pub fn n_runs_measured(&self) -> usize {
        self.n_runs_total.saturating_sub(self.n_runs_warmup)
    }
}

// ================================================================================================
// Benchmark results
// ================================================================================================

/// Nanoseconds per operation, for the baseline loop and every category
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlopsBenchmarkDurations {
    pub baseline: Quantiles,
    pub flops: BTreeMap<FlopType, Quantiles>,
}

impl FlopsBenchmarkDurations {
    fn get(&self, flop_type: FlopType) -> Result<&Quantiles> {
        self.flops
            .get(&flop_type)
            .ok_or_else(|| CountingError::invalid_data("FlopsBenchmarkDurations", format!("no result for {flop_type}")))
    }

    /// Median cost of one operation with the loop overhead removed
    pub fn net_median_nsec(&self, flop_type: FlopType) -> Result<f64> {
        Ok((self.get(flop_type)?.q50 - self.baseline.q50).max(MIN_NET_NSEC))
    }
}

/// Output of a complete FLOPs benchmark suite run
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FlopsBenchmarkResults {
    pub system_info: SystemInfo,
    pub benchmark_settings: BenchmarkSettings,
    pub results_ns: FlopsBenchmarkDurations,
}

impl FlopsBenchmarkResults {
    /// Empirical weights: net median duration of each category relative to ADD
    pub fn flop_weights(&self) -> Result<FlopWeights> {
        let reference = self.results_ns.net_median_nsec(FlopType::Add)?;
        let weights = FlopType::iter()
            .map(|t| Ok((t, self.results_ns.net_median_nsec(t)? / reference)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        FlopWeights::from_map(weights)
    }

    /// Human-readable table of durations and derived weights
    pub fn summary(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "FLOPs benchmark on {} ({} logical cpus), array size {}, {} measured runs",
            self.system_info.platform_id(),
            self.system_info
                .cpu_count_logical
                .map_or_else(|| "?".to_string(), |n| n.to_string()),
            self.benchmark_settings.array_size,
            self.benchmark_settings.n_runs_measured(),
        );

        let base = &self.results_ns.baseline;
        let _ = writeln!(
            out,
            "{:<10} {:>24}",
            "baseline",
            format_time_durations(base.q25, base.q50, base.q75)
        );

        let weights = self.flop_weights().ok();
        for (t, q) in &self.results_ns.flops {
            let weight = weights
                .as_ref()
                .map_or_else(|| "-".to_string(), |w| format!("{:.2}", w.get(*t)));
            let _ = writeln!(
                out,
                "{:<10} {:>24} {:>10}",
                t.name(),
                format_time_durations(q.q25, q.q50, q.q75),
                weight
            );
        }
        out
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| CountingError::invalid_data("FlopsBenchmarkResults", e))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| CountingError::invalid_data("FlopsBenchmarkResults", e))
    }
}

// ================================================================================================
// Instruction latencies
// ================================================================================================

/// Published instruction latencies (in cycles) for one micro-architecture
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct InstructionLatencies {
    pub source: String,
    pub latencies: BTreeMap<FlopType, f64>,
}

impl InstructionLatencies {
    /// Theoretical weights: latency of each category relative to ADD
    pub fn flop_weights(&self) -> Result<FlopWeights> {
        let latency = |t: FlopType| {
            self.latencies
                .get(&t)
                .copied()
                .filter(|l| *l > 0.0)
                .ok_or_else(|| {
                    CountingError::invalid_data("InstructionLatencies", format!("no positive latency for {t}"))
                })
        };
        let reference = latency(FlopType::Add)?;
        let weights = FlopType::iter()
            .map(|t| Ok((t, latency(t)? / reference)))
            .collect::<Result<BTreeMap<_, _>>>()?;
        FlopWeights::from_map(weights)
    }
}
