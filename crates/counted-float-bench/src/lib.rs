//! # counted-float-bench - Calibrating FLOP Weights
//!
//! Measures how long each floating-point operation category takes on the
//! current machine. The measured medians, net of the loop overhead, become the
//! empirical [`FlopWeights`](counted_float_core::FlopWeights).
//!
//! ## Example
//!
//! ```rust,no_run
//! use counted_float_bench::FlopsBenchmarkSuite;
//! use counted_float_core::BenchmarkSettings;
//!
//! let results = FlopsBenchmarkSuite::run(&BenchmarkSettings::default())?;
//! println!("{}", results.summary());
//! println!("{}", results.flop_weights()?.round());
//! # Ok::<(), counted_float_bench::BenchError>(())
//! ```

pub mod error;
pub mod flops_micro_benchmark;
pub mod kernels;
pub mod micro_benchmark;
pub mod suite;

pub use error::{BenchError, Result};
pub use flops_micro_benchmark::FlopsMicroBenchmark;
pub use kernels::{kernel_for, FlopKernel};
pub use micro_benchmark::{MicroBenchmark, MicroBenchmarkResult, SingleRunResult};
pub use suite::FlopsBenchmarkSuite;
