//! # counted-float-core - Floating-Point Operation Counting
//!
//! Counts, by category, the elementary floating-point operations a computation
//! performs, and weighs those counts by calibrated per-operation costs.
//!
//! ## Architecture
//!
//! - [`CountedFloat`] wraps an `f64` and charges every arithmetic, comparison and
//!   rounding operation to exactly one [`FlopType`]
//! - Every charge goes to the process-wide counter ([`global_counter`]) and to each
//!   open [`FlopCountingContext`], in opening order
//! - [`PauseFlopCounting`] suspends the global counter and all open contexts at once
//! - [`FlopWeights`] turn a [`FlopCounts`] tally into a single weighted cost;
//!   the defaults are derived from built-in latency tables and benchmark results
//!
//! ## Example
//!
//! ```rust
//! use counted_float_core::{CountedFloat, FlopCountingContext, FlopWeights};
//!
//! let a = CountedFloat::new(1.0);
//! let b = CountedFloat::new(2.0);
//!
//! let context = FlopCountingContext::new();
//! {
//!     let _guard = context.enter().unwrap();
//!     assert!(a + b == 3.0);
//! }
//!
//! let counts = context.flop_counts();
//! assert_eq!(counts.add, 1);
//! assert_eq!(counts.equals, 1);
//! assert_eq!(counts.total_weighted_cost(Some(&FlopWeights::uniform())), 2.0);
//! ```
//!
//! ## Modules
//!
//! - [`counted_float`] - the instrumented float and its operator overloads
//! - [`context`] - scoped counting contexts and the pause-everywhere scope
//! - [`math`] - function-style math on counted values
//! - [`config`], [`defaults`] - weight store and default weight tables
//! - [`models`], [`builtin_data`] - benchmark result models and embedded reference data

pub mod builtin_data;
pub mod config;
pub mod context;
pub mod counted_float;
pub mod defaults;
pub mod error;
pub mod flop_counts;
pub mod flop_type;
pub mod flop_weights;
pub mod global_counter;
pub mod math;
pub mod models;

mod sinks;

// Re-export primary types
pub use builtin_data::BuiltInData;
pub use config::{get_flop_weights, reset_flop_weights, set_flop_weights};
pub use context::{count_flops, pause_flop_counting, ContextGuard, FlopCountingContext, PauseFlopCounting};
pub use counted_float::{float_hash_bits, CountedFloat, Operand};
pub use defaults::{consensus_flop_weights, empirical_flop_weights, theoretical_flop_weights};
pub use error::{CountingError, Result};
pub use flop_counts::FlopCounts;
pub use flop_type::FlopType;
pub use flop_weights::FlopWeights;
pub use global_counter::{global_counter, GlobalFlopCounter};
pub use models::{
    BenchmarkSettings, FlopsBenchmarkDurations, FlopsBenchmarkResults, InstructionLatencies, Quantiles, SystemInfo,
    MIN_NET_NSEC,
};

pub use num_traits::Pow;
