//! # counted-float
//!
//! Count the floating-point operations a computation performs, by category, and
//! weigh them by calibrated per-operation costs.
//!
//! This crate re-exports the counting engine ([`counted_float_core`]) at the top
//! level and the benchmark harness under [`bench`].
//!
//! ## Example
//!
//! ```rust
//! use counted_float::{count_flops, CountedFloat};
//!
//! fn norm(xs: &[CountedFloat]) -> CountedFloat {
//!     xs.iter().map(|&x| x * x).sum::<CountedFloat>().sqrt()
//! }
//!
//! let xs: Vec<CountedFloat> = [3.0, 4.0].into_iter().map(CountedFloat::new).collect();
//! let (n, counts) = count_flops(|| norm(&xs));
//!
//! assert_eq!(n.value(), 5.0);
//! assert_eq!((counts.mul, counts.add, counts.sqrt), (2, 1, 1));
//! println!("cost: {}", counts.total_weighted_cost(None));
//! ```

pub use counted_float_core::*;

/// Micro benchmark harness and the FLOPs benchmark suite
pub mod bench {
    pub use counted_float_bench::*;
}

/// Tracing setup and timing utilities
pub mod tracing {
    pub use counted_float_tracing::*;
}
