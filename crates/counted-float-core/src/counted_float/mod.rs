//! The instrumented float
//!
//! [`CountedFloat`] wraps an `f64` and charges every operation performed on it to
//! exactly one [`FlopType`]. The result is always the one plain `f64` arithmetic
//! produces (IEEE-754 semantics included); the increment is recorded after the
//! value has been computed.
//!
//! Arithmetic, negation, `abs`, powers, `sqrt` and `log2` return a new
//! `CountedFloat`. Comparisons return `bool`, rounding returns `f64`.
//!
//! ## Example
//!
//! ```rust
//! use counted_float_core::{count_flops, CountedFloat};
//!
//! let x = CountedFloat::new(3.0);
//! let (y, counts) = count_flops(|| (x * 2.0 + 1.0).pow(2) - x.sqrt());
//!
//! assert_eq!(y.value(), 49.0 - 3f64.sqrt());
//! assert_eq!(counts.mul, 2); // `* 2.0` and `^2`
//! assert_eq!(counts.add, 1);
//! assert_eq!(counts.sub, 1);
//! assert_eq!(counts.sqrt, 1);
//! ```

mod operand;
mod ops;

use std::fmt;
use std::hash::{Hash, Hasher};

pub use operand::Operand;
pub(crate) use operand::{classify_equality, classify_ordering, classify_pow};

use crate::error::{CountingError, Result};
use crate::flop_counts::FlopCounts;
use crate::flop_type::FlopType;
use crate::global_counter::global_counter;
use crate::sinks::record_flop;

/// Bits used to hash `value`: equal floats (including `0.0` and `-0.0`) give equal bits
pub fn float_hash_bits(value: f64) -> u64 {
    if value == 0.0 {
        0
    } else if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

/// A float whose operations are counted
///
/// Equality and hashing follow the wrapped `f64`: `0.0` and `-0.0` are equal and
/// hash the same. Like `f64`, `NaN` is not equal to itself, so the [`Eq`] impl
/// only holds for non-NaN values.
#[derive(Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CountedFloat(f64);

/// Charge `flop_type` to every active sink and hand back `result`
#[inline]
pub(crate) fn charged<T>(result: T, flop_type: FlopType) -> T {
    record_flop(flop_type);
    result
}

impl CountedFloat {
    pub const fn new(value: f64) -> Self {
        CountedFloat(value)
    }

    /// The wrapped value; reading it is not counted
    #[inline]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Snapshot of the global counter
    pub fn global_flop_counts() -> FlopCounts {
        global_counter().flop_counts()
    }

    pub fn abs(self) -> Self {
        charged(CountedFloat(self.0.abs()), FlopType::Abs)
    }

    pub fn sqrt(self) -> Self {
        charged(CountedFloat(self.0.sqrt()), FlopType::Sqrt)
    }

    pub fn log2(self) -> Self {
        charged(CountedFloat(self.0.log2()), FlopType::Log2)
    }

    /// `self ^ exponent`, charged as POW, or MUL for the integer exponent `2`
    pub fn pow(self, exponent: impl Into<Operand>) -> Self {
        pow_operands(self.into(), exponent.into())
    }

    /// Round half away from zero
    pub fn round(self) -> f64 {
        charged(self.0.round(), FlopType::Rnd)
    }

    pub fn floor(self) -> f64 {
        charged(self.0.floor(), FlopType::Rnd)
    }

    pub fn ceil(self) -> f64 {
        charged(self.0.ceil(), FlopType::Rnd)
    }

    /// Round to a number of decimal digits
    ///
    /// Only `None` (round to an integer) is supported; rounding to decimal digits
    /// has no single operation category to charge.
    pub fn round_digits(self, ndigits: Option<i32>) -> Result<f64> {
        match ndigits {
            None => Ok(self.round()),
            Some(n) => Err(CountingError::UnsupportedOperation(format!(
                "round to {n} digits on CountedFloat"
            ))),
        }
    }

    /// Smaller of two values, charged as one comparison
    pub fn min(self, other: impl Into<Operand>) -> Self {
        min_operands(self.into(), other.into())
    }

    /// Larger of two values, charged as one comparison
    pub fn max(self, other: impl Into<Operand>) -> Self {
        max_operands(self.into(), other.into())
    }
}

pub(crate) fn pow_operands(base: Operand, exponent: Operand) -> CountedFloat {
    let result = CountedFloat(base.value().powf(exponent.value()));
    charged(result, classify_pow(base, exponent))
}

pub(crate) fn min_operands(first: Operand, second: Operand) -> CountedFloat {
    // `second` wins only when strictly smaller, as with a single `<` test.
    let smaller = if second.value() < first.value() { second } else { first };
    charged(CountedFloat(smaller.value()), classify_ordering(first, second, FlopType::Lte))
}

pub(crate) fn max_operands(first: Operand, second: Operand) -> CountedFloat {
    let larger = if second.value() > first.value() { second } else { first };
    charged(CountedFloat(larger.value()), classify_ordering(first, second, FlopType::Gte))
}

// ================================================================================================
// Conversions and formatting
// ================================================================================================

impl From<f64> for CountedFloat {
    fn from(value: f64) -> Self {
        CountedFloat(value)
    }
}

impl From<i32> for CountedFloat {
    fn from(value: i32) -> Self {
        CountedFloat(value as f64)
    }
}

impl From<CountedFloat> for f64 {
    fn from(value: CountedFloat) -> Self {
        value.0
    }
}

impl fmt::Display for CountedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountedFloat({})", self.0)
    }
}

impl fmt::Debug for CountedFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CountedFloat({:?})", self.0)
    }
}

impl Hash for CountedFloat {
    fn hash<H: Hasher>(&self, state: &mut H) {
        float_hash_bits(self.0).hash(state);
    }
}

impl Eq for CountedFloat {}
