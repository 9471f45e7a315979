//! Per-category operation tallies
//!
//! [`FlopCounts`] holds one signed counter per [`FlopType`]. It is a plain value:
//! sinks hand out copies, so a snapshot never changes after it was taken.
//!
//! ## Example
//!
//! ```rust
//! use counted_float_core::{FlopCounts, FlopType};
//!
//! let mut a = FlopCounts::new();
//! a.incr(FlopType::Add);
//! a.incr(FlopType::Add);
//!
//! let mut b = FlopCounts::new();
//! b.incr(FlopType::Mul);
//!
//! let diff = a - b;
//! assert_eq!(diff.add, 2);
//! assert_eq!(diff.mul, -1);
//! assert_eq!(diff.total_count(), 1);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Add, AddAssign, Sub, SubAssign};

use crate::config::get_flop_weights;
use crate::flop_type::FlopType;
use crate::flop_weights::FlopWeights;

/// Number of operations performed, by category
///
/// Serializes with the upper-case category names as keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct FlopCounts {
    pub abs: i64,
    pub minus: i64,
    pub equals: i64,
    pub gte: i64,
    pub lte: i64,
    pub cmp_zero: i64,
    pub rnd: i64,
    pub add: i64,
    pub sub: i64,
    pub mul: i64,
    pub div: i64,
    pub sqrt: i64,
    pub pow2: i64,
    pub log2: i64,
    pub pow: i64,
}

impl FlopCounts {
    /// All-zero tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Field labels in canonical order; identical to the [`FlopType`] member names
    pub fn field_names() -> [&'static str; FlopType::COUNT] {
        FlopType::ALL.map(FlopType::name)
    }

    fn slot(&self, flop_type: FlopType) -> &i64 {
        match flop_type {
            FlopType::Abs => &self.abs,
            FlopType::Minus => &self.minus,
            FlopType::Equals => &self.equals,
            FlopType::Gte => &self.gte,
            FlopType::Lte => &self.lte,
            FlopType::CmpZero => &self.cmp_zero,
            FlopType::Rnd => &self.rnd,
            FlopType::Add => &self.add,
            FlopType::Sub => &self.sub,
            FlopType::Mul => &self.mul,
            FlopType::Div => &self.div,
            FlopType::Sqrt => &self.sqrt,
            FlopType::Pow2 => &self.pow2,
            FlopType::Log2 => &self.log2,
            FlopType::Pow => &self.pow,
        }
    }

    fn slot_mut(&mut self, flop_type: FlopType) -> &mut i64 {
        match flop_type {
            FlopType::Abs => &mut self.abs,
            FlopType::Minus => &mut self.minus,
            FlopType::Equals => &mut self.equals,
            FlopType::Gte => &mut self.gte,
            FlopType::Lte => &mut self.lte,
            FlopType::CmpZero => &mut self.cmp_zero,
            FlopType::Rnd => &mut self.rnd,
            FlopType::Add => &mut self.add,
            FlopType::Sub => &mut self.sub,
            FlopType::Mul => &mut self.mul,
            FlopType::Div => &mut self.div,
            FlopType::Sqrt => &mut self.sqrt,
            FlopType::Pow2 => &mut self.pow2,
            FlopType::Log2 => &mut self.log2,
            FlopType::Pow => &mut self.pow,
        }
    }

    /// Count for one category
    pub fn get(&self, flop_type: FlopType) -> i64 {
        *self.slot(flop_type)
    }

    /// Overwrite the count for one category
    pub fn set(&mut self, flop_type: FlopType, value: i64) {
        *self.slot_mut(flop_type) = value;
    }

    /// Add one to a category
    #[inline]
    pub fn incr(&mut self, flop_type: FlopType) {
        *self.slot_mut(flop_type) += 1;
    }

    /// Sum over all categories
    pub fn total_count(&self) -> i64 {
        FlopType::iter().map(|t| self.get(t)).sum()
    }

    /// `Σ count[t] * weight[t]`, using the configured weights when `weights` is `None`
    pub fn total_weighted_cost(&self, weights: Option<&FlopWeights>) -> f64 {
        match weights {
            Some(weights) => weights.weighted_cost(self),
            None => get_flop_weights().weighted_cost(self),
        }
    }

    /// Zero every category in place
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Independent copy
    pub fn copy(&self) -> Self {
        *self
    }

    /// Mapping with all 15 categories present
    pub fn as_dict(&self) -> BTreeMap<FlopType, i64> {
        FlopType::iter().map(|t| (t, self.get(t))).collect()
    }

    /// Iterate `(category, count)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (FlopType, i64)> + '_ {
        FlopType::iter().map(move |t| (t, self.get(t)))
    }

    fn zip_with(&self, other: &Self, f: impl Fn(i64, i64) -> i64) -> Self {
        let mut result = Self::default();
        for t in FlopType::iter() {
            result.set(t, f(self.get(t), other.get(t)));
        }
        result
    }
}

impl FromIterator<FlopType> for FlopCounts {
    fn from_iter<I: IntoIterator<Item = FlopType>>(iter: I) -> Self {
        let mut counts = Self::default();
        for t in iter {
            counts.incr(t);
        }
        counts
    }
}

impl fmt::Display for FlopCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FlopCounts(")?;
        for (i, (t, count)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}={}", t.name(), count)?;
        }
        write!(f, ")")
    }
}

// ================================================================================================
// Arithmetic
// ================================================================================================

macro_rules! impl_counts_op {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:expr) => {
        impl $trait for FlopCounts {
            type Output = FlopCounts;

            fn $method(self, rhs: FlopCounts) -> FlopCounts {
                self.zip_with(&rhs, $op)
            }
        }

        impl $trait<&FlopCounts> for &FlopCounts {
            type Output = FlopCounts;

            fn $method(self, rhs: &FlopCounts) -> FlopCounts {
                self.zip_with(rhs, $op)
            }
        }

        impl $assign_trait for FlopCounts {
            fn $assign_method(&mut self, rhs: FlopCounts) {
                *self = self.zip_with(&rhs, $op);
            }
        }
    };
}

impl_counts_op!(Add, add, AddAssign, add_assign, |a, b| a + b);
impl_counts_op!(Sub, sub, SubAssign, sub_assign, |a, b| a - b);
