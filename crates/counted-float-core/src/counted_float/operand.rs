//! Operands and the classification rules built on them
//!
//! Integer operands stand for literal integers. They matter for classification:
//! comparing against integer `0` is a zero comparison, an integer base of `2`
//! is a power of two and an integer exponent of `2` is a multiplication. A float
//! `0.0` or `2.0` is an ordinary value.

use super::CountedFloat;
use crate::flop_type::FlopType;

/// Any value a [`CountedFloat`] can be combined with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Operand {
    /// A floating-point value, counted or not
    Float(f64),
    /// A literal integer
    Int(i64),
}

impl Operand {
    /// Numeric value as `f64`
    #[inline]
    pub fn value(self) -> f64 {
        match self {
            Operand::Float(v) => v,
            Operand::Int(n) => n as f64,
        }
    }

    /// Is this the literal integer `n`?
    #[inline]
    pub fn is_int(self, n: i64) -> bool {
        matches!(self, Operand::Int(m) if m == n)
    }
}

impl From<CountedFloat> for Operand {
    #[inline]
    fn from(value: CountedFloat) -> Self {
        Operand::Float(value.value())
    }
}

impl From<&CountedFloat> for Operand {
    #[inline]
    fn from(value: &CountedFloat) -> Self {
        Operand::Float(value.value())
    }
}

impl From<f64> for Operand {
    #[inline]
    fn from(value: f64) -> Self {
        Operand::Float(value)
    }
}

impl From<i32> for Operand {
    #[inline]
    fn from(value: i32) -> Self {
        Operand::Int(value as i64)
    }
}

impl From<i64> for Operand {
    #[inline]
    fn from(value: i64) -> Self {
        Operand::Int(value)
    }
}

// ================================================================================================
// Classification
// ================================================================================================

/// `==` / `!=`
#[inline]
pub(crate) fn classify_equality(lhs: Operand, rhs: Operand) -> FlopType {
    if lhs.is_int(0) || rhs.is_int(0) {
        FlopType::CmpZero
    } else {
        FlopType::Equals
    }
}

/// `<`, `<=` (`FlopType::Lte`) or `>`, `>=` (`FlopType::Gte`)
#[inline]
pub(crate) fn classify_ordering(lhs: Operand, rhs: Operand, bucket: FlopType) -> FlopType {
    if lhs.is_int(0) || rhs.is_int(0) {
        FlopType::CmpZero
    } else {
        bucket
    }
}

/// `base ^ exponent`; the base check takes precedence
#[inline]
pub(crate) fn classify_pow(base: Operand, exponent: Operand) -> FlopType {
    if base.is_int(2) {
        FlopType::Pow2
    } else if exponent.is_int(2) {
        FlopType::Mul
    } else {
        FlopType::Pow
    }
}
