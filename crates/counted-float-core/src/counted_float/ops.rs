//! Operator impls for [`CountedFloat`]
//!
//! Every operator is implemented for `CountedFloat` on either side, combined with
//! another `CountedFloat`, an `f64`, an `i32` or an `i64`. Both operand orders
//! charge the same category.
//!
//! Because both `i32` and `i64` are accepted, an unsuffixed integer literal such as
//! `x + 1` only infers when the result flows into a typed binding. Write `x + 1i32`
//! when the result is used directly, e.g. `(x + 1i32).value()`.

use std::cmp::Ordering;
use std::iter::{Product, Sum};
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Pow, Zero};

use super::{charged, classify_equality, classify_ordering, pow_operands, CountedFloat, Operand};
use crate::flop_type::FlopType;

// ================================================================================================
// Arithmetic
// ================================================================================================

macro_rules! impl_arithmetic {
    ($trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt, $flop:ident) => {
        impl $trait for CountedFloat {
            type Output = CountedFloat;

            #[inline]
            fn $method(self, rhs: CountedFloat) -> CountedFloat {
                charged(CountedFloat(self.0 $op rhs.0), FlopType::$flop)
            }
        }

        impl $assign_trait for CountedFloat {
            #[inline]
            fn $assign_method(&mut self, rhs: CountedFloat) {
                *self = $trait::$method(*self, rhs);
            }
        }

        impl_arithmetic!(@mixed $trait, $method, $assign_trait, $assign_method, $op, $flop, f64, i32, i64);
    };

    (@mixed $trait:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt, $flop:ident, $($other:ty),+) => {
        $(
            impl $trait<$other> for CountedFloat {
                type Output = CountedFloat;

                #[inline]
                fn $method(self, rhs: $other) -> CountedFloat {
                    charged(CountedFloat(self.0 $op Operand::from(rhs).value()), FlopType::$flop)
                }
            }

            impl $trait<CountedFloat> for $other {
                type Output = CountedFloat;

                #[inline]
                fn $method(self, rhs: CountedFloat) -> CountedFloat {
                    charged(CountedFloat(Operand::from(self).value() $op rhs.0), FlopType::$flop)
                }
            }

            impl $assign_trait<$other> for CountedFloat {
                #[inline]
                fn $assign_method(&mut self, rhs: $other) {
                    *self = $trait::$method(*self, rhs);
                }
            }
        )+
    };
}

impl_arithmetic!(Add, add, AddAssign, add_assign, +, Add);
impl_arithmetic!(Sub, sub, SubAssign, sub_assign, -, Sub);
impl_arithmetic!(Mul, mul, MulAssign, mul_assign, *, Mul);
impl_arithmetic!(Div, div, DivAssign, div_assign, /, Div);

impl Neg for CountedFloat {
    type Output = CountedFloat;

    #[inline]
    fn neg(self) -> CountedFloat {
        charged(CountedFloat(-self.0), FlopType::Minus)
    }
}

// ================================================================================================
// Comparisons
// ================================================================================================

#[inline]
fn eq_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() == rhs.value(), classify_equality(lhs, rhs))
}

#[inline]
fn ne_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() != rhs.value(), classify_equality(lhs, rhs))
}

#[inline]
fn partial_cmp_operands(lhs: Operand, rhs: Operand) -> Option<Ordering> {
    charged(
        lhs.value().partial_cmp(&rhs.value()),
        classify_ordering(lhs, rhs, FlopType::Lte),
    )
}

#[inline]
fn lt_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() < rhs.value(), classify_ordering(lhs, rhs, FlopType::Lte))
}

#[inline]
fn le_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() <= rhs.value(), classify_ordering(lhs, rhs, FlopType::Lte))
}

#[inline]
fn gt_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() > rhs.value(), classify_ordering(lhs, rhs, FlopType::Gte))
}

#[inline]
fn ge_operands(lhs: Operand, rhs: Operand) -> bool {
    charged(lhs.value() >= rhs.value(), classify_ordering(lhs, rhs, FlopType::Gte))
}

macro_rules! impl_comparisons {
    ($lhs:ty, $rhs:ty) => {
        impl PartialEq<$rhs> for $lhs {
            #[inline]
            fn eq(&self, other: &$rhs) -> bool {
                eq_operands(Operand::from(*self), Operand::from(*other))
            }

            #[inline]
            #[allow(clippy::partialeq_ne_impl)]
            fn ne(&self, other: &$rhs) -> bool {
                ne_operands(Operand::from(*self), Operand::from(*other))
            }
        }

        impl PartialOrd<$rhs> for $lhs {
            #[inline]
            fn partial_cmp(&self, other: &$rhs) -> Option<Ordering> {
                partial_cmp_operands(Operand::from(*self), Operand::from(*other))
            }

            #[inline]
            fn lt(&self, other: &$rhs) -> bool {
                lt_operands(Operand::from(*self), Operand::from(*other))
            }

            #[inline]
            fn le(&self, other: &$rhs) -> bool {
                le_operands(Operand::from(*self), Operand::from(*other))
            }

            #[inline]
            fn gt(&self, other: &$rhs) -> bool {
                gt_operands(Operand::from(*self), Operand::from(*other))
            }

            #[inline]
            fn ge(&self, other: &$rhs) -> bool {
                ge_operands(Operand::from(*self), Operand::from(*other))
            }
        }
    };
}

impl_comparisons!(CountedFloat, CountedFloat);
impl_comparisons!(CountedFloat, f64);
impl_comparisons!(f64, CountedFloat);
impl_comparisons!(CountedFloat, i32);
impl_comparisons!(i32, CountedFloat);
impl_comparisons!(CountedFloat, i64);
impl_comparisons!(i64, CountedFloat);

// ================================================================================================
// Powers
// ================================================================================================

macro_rules! impl_pow {
    ($($base:ty => $exponent:ty),+ $(,)?) => {
        $(
            impl Pow<$exponent> for $base {
                type Output = CountedFloat;

                #[inline]
                fn pow(self, exponent: $exponent) -> CountedFloat {
                    pow_operands(Operand::from(self), Operand::from(exponent))
                }
            }
        )+
    };
}

impl_pow! {
    CountedFloat => CountedFloat,
    CountedFloat => f64,
    CountedFloat => i32,
    CountedFloat => i64,
    f64 => CountedFloat,
    i32 => CountedFloat,
    i64 => CountedFloat,
}

// ================================================================================================
// Folds and identities
// ================================================================================================

/// Sums `n` values with `n - 1` additions; an empty sum is `0.0` and costs nothing
impl Sum for CountedFloat {
    fn sum<I: Iterator<Item = CountedFloat>>(iter: I) -> CountedFloat {
        iter.reduce(|acc, x| acc + x).unwrap_or(CountedFloat(0.0))
    }
}

impl<'a> Sum<&'a CountedFloat> for CountedFloat {
    fn sum<I: Iterator<Item = &'a CountedFloat>>(iter: I) -> CountedFloat {
        iter.copied().sum()
    }
}

/// Multiplies `n` values with `n - 1` multiplications; an empty product is `1.0`
impl Product for CountedFloat {
    fn product<I: Iterator<Item = CountedFloat>>(iter: I) -> CountedFloat {
        iter.reduce(|acc, x| acc * x).unwrap_or(CountedFloat(1.0))
    }
}

impl<'a> Product<&'a CountedFloat> for CountedFloat {
    fn product<I: Iterator<Item = &'a CountedFloat>>(iter: I) -> CountedFloat {
        iter.copied().product()
    }
}

impl Zero for CountedFloat {
    fn zero() -> Self {
        CountedFloat(0.0)
    }

    /// Charged as a comparison with zero
    fn is_zero(&self) -> bool {
        *self == 0
    }
}

impl One for CountedFloat {
    fn one() -> Self {
        CountedFloat(1.0)
    }
}
