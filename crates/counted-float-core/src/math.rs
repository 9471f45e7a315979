//! Function-style math on counted values
//!
//! Free functions mirroring the usual math library calls. Each one is charged
//! exactly like the corresponding [`CountedFloat`] method; plain `f64` and
//! integer arguments are lifted into counted values first.
//!
//! ```rust
//! use counted_float_core::{count_flops, math, CountedFloat};
//!
//! let x = CountedFloat::new(3.0);
//! let (_, counts) = count_flops(|| math::pow(2, x) + math::pow(x, 2) + math::pow(x, 0.5));
//! assert_eq!((counts.pow2, counts.mul, counts.pow), (1, 1, 1));
//! ```

use crate::counted_float::{max_operands, min_operands, pow_operands, CountedFloat, Operand};

pub fn abs(x: impl Into<CountedFloat>) -> CountedFloat {
    x.into().abs()
}

pub fn sqrt(x: impl Into<CountedFloat>) -> CountedFloat {
    x.into().sqrt()
}

pub fn log2(x: impl Into<CountedFloat>) -> CountedFloat {
    x.into().log2()
}

/// `base ^ exponent`: POW2 for an integer base of 2, MUL for an integer exponent of 2, POW otherwise
pub fn pow(base: impl Into<Operand>, exponent: impl Into<Operand>) -> CountedFloat {
    pow_operands(base.into(), exponent.into())
}

pub fn floor(x: impl Into<CountedFloat>) -> f64 {
    x.into().floor()
}

pub fn ceil(x: impl Into<CountedFloat>) -> f64 {
    x.into().ceil()
}

pub fn round(x: impl Into<CountedFloat>) -> f64 {
    x.into().round()
}

/// Smaller argument, charged as one comparison
pub fn min(a: impl Into<Operand>, b: impl Into<Operand>) -> CountedFloat {
    min_operands(a.into(), b.into())
}

/// Larger argument, charged as one comparison
pub fn max(a: impl Into<Operand>, b: impl Into<Operand>) -> CountedFloat {
    max_operands(a.into(), b.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::global_counter::global_counter;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_function_style_matches_methods() {
        global_counter().reset();
        let x = CountedFloat::new(-2.5);

        assert_eq!(abs(x).value(), 2.5);
        assert_eq!(sqrt(6.25).value(), 2.5);
        assert_eq!(log2(8.0).value(), 3.0);
        assert_eq!(floor(x), -3.0);
        assert_eq!(ceil(x), -2.0);
        assert_eq!(round(x), -3.0);
        assert_eq!(min(x, 1.0).value(), -2.5);
        assert_eq!(max(x, 1).value(), 1.0);

        let counts = global_counter().flop_counts();
        assert_eq!(counts.abs, 1);
        assert_eq!(counts.sqrt, 1);
        assert_eq!(counts.log2, 1);
        assert_eq!(counts.rnd, 3);
        assert_eq!(counts.lte, 1);
        assert_eq!(counts.gte, 1);
        assert_eq!(counts.total_count(), 8);
    }

    #[test]
    #[serial]
    fn test_pow_classification() {
        global_counter().reset();
        let x = CountedFloat::new(1.5);
        let _ = pow(2, x);
        let _ = pow(2i64, 3.0);
        let _ = pow(x, 2);
        let _ = pow(x, 2.0);
        let _ = pow(2.0, x);

        let counts = global_counter().flop_counts();
        assert_eq!(counts.pow2, 2);
        assert_eq!(counts.mul, 1);
        assert_eq!(counts.pow, 2);
    }
}
