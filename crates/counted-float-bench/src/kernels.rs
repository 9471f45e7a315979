//! Native loops timing one operation category each
//!
//! Every kernel has the same signature `(n, in_f1, in_f2, out_f, out_i)` and
//! performs one operation per element for the first `n` elements. Comparisons
//! and rounding write to the integer output to keep float conversions out of
//! the loop. [`baseline`] only iterates, so its time is the loop overhead that
//! gets subtracted from all other kernels.

use std::hint::black_box;

use counted_float_core::FlopType;

/// Signature shared by all kernels
pub type FlopKernel = fn(n: usize, in_f1: &[f64], in_f2: &[f64], out_f: &mut [f64], out_i: &mut [i64]);

macro_rules! float_kernel {
    ($(#[$meta:meta])* $name:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$meta])*
        #[inline(never)]
        pub fn $name(n: usize, in_f1: &[f64], in_f2: &[f64], out_f: &mut [f64], _out_i: &mut [i64]) {
            for ((out, &$a), &$b) in out_f[..n].iter_mut().zip(&in_f1[..n]).zip(&in_f2[..n]) {
                *out = $body;
            }
        }
    };
}

macro_rules! int_kernel {
    ($(#[$meta:meta])* $name:ident, |$a:ident, $b:ident| $body:expr) => {
        $(#[$meta])*
        #[inline(never)]
        pub fn $name(n: usize, in_f1: &[f64], in_f2: &[f64], _out_f: &mut [f64], out_i: &mut [i64]) {
            for ((out, &$a), &$b) in out_i[..n].iter_mut().zip(&in_f1[..n]).zip(&in_f2[..n]) {
                *out = $body;
            }
        }
    };
}

/// Loop overhead only
#[inline(never)]
pub fn baseline(n: usize, _in_f1: &[f64], _in_f2: &[f64], _out_f: &mut [f64], _out_i: &mut [i64]) {
    for i in 0..n {
        black_box(i);
    }
}

float_kernel!(flop_abs, |a, _b| a.abs());
float_kernel!(flop_minus, |a, _b| -a);
int_kernel!(flop_equals, |a, b| (a == b) as i64);
int_kernel!(flop_gte, |a, b| (a >= b) as i64);
int_kernel!(flop_lte, |a, b| (a <= b) as i64);
int_kernel!(
    /// `a >= 0`
    flop_cmp_zero,
    |a, _b| (a >= 0.0) as i64
);
int_kernel!(flop_rnd, |a, _b| a.ceil() as i64);
float_kernel!(flop_add, |a, b| a + b);
float_kernel!(flop_sub, |a, b| a - b);
float_kernel!(flop_mul, |a, b| a * b);
float_kernel!(flop_div, |a, b| a / b);
float_kernel!(flop_sqrt, |a, _b| a.sqrt());
float_kernel!(
    /// `2^a`
    flop_pow2,
    |a, _b| a.exp2()
);
float_kernel!(flop_log2, |a, _b| a.log2());
float_kernel!(flop_pow, |a, b| a.powf(b));

/// Kernel and display label measuring `flop_type`
pub fn kernel_for(flop_type: FlopType) -> (&'static str, FlopKernel) {
    match flop_type {
        FlopType::Abs => ("c=abs(a)", flop_abs),
        FlopType::Minus => ("c=-a", flop_minus),
        FlopType::Equals => ("c=(a==b)", flop_equals),
        FlopType::Gte => ("c=(a>=b)", flop_gte),
        FlopType::Lte => ("c=(a<=b)", flop_lte),
        FlopType::CmpZero => ("c=(a>=0)", flop_cmp_zero),
        FlopType::Rnd => ("c=ceil(a)", flop_rnd),
        FlopType::Add => ("c=a+b", flop_add),
        FlopType::Sub => ("c=a-b", flop_sub),
        FlopType::Mul => ("c=a*b", flop_mul),
        FlopType::Div => ("c=a/b", flop_div),
        FlopType::Sqrt => ("c=sqrt(a)", flop_sqrt),
        FlopType::Pow2 => ("c=2^a", flop_pow2),
        FlopType::Log2 => ("c=log2(a)", flop_log2),
        FlopType::Pow => ("c=a^b", flop_pow),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: [f64; 4] = [0.5, 1.0, 2.0, 4.0];
    const B: [f64; 4] = [1.0, 1.0, 0.5, 3.0];

    fn run(kernel: FlopKernel, n: usize) -> ([f64; 4], [i64; 4]) {
        let mut out_f = [0.0; 4];
        let mut out_i = [0; 4];
        kernel(n, &A, &B, &mut out_f, &mut out_i);
        (out_f, out_i)
    }

    #[test]
    fn test_float_kernels() {
        assert_eq!(run(flop_add, 4).0, [1.5, 2.0, 2.5, 7.0]);
        assert_eq!(run(flop_div, 4).0, [0.5, 1.0, 4.0, 4.0 / 3.0]);
        assert_eq!(run(flop_pow2, 4).0, [0.5f64.exp2(), 2.0, 4.0, 16.0]);
        assert_eq!(run(flop_log2, 4).0, [-1.0, 0.0, 1.0, 2.0]);
        assert_eq!(run(flop_pow, 4).0, [0.5, 1.0, 2.0f64.powf(0.5), 64.0]);
    }

    #[test]
    fn test_int_kernels() {
        assert_eq!(run(flop_equals, 4).1, [0, 1, 0, 0]);
        assert_eq!(run(flop_gte, 4).1, [0, 1, 1, 1]);
        assert_eq!(run(flop_lte, 4).1, [1, 1, 0, 0]);
        assert_eq!(run(flop_rnd, 4).1, [1, 1, 2, 4]);
    }

    #[test]
    fn test_kernels_respect_n() {
        assert_eq!(run(flop_mul, 2).0, [0.5, 1.0, 0.0, 0.0]);
        assert_eq!(run(baseline, 4), ([0.0; 4], [0; 4]));
    }

    #[test]
    fn test_every_flop_type_has_a_kernel() {
        let labels: std::collections::BTreeSet<_> = FlopType::iter().map(|t| kernel_for(t).0).collect();
        assert_eq!(labels.len(), FlopType::COUNT);
    }
}
