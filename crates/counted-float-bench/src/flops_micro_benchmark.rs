//! Micro benchmark running a [`FlopKernel`] over random input arrays

use std::hint::black_box;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::kernels::FlopKernel;
use crate::micro_benchmark::MicroBenchmark;

/// Inputs are drawn from this range: positive, away from zero and close to one,
/// so that division, square root, logarithm and powers all stay finite
const INPUT_RANGE: std::ops::Range<f64> = 0.5..1.5;

/// Repeats a kernel over arrays of `size` elements
///
/// Operation counts are rounded up to a whole number of passes over the arrays.
pub struct FlopsMicroBenchmark {
    name: String,
    kernel: FlopKernel,
    size: usize,
    in_f1: Vec<f64>,
    in_f2: Vec<f64>,
    out_f: Vec<f64>,
    out_i: Vec<i64>,
    n_passes: u64,
}

impl FlopsMicroBenchmark {
    pub fn new(name: impl Into<String>, kernel: FlopKernel, size: usize) -> Self {
        Self::with_seed(name, kernel, size, rand::thread_rng().gen())
    }

    /// Same as [`new`](Self::new) with reproducible inputs
    pub fn with_seed(name: impl Into<String>, kernel: FlopKernel, size: usize, seed: u64) -> Self {
        let size = size.max(1);
        let mut rng = StdRng::seed_from_u64(seed);
        let in_f1 = (0..size).map(|_| rng.gen_range(INPUT_RANGE)).collect();
        let in_f2 = (0..size).map(|_| rng.gen_range(INPUT_RANGE)).collect();
        Self {
            name: name.into(),
            kernel,
            size,
            in_f1,
            in_f2,
            out_f: vec![0.0; size],
            out_i: vec![0; size],
            n_passes: 1,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }
}

impl MicroBenchmark for FlopsMicroBenchmark {
    fn name(&self) -> &str {
        &self.name
    }

    fn prepare_benchmark(&mut self, n_operations: u64) -> u64 {
        let size = self.size as u64;
        self.n_passes = n_operations.div_ceil(size).max(1);
        self.n_passes * size
    }

    fn run_benchmark(&mut self) {
        for _ in 0..self.n_passes {
            (self.kernel)(
                self.size,
                black_box(&self.in_f1),
                black_box(&self.in_f2),
                &mut self.out_f,
                &mut self.out_i,
            );
        }
        black_box((&self.out_f, &self.out_i));
    }
}
