//! Per-operation overhead of counting
//!
//! Each group times the same expression on plain `f64`, on `CountedFloat` with the
//! global counter active, inside an open context, and with counting paused.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use counted_float_core::{global_counter, CountedFloat, FlopCountingContext, PauseFlopCounting};

fn benchmark_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    let (a, b) = (1.25f64, 2.5f64);
    let (ca, cb) = (CountedFloat::new(a), CountedFloat::new(b));

    group.bench_function("f64", |bench| bench.iter(|| black_box(a) + black_box(b)));

    global_counter().reset();
    group.bench_function("counted_global", |bench| bench.iter(|| black_box(ca) + black_box(cb)));

    let context = FlopCountingContext::new();
    {
        let _guard = context.enter().unwrap();
        group.bench_function("counted_context", |bench| bench.iter(|| black_box(ca) + black_box(cb)));
    }

    {
        let _pause = PauseFlopCounting::new();
        group.bench_function("counted_paused", |bench| bench.iter(|| black_box(ca) + black_box(cb)));
    }

    group.finish();
}

fn benchmark_nested_contexts(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul_nested_contexts");
    let (ca, cb) = (CountedFloat::new(1.25), CountedFloat::new(2.5));

    for depth in [0usize, 1, 4, 16] {
        global_counter().reset();
        let contexts: Vec<FlopCountingContext> = (0..depth).map(|_| FlopCountingContext::new()).collect();
        let _guards: Vec<_> = contexts.iter().map(|ctx| ctx.enter().unwrap()).collect();

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |bench, _| {
            bench.iter(|| black_box(ca) * black_box(cb))
        });
    }

    group.finish();
}

fn benchmark_dot_product(c: &mut Criterion) {
    let mut group = c.benchmark_group("dot_product");

    for size in [16usize, 256, 4096] {
        let xs: Vec<f64> = (0..size).map(|i| i as f64 * 0.5).collect();
        let ys: Vec<f64> = (0..size).map(|i| 1.0 / (i as f64 + 1.0)).collect();
        let cxs: Vec<CountedFloat> = xs.iter().copied().map(CountedFloat::new).collect();
        let cys: Vec<CountedFloat> = ys.iter().copied().map(CountedFloat::new).collect();

        group.bench_with_input(BenchmarkId::new("f64", size), &size, |bench, _| {
            bench.iter(|| xs.iter().zip(&ys).map(|(x, y)| x * y).sum::<f64>())
        });

        global_counter().reset();
        group.bench_with_input(BenchmarkId::new("counted", size), &size, |bench, _| {
            bench.iter(|| cxs.iter().zip(&cys).map(|(&x, &y)| x * y).sum::<CountedFloat>())
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_add, benchmark_nested_contexts, benchmark_dot_product);
criterion_main!(benches);
