//! Batch generation benchmark: sequential vs parallel record pipelines

use cane_decision_rust::{generate, generate_parallel, DecisionEngine, GeneratorConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::AtomicBool;

fn bench_generate(c: &mut Criterion) {
    let config = GeneratorConfig::default();
    let engine = DecisionEngine::default();

    let mut group = c.benchmark_group("generate");
    for n in [100usize, 1000, 10_000] {
        group.bench_with_input(BenchmarkId::new("sequential", n), &n, |b, &n| {
            b.iter(|| generate(black_box(n), &config, &engine).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("parallel", n), &n, |b, &n| {
            let cancel = AtomicBool::new(false);
            b.iter(|| generate_parallel(black_box(n), &config, &engine, &cancel).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
