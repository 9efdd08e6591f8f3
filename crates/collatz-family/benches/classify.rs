//! Benchmarks for single-value classification and range sweeps.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use collatz_family::{canonicalize, run_sweep, Classifier, Family, FingerprintMode, SweepConfig};
use num_bigint::BigInt;

// ============================================================================
// Benchmark: one walk per family
// ============================================================================

fn bench_classify(c: &mut Criterion) {
    let mut group = c.benchmark_group("classify");
    for family in Family::ALL {
        let classifier = Classifier::new(family, 1000).with_unknown_cycles(true);
        for start in [27i64, -17, 77_031, i64::MAX] {
            let n = BigInt::from(start);
            group.bench_with_input(
                BenchmarkId::new(family.to_string(), start),
                &n,
                |b, n| b.iter(|| classifier.classify(black_box(n))),
            );
        }
    }
    group.finish();
}

// ============================================================================
// Benchmark: fingerprinting
// ============================================================================

fn bench_canonicalize(c: &mut Criterion) {
    let seven: Vec<BigInt> = [-25, -37, -55, -41, -61, -91, -17]
        .map(BigInt::from)
        .to_vec();
    let mut group = c.benchmark_group("canonicalize");
    group.bench_function("signed_7", |b| {
        b.iter(|| canonicalize(black_box(&seven), FingerprintMode::Signed))
    });
    group.bench_function("absolute_7", |b| {
        b.iter(|| canonicalize(black_box(&seven), FingerprintMode::Absolute))
    });
    group.finish();
}

// ============================================================================
// Benchmark: sweeps, sequential vs pooled
// ============================================================================

fn bench_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep");
    group.sample_size(10);
    group.throughput(Throughput::Elements(20_001));
    for workers in [1usize, 4] {
        let config = SweepConfig {
            family: Family::W_PLUS,
            lo: -10_000,
            hi: 10_000,
            cap: 1000,
            workers,
            ..SweepConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("w_plus", workers), &config, |b, cfg| {
            b.iter(|| run_sweep(black_box(cfg)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_classify, bench_canonicalize, bench_sweep);
criterion_main!(benches);
