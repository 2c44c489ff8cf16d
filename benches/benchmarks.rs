//! Benchmark suite for the Echo Chamber predictor.
//!
//! - Validation of long progressions (accepted and rejected)
//! - Prediction with history growth
//! - Parsing of comma separated input
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench
//! cargo bench -- --save-baseline main
//! cargo bench -- --baseline main
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use echo_chamber::sequence::parse_list;
use echo_chamber::SequencePredictor;

fn progression(len: usize, step: f64) -> Vec<f64> {
    (0..len).map(|i| 3.0 + step * i as f64).collect()
}

// ============================================================================
// Validation Benchmarks
// ============================================================================

fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("validate");
    let predictor = SequencePredictor::new();

    for size in [10, 1_000, 100_000] {
        let valid = progression(size, 3.0);
        let mut broken = valid.clone();
        broken[size - 1] += 1.0;

        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("arithmetic", size), &valid, |b, seq| {
            b.iter(|| black_box(predictor.validate(black_box(seq))));
        });
        group.bench_with_input(BenchmarkId::new("not_arithmetic", size), &broken, |b, seq| {
            b.iter(|| black_box(predictor.validate(black_box(seq))));
        });
    }

    group.finish();
}

// ============================================================================
// Prediction Benchmarks
// ============================================================================

fn bench_predict(c: &mut Criterion) {
    let mut group = c.benchmark_group("predict");

    for size in [10, 1_000] {
        let seq = progression(size, -2.0);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("with_history", size), &seq, |b, seq| {
            let mut predictor = SequencePredictor::new();
            b.iter(|| {
                let result = predictor.predict(black_box(seq));
                if predictor.count() >= 10_000 {
                    predictor.clear();
                }
                black_box(result)
            });
        });
    }

    group.finish();
}

// ============================================================================
// Input Parsing Benchmarks
// ============================================================================

fn bench_parse_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_list");

    for size in [10, 1_000] {
        let text = progression(size, 7.0)
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &text, |b, text| {
            b.iter(|| black_box(parse_list(black_box(text))));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_predict, bench_parse_list);
criterion_main!(benches);
