//! Criterion benchmarks for valuegen_core.
//!
//! Measures the raw bit source and the exact conversions the engines lean
//! on when producing floats and decimals.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use num_bigint::BigInt;
use rand::RngCore;
use valuegen_core::rng::{IsaacRng, EXAMPLE_SEED};
use valuegen_core::types::{BigDecimal, BinaryFraction};

/// Benchmark word and byte throughput of the ISAAC bit source.
fn bench_isaac(c: &mut Criterion) {
    let mut group = c.benchmark_group("isaac");

    group.bench_function("seed", |b| {
        b.iter(|| IsaacRng::new(black_box(&EXAMPLE_SEED)).unwrap());
    });

    let mut rng = IsaacRng::new(&EXAMPLE_SEED).unwrap();
    group.bench_function("next_word", |b| {
        b.iter(|| black_box(rng.next_word()));
    });

    for size in [64usize, 1024, 16384] {
        let mut buffer = vec![0u8; size];
        group.bench_with_input(BenchmarkId::new("fill_bytes", size), &size, |b, _| {
            b.iter(|| rng.fill_bytes(black_box(&mut buffer)));
        });
    }

    group.finish();
}

/// Benchmark binary fraction arithmetic and float rounding.
fn bench_binary_fraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("binary_fraction");

    for bits in [32u32, 256, 2048] {
        let mantissa = (BigInt::from(1) << bits) - 1;
        let x = BinaryFraction::new(mantissa, -(bits as i32) / 2);
        let y = BinaryFraction::new(BigInt::from(3), -7);

        group.bench_with_input(BenchmarkId::new("add", bits), &x, |b, x| {
            b.iter(|| black_box(x).add(black_box(&y)));
        });
        group.bench_with_input(BenchmarkId::new("to_float_nearest", bits), &x, |b, x| {
            b.iter(|| black_box(x).to_float_nearest::<f64>());
        });
        group.bench_with_input(BenchmarkId::new("to_big_decimal", bits), &x, |b, x| {
            b.iter(|| black_box(x).to_big_decimal());
        });
    }

    group.finish();
}

/// Benchmark decimal canonicalisation and formatting.
fn bench_decimal(c: &mut Criterion) {
    let mut group = c.benchmark_group("decimal");

    for zeros in [1u32, 16, 128] {
        let x = BigDecimal::new(BigInt::from(7) * BigInt::from(10).pow(zeros), 3);
        group.bench_with_input(BenchmarkId::new("canonical", zeros), &x, |b, x| {
            b.iter(|| black_box(x).canonical());
        });
        group.bench_with_input(BenchmarkId::new("to_string", zeros), &x, |b, x| {
            b.iter(|| black_box(x).to_string());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_isaac, bench_binary_fraction, bench_decimal);
criterion_main!(benches);
