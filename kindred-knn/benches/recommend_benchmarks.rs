//! Criterion benchmarks for the user-based recommender.
//!
//! Measures request latency across user counts (100, 1 000, 5 000) against
//! a prebuilt matrix, plus matrix construction for the same tables.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package kindred-knn
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use kindred_core::{DEFAULT_NEIGHBOURS, DEFAULT_RESULTS, RatingMatrix, UserId};
use kindred_knn::recommend;

mod bench_support;

use bench_support::{BENCHMARK_SEED, generate_ratings};

/// User counts to benchmark.
const USER_COUNTS: &[u64] = &[100, 1_000, 5_000];

/// Size of the item catalogue shared by every benchmark table.
const ITEM_COUNT: u64 = 500;

/// Benchmark one recommendation request for a fixed user.
fn bench_recommend(c: &mut Criterion) {
    let mut group = c.benchmark_group("recommend");
    group.sample_size(50);
    group.measurement_time(Duration::from_secs(5));

    for &users in USER_COUNTS {
        let table = generate_ratings(users, ITEM_COUNT, BENCHMARK_SEED);
        let Ok(matrix) = RatingMatrix::from_table(&table) else {
            continue;
        };
        let target = UserId::new(1);

        group.throughput(Throughput::Elements(users));
        group.bench_with_input(BenchmarkId::new("users", users), &matrix, |b, m| {
            b.iter(|| recommend(m, target, DEFAULT_NEIGHBOURS, DEFAULT_RESULTS));
        });
    }

    group.finish();
}

/// Benchmark building the matrix from a rating table.
fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_matrix");
    group.sample_size(20);

    for &users in USER_COUNTS {
        let table = generate_ratings(users, ITEM_COUNT, BENCHMARK_SEED);
        group.throughput(Throughput::Elements(users));
        group.bench_with_input(BenchmarkId::new("users", users), &table, |b, t| {
            b.iter(|| RatingMatrix::from_table(t));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_recommend, bench_build);
criterion_main!(benches);
