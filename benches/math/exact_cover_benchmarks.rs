//! Benchmarks for the dancing links exact cover solver.
//!
//! # Benchmarks
//!
//! - **`knuth_example`**: the 7-column, 6-row matrix from Knuth's paper.
//! - **`random/<selection>`**: enumerates every cover of seeded random
//!   sparse matrices, once per column selection policy.
//! - **`limit`**: the same matrices, stopping at the first cover.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench exact_cover
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use euler::math::exact_cover::{ColumnSelection, ExactCover};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const SEEDS: [u64; 3] = [7, 42, 1234];

fn knuth_example() -> ExactCover {
    let rows: [&[usize]; 6] = [
        &[2, 4, 5],
        &[0, 3, 6],
        &[1, 2, 5],
        &[0, 3],
        &[1, 6],
        &[3, 4, 6],
    ];
    let mut ec = ExactCover::new(7, rows.len());
    for (row, cols) in rows.iter().enumerate() {
        for &col in cols.iter() {
            ec.set(col, row, true);
        }
    }
    ec
}

fn random_matrix(seed: u64, columns: usize, rows: usize) -> ExactCover {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut ec = ExactCover::new(columns, rows);
    for row in 0..rows {
        for col in 0..columns {
            if rng.gen_bool(0.15) {
                ec.set(col, row, true);
            }
        }
    }
    ec
}

fn bench_knuth_example(c: &mut Criterion) {
    c.bench_function("knuth_example", |b| {
        b.iter_batched(
            knuth_example,
            |mut ec| {
                ec.solve(false);
                black_box(ec.solution_rows())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("random");
    for selection in [ColumnSelection::SmallestSize, ColumnSelection::FirstUncovered] {
        for seed in SEEDS {
            let ec = random_matrix(seed, 24, 60).with_selection(selection);
            group.bench_with_input(
                BenchmarkId::new(format!("{:?}", selection), format!("seed_{seed}")),
                &ec,
                |b, ec| {
                    b.iter_batched(
                        || ec.clone(),
                        |mut ec| {
                            ec.solve(false);
                            black_box(ec.stats().nodes)
                        },
                        BatchSize::SmallInput,
                    );
                },
            );
        }
    }
    group.finish();
}

fn bench_limit(c: &mut Criterion) {
    for seed in SEEDS {
        let ec = random_matrix(seed, 24, 60);
        c.bench_with_input(BenchmarkId::new("limit", format!("seed_{seed}")), &ec, |b, ec| {
            b.iter_batched(
                || ec.clone(),
                |mut ec| {
                    ec.solve_with_limit(Some(1));
                    black_box(ec.solution_rows())
                },
                BatchSize::SmallInput,
            );
        });
    }
}

criterion_group!(benches, bench_knuth_example, bench_random, bench_limit);
criterion_main!(benches);
