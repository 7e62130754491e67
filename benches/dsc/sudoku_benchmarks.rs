//! Benchmarks for solving Sudoku through exact cover.
//!
//! # Benchmarks
//!
//! - **`sudoku_encode`**: builds the 324-column matrix for a puzzle.
//! - **`sudoku_solve`**: encodes and solves a single puzzle.
//! - **`sudoku_batch`**: solves copies of the puzzles on the rayon pool.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench sudoku
//! ```

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use euler::sudoku::{batch, Puzzle};

const PUZZLES: &str = "Grid 01
003020600
900305001
001806400
008102900
700000008
006708200
002609500
800203009
005010300
Grid 02
200080300
060070084
030500209
000105408
000000000
402706000
301007040
720040060
004010003
";

fn load() -> Vec<Puzzle> {
    Puzzle::from_text(PUZZLES).unwrap()
}

fn bench_encode(c: &mut Criterion) {
    for puzzle in load() {
        c.bench_with_input(
            BenchmarkId::new("sudoku_encode", puzzle.name()),
            &puzzle,
            |b, puzzle| b.iter(|| black_box(puzzle.exact_cover())),
        );
    }
}

fn bench_solve(c: &mut Criterion) {
    for puzzle in load() {
        c.bench_with_input(
            BenchmarkId::new("sudoku_solve", puzzle.name()),
            &puzzle,
            |b, puzzle| {
                b.iter_batched(
                    || puzzle.clone(),
                    |mut puzzle| puzzle.solve().unwrap(),
                    BatchSize::SmallInput,
                );
            },
        );
    }
}

fn bench_batch(c: &mut Criterion) {
    let puzzles: Vec<Puzzle> = load().into_iter().cycle().take(50).collect();
    c.bench_function("sudoku_batch", |b| {
        b.iter_batched(
            || puzzles.clone(),
            |mut puzzles| batch::top_left_sum(&mut puzzles).unwrap(),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(benches, bench_encode, bench_solve, bench_batch);
criterion_main!(benches);
