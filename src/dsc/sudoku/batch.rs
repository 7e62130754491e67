//! Solving many puzzles at once.
//!
//! Puzzles are spread over the rayon thread pool. Every puzzle builds and
//! owns its own [`ExactCover`](crate::math::exact_cover::ExactCover), so
//! workers share nothing but the slice being split between them.

use log::debug;
use rayon::prelude::*;

use super::{top_left, Puzzle};
use crate::error::Result;

/// Solves every puzzle in parallel, stopping at the first failure.
pub fn solve_all(puzzles: &mut [Puzzle]) -> Result<()> {
    debug!(
        "solving {} puzzles on {} threads",
        puzzles.len(),
        rayon::current_num_threads()
    );
    puzzles
        .par_iter_mut()
        .try_for_each(|puzzle| puzzle.solve().map(drop))
}

/// Solves every puzzle and sums the three-digit numbers in the top-left
/// corners of their solutions.
pub fn top_left_sum(puzzles: &mut [Puzzle]) -> Result<u64> {
    debug!("summing top-left numbers of {} puzzles", puzzles.len());
    puzzles
        .par_iter_mut()
        .map(|puzzle| puzzle.solve().map(|solution| top_left(&solution)))
        .sum()
}
