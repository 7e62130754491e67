//! Data structures for specific puzzles, built on the generic solvers in
//! [`crate::math`].

pub mod sudoku;

pub use sudoku::{Grid, Puzzle};
