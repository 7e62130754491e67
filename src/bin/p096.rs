//! Project Euler problem 96: solve every Sudoku puzzle in a file and sum the
//! three-digit numbers in the top-left corners of the solutions.
//!
//! ```sh
//! RUST_LOG=debug cargo run --release --bin p096 -- sudoku.txt
//! ```

use std::env;
use std::fs;
use std::process::ExitCode;

use euler::sudoku::{batch, Puzzle};
use log::info;

const EXPECTED_RESULT: u64 = 24702;

fn run(path: &str) -> euler::Result<u64> {
    let text = fs::read_to_string(path)?;
    let mut puzzles = Puzzle::from_text(&text)?;
    info!("loaded {} puzzles from {}", puzzles.len(), path);
    batch::top_left_sum(&mut puzzles)
}

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = env::args().nth(1) else {
        eprintln!("usage: p096 <puzzle file>");
        return ExitCode::FAILURE;
    };

    match run(&path) {
        Ok(actual) => {
            println!("{}", actual);
            if actual == EXPECTED_RESULT {
                ExitCode::SUCCESS
            } else {
                eprintln!("expected {}, got {}", EXPECTED_RESULT, actual);
                ExitCode::FAILURE
            }
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
