use thiserror::Error;

/// Errors raised while reading or solving puzzles.
#[derive(Debug, Error)]
pub enum Error {
    #[error("expected a multiple of {expected} lines, found {found} lines")]
    LineCount { expected: usize, found: usize },

    #[error("line {line}: expected {expected} digits, found {found}")]
    RowLength {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("line {line}: invalid puzzle character '{character}'")]
    InvalidCharacter { line: usize, character: char },

    #[error("invalid digit {0}, expected 0-9")]
    InvalidDigit(u8),

    #[error("digit {digit} at ({x}, {y}) repeats a given in the same row, column or box")]
    ConflictingGiven { x: usize, y: usize, digit: u8 },

    #[error("puzzle '{0}' has no solution")]
    Unsolvable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
