//! Sudoku puzzles, solved by reduction to exact cover.
//!
//! A puzzle becomes a 324-column [`ExactCover`] problem: four blocks of 81
//! columns say that every cell holds a digit, and that every row, column and
//! 3x3 box holds each digit once. Each candidate placement `(cell, digit)`
//! is one matrix row with a `1` in exactly one column of each block. Givens
//! contribute a single row, empty cells one row per digit still open.
//!
//! Before encoding, cells that logic alone decides are filled in (naked and
//! hidden singles, narrowed by naked pairs). Many puzzles are solved
//! outright this way and never reach the search.
//!
//! # Example
//! ```
//! use euler::sudoku::Puzzle;
//!
//! let text = "Grid 01
//! 003020600
//! 900305001
//! 001806400
//! 008102900
//! 700000008
//! 006708200
//! 002609500
//! 800203009
//! 005010300
//! ";
//! let mut puzzles = Puzzle::from_text(text).unwrap();
//! let solution = puzzles[0].solve().unwrap();
//! assert_eq!(solution[0], [4, 8, 3, 9, 2, 1, 6, 5, 7]);
//! assert_eq!(puzzles[0].top_left_number(), Some(483));
//! ```

use log::{debug, trace, warn};

use crate::error::{Error, Result};
use crate::math::exact_cover::{ExactCover, SearchStats};

pub mod batch;

/// Width and height of a puzzle.
pub const PUZZLE_SIZE: usize = 9;
const BOX_SIZE: usize = 3;
const CELLS: usize = PUZZLE_SIZE * PUZZLE_SIZE;
// Each puzzle is a name line followed by one line per row of digits.
const LINES_PER_PUZZLE: usize = PUZZLE_SIZE + 1;

const CELL_COLUMNS: usize = 0;
const ROW_COLUMNS: usize = CELLS;
const COLUMN_COLUMNS: usize = 2 * CELLS;
const BOX_COLUMNS: usize = 3 * CELLS;
/// Number of exact cover columns a puzzle encodes to.
pub const CONSTRAINT_COLUMNS: usize = 4 * CELLS;

/// Puzzle values indexed `[y][x]`, with `0` for an empty cell.
pub type Grid = [[u8; PUZZLE_SIZE]; PUZZLE_SIZE];

/// Digits still allowed in a cell, one bit per digit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct DigitState(u16);

impl Default for DigitState {
    fn default() -> Self {
        DigitState(0x1FF)
    }
}

impl DigitState {
    fn mask(digit: u8) -> u16 {
        1 << (digit - 1)
    }

    fn is_open(self, digit: u8) -> bool {
        self.0 & Self::mask(digit) != 0
    }

    fn close(&mut self, digit: u8) {
        self.0 &= !Self::mask(digit);
    }

    fn open_digits(self) -> Vec<u8> {
        (1..=PUZZLE_SIZE as u8).filter(|&d| self.is_open(d)).collect()
    }

    fn single_digit(self) -> Option<u8> {
        (self.0.count_ones() == 1).then(|| self.0.trailing_zeros() as u8 + 1)
    }

    fn count(self) -> u32 {
        self.0.count_ones()
    }
}

type DigitStates = [[DigitState; PUZZLE_SIZE]; PUZZLE_SIZE];

/// A row, column or box: nine cells that must hold nine different digits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum House {
    Row(usize),
    Column(usize),
    Box(usize),
}

impl House {
    fn all() -> impl Iterator<Item = House> {
        (0..PUZZLE_SIZE).flat_map(|i| [House::Row(i), House::Column(i), House::Box(i)])
    }

    fn containing(x: usize, y: usize) -> [House; 3] {
        [House::Row(y), House::Column(x), House::Box(box_of(x, y))]
    }

    /// The `(x, y)` positions of the house's cells.
    fn cells(self) -> [(usize, usize); PUZZLE_SIZE] {
        let mut cells = [(0, 0); PUZZLE_SIZE];
        for (i, cell) in cells.iter_mut().enumerate() {
            *cell = match self {
                House::Row(y) => (i, y),
                House::Column(x) => (x, i),
                House::Box(b) => (
                    b % BOX_SIZE * BOX_SIZE + i % BOX_SIZE,
                    b / BOX_SIZE * BOX_SIZE + i / BOX_SIZE,
                ),
            };
        }
        cells
    }
}

/// Closes `digit` in every cell sharing a row, column or box with `(x, y)`.
fn close_houses(states: &mut DigitStates, x: usize, y: usize, digit: u8) {
    for house in House::containing(x, y) {
        for (cx, cy) in house.cells() {
            states[cy][cx].close(digit);
        }
    }
}

fn box_of(x: usize, y: usize) -> usize {
    (y / BOX_SIZE) * BOX_SIZE + x / BOX_SIZE
}

/// Working copy of a puzzle: the digits placed so far and, for each empty
/// cell, the digits it can still take. Filled cells have no open digits.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Board {
    values: Grid,
    states: DigitStates,
}

impl Board {
    fn new(values: &Grid, states: &DigitStates) -> Board {
        let mut board = Board {
            values: *values,
            states: *states,
        };
        for y in 0..PUZZLE_SIZE {
            for x in 0..PUZZLE_SIZE {
                if values[y][x] != 0 {
                    board.states[y][x] = DigitState(0);
                }
            }
        }
        board
    }

    fn place(&mut self, x: usize, y: usize, digit: u8) {
        self.values[y][x] = digit;
        close_houses(&mut self.states, x, y, digit);
        self.states[y][x] = DigitState(0);
    }

    fn is_complete(&self) -> bool {
        self.values.iter().flatten().all(|&value| value != 0)
    }

    /// The digit an empty cell must take: its only open digit, or a digit
    /// no other cell of one of its houses can take.
    fn forced_digit(&self, x: usize, y: usize) -> Option<u8> {
        let state = self.states[y][x];
        if let Some(digit) = state.single_digit() {
            return Some(digit);
        }
        House::containing(x, y).into_iter().find_map(|house| {
            let elsewhere = house
                .cells()
                .into_iter()
                .filter(|&cell| cell != (x, y))
                .fold(0, |acc, (cx, cy)| acc | self.states[cy][cx].0);
            DigitState(state.0 & !elsewhere).single_digit()
        })
    }

    /// Places forced digits until none are left. Returns the number placed.
    fn fill_singles(&mut self) -> usize {
        let mut placed = 0;
        loop {
            let before = placed;
            for y in 0..PUZZLE_SIZE {
                for x in 0..PUZZLE_SIZE {
                    if self.values[y][x] != 0 {
                        continue;
                    }
                    if let Some(digit) = self.forced_digit(x, y) {
                        self.place(x, y, digit);
                        placed += 1;
                    }
                }
            }
            if placed == before {
                return placed;
            }
        }
    }

    /// Naked pairs: when two cells of a house have the same two open digits,
    /// no other cell of that house can take either. Returns whether any
    /// digit was closed.
    fn eliminate_pairs(&mut self) -> bool {
        let mut changed = false;
        for house in House::all() {
            let cells = house.cells();
            for (i, &(x, y)) in cells.iter().enumerate() {
                let pair = self.states[y][x];
                if pair.count() != 2 {
                    continue;
                }
                let Some(&twin) = cells[i + 1..]
                    .iter()
                    .find(|&&(cx, cy)| self.states[cy][cx] == pair)
                else {
                    continue;
                };
                for &(cx, cy) in &cells {
                    if (cx, cy) == (x, y) || (cx, cy) == twin {
                        continue;
                    }
                    let state = &mut self.states[cy][cx];
                    if state.0 & pair.0 != 0 {
                        state.0 &= !pair.0;
                        changed = true;
                    }
                }
            }
        }
        changed
    }

    /// Alternates single filling and pair elimination until neither makes
    /// progress.
    fn reduce(&mut self) {
        let mut placed = 0;
        loop {
            placed += self.fill_singles();
            if !self.eliminate_pairs() {
                break;
            }
        }
        trace!("reduction placed {} digits", placed);
    }
}

/// One placement of a digit in a cell; a row of the exact cover matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Candidate {
    x: usize,
    y: usize,
    digit: u8,
}

impl Candidate {
    fn columns(self) -> [usize; 4] {
        let d = usize::from(self.digit - 1);
        [
            CELL_COLUMNS + self.y * PUZZLE_SIZE + self.x,
            ROW_COLUMNS + self.y * PUZZLE_SIZE + d,
            COLUMN_COLUMNS + self.x * PUZZLE_SIZE + d,
            BOX_COLUMNS + box_of(self.x, self.y) * PUZZLE_SIZE + d,
        ]
    }
}

/// Candidates in row-major cell order: the placed digit for filled cells,
/// every open digit for empty ones. An empty cell with no open digit gets
/// no candidate, which leaves its cell column uncoverable.
fn candidates(board: &Board) -> Vec<Candidate> {
    let mut candidates = Vec::with_capacity(CELLS * PUZZLE_SIZE);
    for (y, row) in board.values.iter().enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value != 0 {
                candidates.push(Candidate { x, y, digit: value });
            } else {
                let open = board.states[y][x].open_digits();
                candidates.extend(open.into_iter().map(|digit| Candidate { x, y, digit }));
            }
        }
    }
    candidates
}

/// Builds the exact cover matrix for `board`; matrix row `i` stands for
/// `candidates[i]`.
fn encode(board: &Board) -> (ExactCover, Vec<Candidate>) {
    let candidates = candidates(board);
    let mut exact_cover = ExactCover::new(CONSTRAINT_COLUMNS, candidates.len());
    for (row, candidate) in candidates.iter().enumerate() {
        for col in candidate.columns() {
            exact_cover.set(col, row, true);
        }
    }
    (exact_cover, candidates)
}

fn parse_row(line: usize, text: &str) -> Result<[u8; PUZZLE_SIZE]> {
    let found = text.chars().count();
    if found != PUZZLE_SIZE {
        return Err(Error::RowLength {
            line,
            expected: PUZZLE_SIZE,
            found,
        });
    }

    let mut row = [0; PUZZLE_SIZE];
    for (value, character) in row.iter_mut().zip(text.chars()) {
        let digit = character
            .to_digit(10)
            .ok_or(Error::InvalidCharacter { line, character })?;
        *value = digit as u8;
    }
    Ok(row)
}

/// The three-digit number in the top-left corner of a grid.
pub fn top_left(grid: &Grid) -> u64 {
    grid[0][..3]
        .iter()
        .fold(0, |acc, &digit| acc * 10 + u64::from(digit))
}

/// A named 9x9 Sudoku puzzle and, once solved, its solution.
#[derive(Clone, Debug)]
pub struct Puzzle {
    name: String,
    values: Grid,
    states: DigitStates,
    solution: Option<Grid>,
    search: SearchStats,
}

impl Puzzle {
    /// Creates a puzzle from its values, `0` marking empty cells.
    ///
    /// Fails on digits above 9 and on givens that repeat a digit within a
    /// row, column or box.
    pub fn new(name: impl Into<String>, values: Grid) -> Result<Puzzle> {
        let mut states = [[DigitState::default(); PUZZLE_SIZE]; PUZZLE_SIZE];
        for (y, row) in values.iter().enumerate() {
            for (x, &digit) in row.iter().enumerate() {
                if digit as usize > PUZZLE_SIZE {
                    return Err(Error::InvalidDigit(digit));
                }
                if digit == 0 {
                    continue;
                }
                if !states[y][x].is_open(digit) {
                    return Err(Error::ConflictingGiven { x, y, digit });
                }
                close_houses(&mut states, x, y, digit);
            }
        }

        Ok(Puzzle {
            name: name.into(),
            values,
            states,
            solution: None,
            search: SearchStats::default(),
        })
    }

    /// Parses every puzzle in `text`: a name line (e.g. `Grid 01`) followed
    /// by nine lines of nine digits, repeated. Blank lines are skipped.
    pub fn from_text(text: &str) -> Result<Vec<Puzzle>> {
        let lines: Vec<(usize, &str)> = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim_end()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        if lines.len() % LINES_PER_PUZZLE != 0 {
            return Err(Error::LineCount {
                expected: LINES_PER_PUZZLE,
                found: lines.len(),
            });
        }

        lines
            .chunks(LINES_PER_PUZZLE)
            .map(|chunk| {
                let (_, name) = chunk[0];
                let mut values: Grid = [[0; PUZZLE_SIZE]; PUZZLE_SIZE];
                for (row, &(line, text)) in values.iter_mut().zip(&chunk[1..]) {
                    *row = parse_row(line, text)?;
                }
                Puzzle::new(name, values)
            })
            .collect()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Width (and height) of the puzzle.
    pub fn size(&self) -> usize {
        PUZZLE_SIZE
    }

    pub fn values(&self) -> &Grid {
        &self.values
    }

    /// The given digit at `(x, y)`, where the origin is the top-left cell.
    /// `None` for empty or out-of-range cells.
    pub fn value(&self, x: usize, y: usize) -> Option<u8> {
        self.values
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .filter(|&value| value != 0)
    }

    fn state(&self, x: usize, y: usize) -> Option<DigitState> {
        if self.value(x, y).is_some() {
            return None;
        }
        self.states.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Digits the givens in the cell's row, column and box still allow.
    /// Empty for filled cells.
    pub fn open_digits(&self, x: usize, y: usize) -> Vec<u8> {
        self.state(x, y)
            .map(DigitState::open_digits)
            .unwrap_or_default()
    }

    /// The only digit allowed in an empty cell, if exactly one is.
    pub fn single_digit(&self, x: usize, y: usize) -> Option<u8> {
        self.state(x, y).and_then(DigitState::single_digit)
    }

    fn reduced_board(&self) -> Board {
        let mut board = Board::new(&self.values, &self.states);
        board.reduce();
        board
    }

    /// The grid after filling every cell that logic alone decides (naked
    /// and hidden singles, with naked pairs narrowing the candidates), `0`
    /// where a guess is still needed.
    pub fn reduced(&self) -> Grid {
        self.reduced_board().values
    }

    /// This puzzle, after reduction, encoded as an exact cover problem.
    pub fn exact_cover(&self) -> ExactCover {
        encode(&self.reduced_board()).0
    }

    /// Solves the puzzle, keeping the first solution found. Later calls
    /// return the stored solution.
    ///
    /// Cells are filled by logic first; the exact cover search only runs
    /// if that leaves the grid incomplete.
    pub fn solve(&mut self) -> Result<Grid> {
        if let Some(solution) = self.solution {
            return Ok(solution);
        }

        let board = self.reduced_board();
        if board.is_complete() {
            debug!("solved puzzle '{}' without search", self.name);
            self.search = SearchStats::default();
            self.solution = Some(board.values);
            return Ok(board.values);
        }

        let (mut exact_cover, candidates) = encode(&board);
        exact_cover.solve(true);
        self.search = exact_cover.stats().clone();
        let Some(rows) = exact_cover.solution_rows().into_iter().next() else {
            warn!("puzzle '{}' has no solution", self.name);
            return Err(Error::Unsolvable(self.name.clone()));
        };

        let mut solution: Grid = [[0; PUZZLE_SIZE]; PUZZLE_SIZE];
        for row in rows {
            let Candidate { x, y, digit } = candidates[row];
            solution[y][x] = digit;
        }
        debug!(
            "solved puzzle '{}' in {} search nodes",
            self.name,
            exact_cover.stats().nodes
        );

        self.solution = Some(solution);
        Ok(solution)
    }

    /// Counters of the exact cover search run by [`solve`](Self::solve);
    /// all zero when logic alone solved the puzzle.
    pub fn search_stats(&self) -> &SearchStats {
        &self.search
    }

    /// The solution, once [`solve`](Self::solve) has succeeded.
    pub fn solution(&self) -> Option<&Grid> {
        self.solution.as_ref()
    }

    /// The three-digit number at the top left of the solution.
    pub fn top_left_number(&self) -> Option<u64> {
        self.solution.as_ref().map(top_left)
    }
}
