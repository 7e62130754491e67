//! An exact cover solver built on Knuth's Algorithm DLX ("dancing links").
//!
//! The problem is a 0/1 matrix: columns are constraints that must each be
//! satisfied exactly once, rows are candidate choices. A solution is a set
//! of rows whose `1`s hit every column exactly once. The matrix is stored
//! sparsely as toroidal doubly-linked lists so the backtracking search can
//! remove and restore rows and columns without copying anything.
//!
//! See Knuth, "Dancing Links" (arXiv cs/0011047).
//!
//! # Example
//! ```
//! use euler::math::exact_cover::{Coordinate, ExactCover};
//!
//! //      0  1  2
//! // R0   1  0  1
//! // R1   0  1  0
//! // R2   1  1  0
//! let mut ec = ExactCover::new(3, 3);
//! ec.set(0, 0, true);
//! ec.set(2, 0, true);
//! ec.set(1, 1, true);
//! ec.set(0, 2, true);
//! ec.set(1, 2, true);
//!
//! ec.solve(false);
//! assert_eq!(ec.solution_rows(), vec![vec![0, 1]]);
//!
//! let mut cells = ec.solutions().remove(0);
//! cells.sort();
//! assert_eq!(
//!     cells,
//!     vec![
//!         Coordinate { col: 0, row: 0 },
//!         Coordinate { col: 1, row: 1 },
//!         Coordinate { col: 2, row: 0 },
//!     ]
//! );
//! ```
use log::{debug, trace};

mod links;
mod selection;

use links::{Links, NodeKind};
pub use selection::ColumnSelection;

/// A `(column, row)` position in the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Coordinate {
    pub col: usize,
    pub row: usize,
}

/// The `1` cells of every row selected by one solution, row by row in
/// selection order and column order within a row.
pub type Solution = Vec<Coordinate>;

/// Counters gathered during the most recent search.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Search tree nodes visited, the root included.
    pub nodes: u64,
    /// Nodes unlinked from a column by cover operations.
    pub updates: u64,
}

/// A generic exact cover problem and its solver.
///
/// Indices outside the matrix never panic: mutators ignore them and queries
/// answer `false` or `None`.
#[derive(Clone, Debug)]
pub struct ExactCover {
    links: Links,
    columns: usize,
    rows: usize,
    selection: ColumnSelection,
    /// Rows chosen by each solution, in selection order.
    solution_rows: Vec<Vec<usize>>,
    /// The cells of those rows as they were when the solution was found.
    solutions: Vec<Solution>,
    stats: SearchStats,
}

impl Default for ExactCover {
    fn default() -> Self {
        ExactCover::new(0, 0)
    }
}

impl ExactCover {
    /// Creates an all-zero `columns x rows` matrix. If either dimension is
    /// zero the structure is empty.
    pub fn new(columns: usize, rows: usize) -> Self {
        let mut ec = ExactCover {
            links: Links::new(0, 0),
            columns: 0,
            rows: 0,
            selection: ColumnSelection::default(),
            solution_rows: Vec::new(),
            solutions: Vec::new(),
            stats: SearchStats::default(),
        };
        ec.set_size(columns, rows);
        ec
    }

    /// Uses `selection` to choose branching columns.
    pub fn with_selection(mut self, selection: ColumnSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn selection(&self) -> ColumnSelection {
        self.selection
    }

    pub fn set_selection(&mut self, selection: ColumnSelection) {
        self.selection = selection;
    }

    /// Drops every node and solution; the dimensions become `0 x 0`.
    pub fn clear(&mut self) {
        self.links = Links::new(0, 0);
        self.columns = 0;
        self.rows = 0;
        self.clear_solutions();
    }

    /// Replaces the matrix with an all-zero `columns x rows` one. Any
    /// previous `1`s are lost.
    pub fn set_size(&mut self, columns: usize, rows: usize) {
        self.clear();
        if columns == 0 || rows == 0 {
            return;
        }
        self.links = Links::new(columns, rows);
        self.columns = columns;
        self.rows = rows;
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.columns == 0 || self.rows == 0
    }

    fn in_range(&self, col: usize, row: usize) -> bool {
        col < self.columns && row < self.rows
    }

    /// Returns the bit at `(col, row)`, or `false` if it is out of range.
    pub fn get(&self, col: usize, row: usize) -> bool {
        self.in_range(col, row) && self.links.is_live(col, row)
    }

    /// Sets the bit at `(col, row)`. Out-of-range positions are ignored.
    pub fn set(&mut self, col: usize, row: usize, value: bool) {
        if !self.in_range(col, row) {
            return;
        }
        if value {
            self.links.insert(col, row);
        } else {
            self.links.remove(col, row);
        }
    }

    /// Number of `1`s in column `col`, or `None` if it does not exist.
    pub fn column_size(&self, col: usize) -> Option<usize> {
        self.links.size(col)
    }

    /// The label of column `col`; defaults to its index.
    pub fn column_name(&self, col: usize) -> Option<i64> {
        self.links.name(col)
    }

    pub fn set_column_name(&mut self, col: usize, name: i64) {
        self.links.set_name(col, name);
    }

    /// Finds every exact cover, or only the first when `stop_at_first` is
    /// set. Results replace those of any previous call.
    pub fn solve(&mut self, stop_at_first: bool) {
        self.solve_with_limit(if stop_at_first { Some(1) } else { None });
    }

    /// Finds at most `limit` exact covers (all of them for `None`).
    ///
    /// Exact cover is NP-complete: the running time is exponential in the
    /// worst case and there is no way to interrupt a search in progress.
    pub fn solve_with_limit(&mut self, limit: Option<usize>) {
        self.clear_solutions();
        self.stats = SearchStats::default();
        if self.is_empty() || limit == Some(0) {
            return;
        }

        debug!(
            "solving {}x{} exact cover ({:?}, limit {:?})",
            self.columns, self.rows, self.selection, limit
        );
        let mut partial = Vec::new();
        self.search(&mut partial, limit);
        debug!(
            "found {} solution(s) in {} nodes, {} updates",
            self.solutions.len(),
            self.stats.nodes,
            self.stats.updates
        );
    }

    fn limit_reached(&self, limit: Option<usize>) -> bool {
        limit.is_some_and(|limit| self.solutions.len() >= limit)
    }

    /// Algorithm X over the dancing links; `partial` holds one node of each
    /// row chosen so far.
    fn search(&mut self, partial: &mut Vec<usize>, limit: Option<usize>) {
        self.stats.nodes += 1;

        if self.links.all_covered() {
            self.record(partial);
            return;
        }

        let Some(col) = self.selection.select(&self.links) else {
            return;
        };
        self.stats.updates += self.links.cover(col);

        let header = Links::header(col);
        let mut r = self.links.down(header);
        while r != header {
            partial.push(r);

            let mut j = self.links.right(r);
            while j != r {
                let sibling = self.links.column_of(j);
                self.stats.updates += self.links.cover(sibling);
                j = self.links.right(j);
            }

            self.search(partial, limit);

            let mut j = self.links.left(r);
            while j != r {
                let sibling = self.links.column_of(j);
                self.links.uncover(sibling);
                j = self.links.left(j);
            }

            partial.pop();
            if self.limit_reached(limit) {
                break;
            }
            r = self.links.down(r);
        }

        self.links.uncover(col);
    }

    /// Stores the rows of `partial`, one data node per row, and their cells.
    /// Covering never touches the horizontal links, so every row is whole.
    fn record(&mut self, partial: &[usize]) {
        let rows: Vec<usize> = partial.iter().map(|&node| self.links.row_of(node)).collect();
        trace!("solution {}: rows {:?}", self.solutions.len(), rows);
        let cells = rows.iter().flat_map(|&row| self.row_cells(row)).collect();
        self.solutions.push(cells);
        self.solution_rows.push(rows);
    }

    /// The solutions found by the last [`solve`](Self::solve), as the cells
    /// of the selected rows. Empty if nothing has been solved.
    ///
    /// The cells are those the rows held during that search; later calls to
    /// [`set`](Self::set) do not change them.
    pub fn solutions(&self) -> Vec<Solution> {
        self.solutions.clone()
    }

    /// The row indices selected by each solution, in selection order.
    pub fn solution_rows(&self) -> Vec<Vec<usize>> {
        self.solution_rows.clone()
    }

    pub fn clear_solutions(&mut self) {
        self.solution_rows.clear();
        self.solutions.clear();
    }

    /// Counters from the last search.
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn row_cells(&self, row: usize) -> Vec<Coordinate> {
        let mut cells = Vec::new();
        let Some(head) = self.links.row_head(row) else {
            return cells;
        };
        let mut node = head;
        loop {
            debug_assert_eq!(self.links.kind(node), NodeKind::Data);
            cells.push(Coordinate {
                col: self.links.column_of(node),
                row,
            });
            node = self.links.right(node);
            if node == head {
                break;
            }
        }
        cells
    }
}
