pub mod exact_cover;

pub use exact_cover::{ColumnSelection, Coordinate, ExactCover, SearchStats, Solution};
