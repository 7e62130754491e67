pub mod dsc;
pub mod error;
pub mod math;

pub use dsc::sudoku;
pub use error::{Error, Result};
pub use math::exact_cover;
