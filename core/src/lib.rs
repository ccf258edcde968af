#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use error::*;
pub use frontend::*;
pub use generator::*;
pub use session::*;
pub use types::*;

mod board;
mod cell;
mod error;
mod frontend;
mod generator;
mod session;
mod types;

/// Largest accepted number of rows or columns.
pub const MAX_SIDE: Coord = 1024;

/// Board dimensions and bomb count for one session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub rows: Coord,
    pub cols: Coord,
    pub bombs: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(rows: Coord, cols: Coord, bombs: CellCount) -> Self {
        Self { rows, cols, bombs }
    }

    /// Validates the dimensions and makes sure at least one cell stays free of bombs.
    pub fn new(rows: Coord, cols: Coord, bombs: CellCount) -> Result<Self> {
        if !(1..=MAX_SIDE).contains(&rows) || !(1..=MAX_SIDE).contains(&cols) {
            return Err(GameError::InvalidSize { rows, cols });
        }
        let cells = mult(rows, cols);
        if bombs >= cells {
            return Err(GameError::TooManyBombs { bombs, cells });
        }
        Ok(Self::new_unchecked(rows, cols, bombs))
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(10, 10, 10)
    }
}
