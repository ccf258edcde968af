use thiserror::Error;

use crate::{CellCount, Coord, MAX_SIDE};

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid board size {rows}x{cols}, each side must be between 1 and {max}", max = MAX_SIDE)]
    InvalidSize { rows: Coord, cols: Coord },
    #[error("Too many bombs, requested {bombs} but only {} of {cells} cells can hold one", .cells.saturating_sub(1))]
    TooManyBombs { bombs: CellCount, cells: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Bomb layout does not match the board")]
    InvalidLayout,
    #[error("Bombs were already planted on this board")]
    BombsAlreadyPlanted,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
