use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Chooses where the bombs of a board go.
///
/// Implementations return exactly `config.bombs` distinct in-bounds coordinates, none of which is
/// `excluded`.
pub trait MinefieldGenerator {
    fn generate(&mut self, config: GameConfig, excluded: Coordinate) -> Result<Vec<Coordinate>>;
}

/// How much of the area around the first opened cell is kept free of bombs.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StartTile {
    /// Only the opened cell itself.
    #[default]
    SimpleSafe,
    /// The opened cell and its neighbours, so the first open always floods.
    AlwaysZero,
}
