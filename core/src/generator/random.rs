use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that keeps the starting cell (and optionally its neighbours) free, but
/// other than that is purely random.
///
/// Every bomb is drawn as an index among the cells still free, so generation always terminates
/// after exactly `bombs` draws.
#[derive(Clone, Debug)]
pub struct RandomMinefieldGenerator {
    rng: SmallRng,
    start_tile: StartTile,
}

impl RandomMinefieldGenerator {
    pub fn new(seed: u64, start_tile: StartTile) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            start_tile,
        }
    }

    pub fn start_tile(&self) -> StartTile {
        self.start_tile
    }
}

impl MinefieldGenerator for RandomMinefieldGenerator {
    fn generate(&mut self, config: GameConfig, excluded: Coordinate) -> Result<Vec<Coordinate>> {
        let GameConfig { rows, cols, bombs } = config;
        if !excluded.is_within_bounds(rows, cols) {
            return Err(GameError::InvalidCoords);
        }

        let total_cells = config.total_cells();
        if bombs >= total_cells {
            return Err(GameError::TooManyBombs {
                bombs,
                cells: total_cells,
            });
        }

        let zone = excluded.neighbors(rows, cols).count() as CellCount;
        let actual_start_tile = match self.start_tile {
            StartTile::AlwaysZero if bombs + 1 + zone > total_cells => {
                log::warn!("Cannot make start cell zero, fallback to simple safe");
                StartTile::SimpleSafe
            }
            start_tile => start_tile,
        };

        // cells that can no longer receive a bomb
        let mut taken: Array2<bool> = Array2::default([rows as usize, cols as usize]);
        taken[excluded.to_nd_index()] = true;
        let mut free_cells = total_cells - 1;
        if actual_start_tile == StartTile::AlwaysZero {
            for pos in excluded.neighbors(rows, cols) {
                taken[pos.to_nd_index()] = true;
            }
            free_cells -= zone;
        }

        let mut placed = Vec::with_capacity(bombs as usize);
        while placed.len() < bombs as usize {
            let pick = self.rng.random_range(0..free_cells) as usize;
            let ((row, col), slot) = taken
                .indexed_iter_mut()
                .filter(|(_, taken)| !**taken)
                .nth(pick)
                .ok_or(GameError::InvalidLayout)?;
            *slot = true;
            free_cells -= 1;
            placed.push(Coordinate::new(row as Coord, col as Coord));
        }

        log::trace!(
            "Generated {} bombs around start {:?} ({:?})",
            placed.len(),
            excluded,
            actual_start_tile
        );
        Ok(placed)
    }
}
