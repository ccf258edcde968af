use alloc::collections::{BTreeSet, VecDeque};
use core::num::Saturating;
use ndarray::Array2;
use serde::Serialize;

use crate::*;

/// Outcome of opening a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OpenOutcome {
    AlreadyOpen,
    HitBomb,
    /// Number of cells opened by this call, flood-filled ones included.
    Revealed(CellCount),
}

/// Outcome of toggling a flag.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    NoOp,
    Flagged,
    Unflagged,
}

/// The grid of cells, with bomb placement and flood-fill.
///
/// Bombs are planted at most once. `opened_count` only ever counts safe cells, bombs opened by
/// [`Board::reveal_all_bombs`] are not included.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Board {
    rows: Coord,
    cols: Coord,
    bomb_count: CellCount,
    cells: Array2<Cell>,
    opened_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    /// flags sitting on safe cells
    misplaced_flags: Saturating<CellCount>,
    bombs_planted: bool,
}

impl Board {
    /// Creates an empty board, bombs are planted later with [`Board::plant_bombs`].
    pub fn new(config: GameConfig) -> Result<Self> {
        let config = GameConfig::new(config.rows, config.cols, config.bombs)?;
        Ok(Self {
            rows: config.rows,
            cols: config.cols,
            bomb_count: config.bombs,
            cells: Array2::default([config.rows as usize, config.cols as usize]),
            opened_count: Saturating(0),
            flagged_count: Saturating(0),
            misplaced_flags: Saturating(0),
            bombs_planted: false,
        })
    }

    /// Creates a board with bombs at exactly the given coordinates.
    pub fn from_bomb_coords(rows: Coord, cols: Coord, bombs: &[Coordinate]) -> Result<Self> {
        let count = bombs.len().try_into().map_err(|_| GameError::InvalidLayout)?;
        let mut board = Self::new(GameConfig::new_unchecked(rows, cols, count))?;
        let mut seen = BTreeSet::new();
        for &coords in bombs {
            let coords = board.validate_coords(coords)?;
            if !seen.insert(coords) {
                return Err(GameError::InvalidLayout);
            }
        }
        for &coords in bombs {
            board.place_bomb(coords);
        }
        board.bombs_planted = true;
        Ok(board)
    }

    pub fn rows(&self) -> Coord {
        self.rows
    }

    pub fn cols(&self) -> Coord {
        self.cols
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    pub fn bomb_count(&self) -> CellCount {
        self.bomb_count
    }

    pub fn opened_count(&self) -> CellCount {
        self.opened_count.0
    }

    pub fn flagged_count(&self) -> CellCount {
        self.flagged_count.0
    }

    /// Bombs minus flags, negative when the player over-flags.
    pub fn bombs_left(&self) -> i64 {
        i64::from(self.bomb_count) - i64::from(self.flagged_count.0)
    }

    pub fn bombs_planted(&self) -> bool {
        self.bombs_planted
    }

    pub fn validate_coords(&self, coords: Coordinate) -> Result<Coordinate> {
        if coords.is_within_bounds(self.rows, self.cols) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn cell(&self, coords: Coordinate) -> Result<Cell> {
        let coords = self.validate_coords(coords)?;
        Ok(self.cells[coords.to_nd_index()])
    }

    pub fn symbol_at(&self, coords: Coordinate) -> Result<CellSymbol> {
        self.cell(coords).map(Cell::symbol)
    }

    /// Iterates over all cells in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coordinate, Cell)> + '_ {
        self.cells
            .indexed_iter()
            .map(|((row, col), &cell)| (Coordinate::new(row as Coord, col as Coord), cell))
    }

    /// Plants `bomb_count` bombs chosen by `generator`, never on `excluded`.
    ///
    /// At least one cell has to stay free, so `bomb_count` must be below the cell count. The
    /// layout is checked before anything is written, a failing call leaves the board untouched.
    pub fn plant_bombs<G: MinefieldGenerator + ?Sized>(
        &mut self,
        bomb_count: CellCount,
        excluded: Coordinate,
        generator: &mut G,
    ) -> Result<()> {
        if self.bombs_planted {
            return Err(GameError::BombsAlreadyPlanted);
        }
        let excluded = self.validate_coords(excluded)?;
        let cells = self.total_cells();
        if bomb_count >= cells {
            return Err(GameError::TooManyBombs {
                bombs: bomb_count,
                cells,
            });
        }

        let config = GameConfig::new_unchecked(self.rows, self.cols, bomb_count);
        let layout = generator.generate(config, excluded)?;

        let mut seen = BTreeSet::new();
        for &coords in &layout {
            let coords = self.validate_coords(coords)?;
            if coords == excluded || !seen.insert(coords) {
                return Err(GameError::InvalidLayout);
            }
        }
        if seen.len() != bomb_count as usize {
            return Err(GameError::InvalidLayout);
        }

        for coords in layout {
            self.place_bomb(coords);
        }
        self.bomb_count = bomb_count;
        self.bombs_planted = true;
        log::debug!("Planted {} bombs, kept {:?} free", bomb_count, excluded);
        Ok(())
    }

    fn place_bomb(&mut self, coords: Coordinate) {
        let cell = &mut self.cells[coords.to_nd_index()];
        cell.bomb = true;
        if cell.flagged {
            self.misplaced_flags -= 1;
        }
        for pos in coords.neighbors(self.rows, self.cols) {
            self.cells[pos.to_nd_index()].adjacent_bombs += 1;
        }
    }

    /// Opens a cell, flood-filling through cells without adjacent bombs.
    ///
    /// A flag on the cell is cleared first. A bomb is reported but not opened, that is left to
    /// [`Board::reveal_all_bombs`].
    pub fn open_cell(&mut self, coords: Coordinate) -> Result<OpenOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if cell.open {
            return Ok(OpenOutcome::AlreadyOpen);
        }
        if cell.flagged {
            cell.flagged = false;
            self.flagged_count -= 1;
            if !cell.bomb {
                self.misplaced_flags -= 1;
            }
        }
        if cell.bomb {
            return Ok(OpenOutcome::HitBomb);
        }

        cell.open = true;
        let adjacent_bombs = cell.adjacent_bombs;
        self.opened_count += 1;
        let mut opened: CellCount = 1;

        if adjacent_bombs == 0 {
            let mut visited = BTreeSet::from([coords]);
            let mut to_visit: VecDeque<_> = coords.neighbors(self.rows, self.cols).collect();

            while let Some(visit_coords) = to_visit.pop_front() {
                if !visited.insert(visit_coords) {
                    continue;
                }

                let visit_cell = &mut self.cells[visit_coords.to_nd_index()];
                if visit_cell.open || visit_cell.bomb || visit_cell.flagged {
                    continue;
                }

                visit_cell.open = true;
                let visit_adjacent_bombs = visit_cell.adjacent_bombs;
                self.opened_count += 1;
                opened += 1;

                if visit_adjacent_bombs == 0 {
                    to_visit.extend(
                        visit_coords
                            .neighbors(self.rows, self.cols)
                            .filter(|pos| !visited.contains(pos)),
                    );
                }
            }
        }

        debug_assert!(self.opened_count.0 + self.flagged_count.0 <= self.total_cells());
        Ok(OpenOutcome::Revealed(opened))
    }

    pub fn toggle_flag(&mut self, coords: Coordinate) -> Result<FlagOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match (cell.open, cell.flagged) {
            (true, _) => FlagOutcome::NoOp,
            (false, false) => {
                cell.flagged = true;
                self.flagged_count += 1;
                if !cell.bomb {
                    self.misplaced_flags += 1;
                }
                FlagOutcome::Flagged
            }
            (false, true) => {
                cell.flagged = false;
                self.flagged_count -= 1;
                if !cell.bomb {
                    self.misplaced_flags -= 1;
                }
                FlagOutcome::Unflagged
            }
        })
    }

    /// Opens every bomb, dropping any flag on it. `opened_count` is left alone, and so are flags
    /// on safe cells.
    pub fn reveal_all_bombs(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.bomb) {
            if cell.flagged {
                cell.flagged = false;
                self.flagged_count -= 1;
            }
            cell.open = true;
        }
    }

    /// Whether every cell is either opened or flagged, with every flag sitting on a bomb.
    pub fn is_fully_cleared(&self) -> bool {
        self.misplaced_flags.0 == 0
            && self.opened_count.0 + self.flagged_count.0 == self.total_cells()
    }
}
