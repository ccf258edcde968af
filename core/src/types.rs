use core::cmp::Ordering;
use core::ops::{Add, AddAssign};
use serde::{Deserialize, Serialize};

/// Single coordinate axis used for rows, columns and movement offsets.
pub type Coord = i32;

/// Count type used for bomb counts and total-cell counts.
pub type CellCount = u32;

/// Multiplies two board sides into a cell count, treating negative sides as empty.
pub const fn mult(a: Coord, b: Coord) -> CellCount {
    if a <= 0 || b <= 0 {
        return 0;
    }
    (a as CellCount).saturating_mul(b as CellCount)
}

/// A `(row, col)` position on the board, or an offset between two positions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub row: Coord,
    pub col: Coord,
}

impl Coordinate {
    pub const ORIGIN: Self = Self::new(0, 0);
    pub const UP: Self = Self::new(-1, 0);
    pub const DOWN: Self = Self::new(1, 0);
    pub const LEFT: Self = Self::new(0, -1);
    pub const RIGHT: Self = Self::new(0, 1);

    pub const fn new(row: Coord, col: Coord) -> Self {
        Self { row, col }
    }

    /// Clamps each axis independently into the inclusive ranges.
    ///
    /// When a range is empty (`min > max`) the axis ends up at `max`.
    pub fn clamp(self, min_row: Coord, max_row: Coord, min_col: Coord, max_col: Coord) -> Self {
        Self::new(
            self.row.max(min_row).min(max_row),
            self.col.max(min_col).min(max_col),
        )
    }

    /// Clamps into `[0, rows) × [0, cols)`.
    pub fn clamp_to(self, rows: Coord, cols: Coord) -> Self {
        self.clamp(0, rows - 1, 0, cols - 1)
    }

    pub const fn is_within_bounds(self, rows: Coord, cols: Coord) -> bool {
        0 <= self.row && self.row < rows && 0 <= self.col && self.col < cols
    }

    pub const fn magnitude_squared(self) -> i64 {
        let row = self.row as i64;
        let col = self.col as i64;
        row * row + col * col
    }

    /// Iterates over the up to 8 in-bounds neighbours of this position.
    pub fn neighbors(self, rows: Coord, cols: Coord) -> NeighborIter {
        NeighborIter::new(self, (rows, cols))
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl AddAssign for Coordinate {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl From<(Coord, Coord)> for Coordinate {
    fn from((row, col): (Coord, Coord)) -> Self {
        Self::new(row, col)
    }
}

/// Orders by squared distance from the origin, ties broken by row then column.
impl Ord for Coordinate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.magnitude_squared()
            .cmp(&other.magnitude_squared())
            .then(self.row.cmp(&other.row))
            .then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for Coordinate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coordinate {
    type Output = [usize; 2];

    /// Only meaningful for in-bounds coordinates.
    fn to_nd_index(self) -> Self::Output {
        [self.row as usize, self.col as usize]
    }
}

const DISPLACEMENTS: [Coordinate; 8] = [
    Coordinate::new(-1, -1),
    Coordinate::new(-1, 0),
    Coordinate::new(-1, 1),
    Coordinate::new(0, -1),
    Coordinate::new(0, 1),
    Coordinate::new(1, -1),
    Coordinate::new(1, 0),
    Coordinate::new(1, 1),
];

#[derive(Debug)]
pub struct NeighborIter {
    center: Coordinate,
    bounds: (Coord, Coord),
    index: u8,
}

impl NeighborIter {
    fn new(center: Coordinate, bounds: (Coord, Coord)) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coordinate;

    fn next(&mut self) -> Option<Self::Item> {
        let (rows, cols) = self.bounds;
        while let Some(&delta) = DISPLACEMENTS.get(usize::from(self.index)) {
            self.index += 1;
            let next_item = self.center + delta;
            if next_item.is_within_bounds(rows, cols) {
                return Some(next_item);
            }
        }
        None
    }
}
