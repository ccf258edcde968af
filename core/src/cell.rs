use serde::{Deserialize, Serialize};

/// State of a single grid slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub(crate) bomb: bool,
    pub(crate) flagged: bool,
    pub(crate) open: bool,
    pub(crate) adjacent_bombs: u8,
}

impl Cell {
    pub const fn is_bomb(self) -> bool {
        self.bomb
    }

    pub const fn is_flagged(self) -> bool {
        self.flagged
    }

    pub const fn is_open(self) -> bool {
        self.open
    }

    /// Number of bombs among the up to 8 neighbours.
    pub const fn adjacent_bombs(self) -> u8 {
        self.adjacent_bombs
    }

    pub const fn symbol(self) -> CellSymbol {
        match (self.open, self.flagged) {
            (true, _) if self.bomb => CellSymbol::Bomb,
            (true, _) if self.adjacent_bombs > 0 => CellSymbol::Digit(self.adjacent_bombs),
            (true, _) => CellSymbol::Blank,
            (false, true) => CellSymbol::Flag,
            (false, false) => CellSymbol::Closed,
        }
    }
}

/// What the player gets to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellSymbol {
    Closed,
    Flag,
    Blank,
    Digit(u8),
    Bomb,
}

impl CellSymbol {
    pub const fn as_char(self) -> char {
        match self {
            Self::Closed => '.',
            Self::Flag => '?',
            Self::Blank => ' ',
            Self::Digit(n) => (b'0' + n) as char,
            Self::Bomb => '*',
        }
    }
}
