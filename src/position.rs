use std::fmt;

use crate::bitboard::Bitboard;

pub const BOARD_SIZE: u8 = 8;

/// A square on the board. `col` is the x coordinate, `row` the y coordinate;
/// the matching bit index is `col + 8 * row`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub col: u8,
    pub row: u8,
}

impl Position {
    pub fn new(col: u8, row: u8) -> Self {
        Position { col, row }
    }

    pub fn from_index(index: usize) -> Self {
        debug_assert!(index < 64);
        Position {
            col: (index % BOARD_SIZE as usize) as u8,
            row: (index / BOARD_SIZE as usize) as u8,
        }
    }

    /// The square of a single-bit mask, or `None` unless exactly one bit is set.
    pub fn from_bitboard(bb: Bitboard) -> Option<Self> {
        if bb.is_single() {
            bb.highest_bit_index().map(Self::from_index)
        } else {
            None
        }
    }

    pub fn to_index(&self) -> usize {
        self.row as usize * BOARD_SIZE as usize + self.col as usize
    }

    pub fn to_bitboard(&self) -> Bitboard {
        Bitboard::single(self.to_index())
    }

    pub fn is_valid(&self) -> bool {
        self.col < BOARD_SIZE && self.row < BOARD_SIZE
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}
