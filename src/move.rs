use crate::bitboard::Bitboard;
use crate::position::Position;

/// A turn as seen by the game loop: a disc placement, or a pass when the
/// side to move has no candidate square.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Place { col: u8, row: u8 },
    Pass,
}

impl Move {
    pub fn place(col: u8, row: u8) -> Self {
        Move::Place { col, row }
    }

    pub fn pass() -> Self {
        Move::Pass
    }

    /// Placement on the square of a single-bit mask.
    pub fn from_bitboard(bb: Bitboard) -> Option<Self> {
        Position::from_bitboard(bb).map(|pos| Move::place(pos.col, pos.row))
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Move::Pass)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            Move::Place { col, row } => Some(Position::new(*col, *row)),
            Move::Pass => None,
        }
    }

    /// Single-bit mask of the placement square; empty for a pass.
    pub fn to_bitboard(&self) -> Bitboard {
        self.position()
            .filter(Position::is_valid)
            .map(|pos| pos.to_bitboard())
            .unwrap_or_default()
    }

    pub fn col(&self) -> Option<u8> {
        match self {
            Move::Place { col, .. } => Some(*col),
            Move::Pass => None,
        }
    }

    pub fn row(&self) -> Option<u8> {
        match self {
            Move::Place { row, .. } => Some(*row),
            Move::Pass => None,
        }
    }

    /// Action index: the square's bit index, 64 for a pass.
    pub fn to_action(&self) -> usize {
        match self.position() {
            Some(pos) => pos.to_index(),
            None => PASS_ACTION,
        }
    }

    pub fn from_action(action: usize) -> Option<Self> {
        match action {
            PASS_ACTION => Some(Move::Pass),
            a if a < PASS_ACTION => {
                let pos = Position::from_index(a);
                Some(Move::place(pos.col, pos.row))
            }
            _ => None,
        }
    }
}

pub const PASS_ACTION: usize = 64;

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Move::Place { col, row } => write!(f, "Place({}, {})", col, row),
            Move::Pass => write!(f, "Pass"),
        }
    }
}
