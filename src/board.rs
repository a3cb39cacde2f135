use std::fmt;
use std::str::FromStr;

use crate::bitboard::Bitboard;
use crate::error::EngineError;
use crate::movegen;
use crate::player::Player;
use crate::position::{Position, BOARD_SIZE};

/// Black on (4,3) and (3,4).
pub const INITIAL_BLACK: Bitboard = Bitboard((1 << (8 * 3 + 4)) | (1 << (8 * 4 + 3)));
/// White on (3,3) and (4,4).
pub const INITIAL_WHITE: Bitboard = Bitboard((1 << (8 * 4 + 4)) | (1 << (8 * 3 + 3)));

/// Disc placement of both players. Plain value data: every move produces a
/// new `Board`, the receiver is never modified.
///
/// The two bitboards never overlap.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    black: Bitboard,
    white: Bitboard,
}

impl Board {
    /// Board with no discs at all.
    pub const fn empty() -> Self {
        Board {
            black: Bitboard::empty(),
            white: Bitboard::empty(),
        }
    }

    /// Starting position: the centre four squares, colours diagonally opposed.
    pub const fn initial() -> Self {
        Board {
            black: INITIAL_BLACK,
            white: INITIAL_WHITE,
        }
    }

    pub fn from_bitboards(black: Bitboard, white: Bitboard) -> Result<Self, EngineError> {
        match (black & white).highest_bit_index() {
            Some(idx) => Err(EngineError::OverlappingDiscs(Position::from_index(idx))),
            None => Ok(Board { black, white }),
        }
    }

    /// Build a board from the two sides as seen by `side`.
    pub fn from_sides(side: Player, mine: Bitboard, theirs: Bitboard) -> Result<Self, EngineError> {
        match side {
            Player::Black => Self::from_bitboards(mine, theirs),
            Player::White => Self::from_bitboards(theirs, mine),
        }
    }

    #[inline]
    fn from_sides_unchecked(side: Player, mine: Bitboard, theirs: Bitboard) -> Self {
        debug_assert!((mine & theirs).is_empty());
        match side {
            Player::Black => Board {
                black: mine,
                white: theirs,
            },
            Player::White => Board {
                black: theirs,
                white: mine,
            },
        }
    }

    #[inline]
    pub fn black(&self) -> Bitboard {
        self.black
    }

    #[inline]
    pub fn white(&self) -> Bitboard {
        self.white
    }

    /// Discs of `side`.
    #[inline]
    pub fn own(&self, side: Player) -> Bitboard {
        match side {
            Player::Black => self.black,
            Player::White => self.white,
        }
    }

    /// Discs of the player facing `side`.
    #[inline]
    pub fn opponent(&self, side: Player) -> Bitboard {
        self.own(side.opposite())
    }

    #[inline]
    pub fn occupied(&self) -> Bitboard {
        self.black | self.white
    }

    #[inline]
    pub fn empty_squares(&self) -> Bitboard {
        !self.occupied()
    }

    pub fn disc_count(&self, side: Player) -> u32 {
        self.own(side).count()
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Player> {
        if pos.is_valid() {
            let idx = pos.to_index();
            if self.black.get(idx) {
                Some(Player::Black)
            } else if self.white.get(idx) {
                Some(Player::White)
            } else {
                None
            }
        } else {
            None
        }
    }

    pub fn set_piece(&mut self, pos: &Position, player: Option<Player>) {
        if pos.is_valid() {
            let idx = pos.to_index();
            self.black.clear(idx);
            self.white.clear(idx);
            match player {
                Some(Player::Black) => self.black.set(idx),
                Some(Player::White) => self.white.set(idx),
                None => {}
            }
        }
    }

    /// Squares where `side` may place a disc; empty when `side` must pass.
    #[inline]
    pub fn candidates(&self, side: Player) -> Bitboard {
        movegen::candidates(self.own(side), self.opponent(side))
    }

    pub fn has_candidates(&self, side: Player) -> bool {
        self.candidates(side).is_nonzero()
    }

    /// Neither player can place a disc.
    pub fn is_terminal(&self) -> bool {
        !self.has_candidates(Player::Black) && !self.has_candidates(Player::White)
    }

    /// Place a disc for `side` on the single square `mv`, returning the
    /// resulting board.
    pub fn apply_move(&self, side: Player, mv: Bitboard) -> Result<Board, EngineError> {
        let pos = Position::from_bitboard(mv).ok_or(EngineError::NotASingleSquare(mv.bits()))?;
        if (self.candidates(side) & mv).is_empty() {
            return Err(EngineError::IllegalMove(pos));
        }
        Ok(self.apply_candidate(side, mv))
    }

    /// `apply_move` without the legality check, for squares the caller took
    /// from `candidates` itself.
    #[inline]
    pub(crate) fn apply_candidate(&self, side: Player, mv: Bitboard) -> Board {
        let mine = self.own(side);
        let theirs = self.opponent(side);
        let flipped = movegen::flips(mine, theirs, mv);
        Board::from_sides_unchecked(side, mine ^ flipped ^ mv, theirs ^ flipped)
    }

    /// Compact 64-cell text form, row 0 first: `B`, `W` or `.` per square.
    pub fn to_compact_string(&self) -> String {
        (0..64)
            .map(|idx| match self.get_piece(&Position::from_index(idx)) {
                Some(player) => player.symbol(),
                None => '.',
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parses 64 cells (`B`/`X`, `W`/`O`, `.` or `-`), row 0 first. Whitespace is
    /// ignored so the cells may be laid out as an 8×8 grid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut board = Board::empty();
        let mut idx = 0;
        for c in s.chars().filter(|c| !c.is_whitespace()) {
            if idx >= 64 {
                return Err(EngineError::InvalidBoardString(format!(
                    "more than 64 cells in {:?}",
                    s
                )));
            }
            let piece = match c {
                '.' | '-' => None,
                other => Some(Player::from_symbol(other).ok_or_else(|| {
                    EngineError::InvalidBoardString(format!("unexpected cell {:?}", other))
                })?),
            };
            board.set_piece(&Position::from_index(idx), piece);
            idx += 1;
        }
        if idx != 64 {
            return Err(EngineError::InvalidBoardString(format!(
                "expected 64 cells, found {}",
                idx
            )));
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Column numbers
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;

        for row in 0..BOARD_SIZE {
            write!(f, "{}|", row)?;

            for col in 0..BOARD_SIZE {
                let pos = Position::new(col, row);
                let c = if let Some(player) = self.get_piece(&pos) {
                    player.symbol()
                } else {
                    '.'
                };

                write!(f, "{}", c)?;
                write!(f, "|")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}
