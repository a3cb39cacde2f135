use thiserror::Error;

use crate::position::Position;

/// Errors surfaced to callers of the engine. None of them leave the engine
/// in a corrupted state; the offending call simply has no effect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The square is not among the mover's candidates.
    #[error("illegal move at {0}")]
    IllegalMove(Position),

    /// A move mask must name exactly one square.
    #[error("move mask {0:#018x} does not name exactly one square")]
    NotASingleSquare(u64),

    /// Passing is only allowed when no placement exists.
    #[error("cannot pass while {0} legal placements exist")]
    PassNotAllowed(u32),

    #[error("the game is already over")]
    GameOver,

    /// Both players claim the same square.
    #[error("square {0} is occupied by both players")]
    OverlappingDiscs(Position),

    #[error("invalid board string: {0}")]
    InvalidBoardString(String),

    #[error("invalid search config: {0}")]
    InvalidConfig(String),
}
