//! Static evaluation used at the search horizon.
//!
//! Scores are always from the point of view of the side to move and are
//! symmetric: swapping `mine` and `theirs` negates the score.

use crate::bitboard::{Bitboard, CORNER_MASK, EDGE_MASK};
use crate::error::EngineError;
use crate::movegen;

/// Largest possible mobility difference used for normalisation.
const MOBILITY_SPAN: f64 = 64.0;
const EDGE_SPAN: f64 = 24.0;
const CORNER_SPAN: f64 = 4.0;
const DISC_SPAN: f64 = 64.0;

/// How positions at the search horizon are scored.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EvalStrategy {
    /// Weighted mobility, edge and corner differences.
    #[default]
    Heuristic,
    /// Disc difference only.
    Material,
}

/// Relative weights of the heuristic terms.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EvalWeights {
    pub mobility: f64,
    pub edge: f64,
    pub corner: f64,
}

impl EvalWeights {
    pub const fn new(mobility: f64, edge: f64, corner: f64) -> Self {
        EvalWeights {
            mobility,
            edge,
            corner,
        }
    }

    /// Weighted score of a position where every term is at its maximum.
    fn span(&self) -> f64 {
        self.mobility * MOBILITY_SPAN + self.edge * EDGE_SPAN + self.corner * CORNER_SPAN
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        for (name, w) in [
            ("mobility", self.mobility),
            ("edge", self.edge),
            ("corner", self.corner),
        ] {
            if !w.is_finite() || w < 0.0 {
                return Err(EngineError::InvalidConfig(format!(
                    "{} weight must be a finite non-negative number, got {}",
                    name, w
                )));
            }
        }
        if self.span() <= 0.0 {
            return Err(EngineError::InvalidConfig(
                "at least one evaluation weight must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for EvalWeights {
    fn default() -> Self {
        EvalWeights::new(1.0, 4.0, 8.0)
    }
}

#[inline]
fn diff(mine: Bitboard, theirs: Bitboard) -> f64 {
    mine.count() as f64 - theirs.count() as f64
}

/// Final score of a finished game: any win ranks above every heuristic
/// value (which stays within [-1, 1]), larger margins rank higher.
#[inline]
pub fn terminal_score(mine: Bitboard, theirs: Bitboard) -> f64 {
    let d = diff(mine, theirs);
    if d == 0.0 {
        0.0
    } else {
        d.signum() + d / DISC_SPAN
    }
}

/// Disc difference scaled into [-1, 1].
#[inline]
pub fn material_score(mine: Bitboard, theirs: Bitboard) -> f64 {
    diff(mine, theirs) / DISC_SPAN
}

/// A configured evaluation function.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Evaluator {
    strategy: EvalStrategy,
    weights: EvalWeights,
    span: f64,
}

impl Evaluator {
    pub fn new(strategy: EvalStrategy, weights: EvalWeights) -> Result<Self, EngineError> {
        if strategy == EvalStrategy::Heuristic {
            weights.validate()?;
        }
        Ok(Evaluator {
            strategy,
            weights,
            span: weights.span(),
        })
    }

    pub fn strategy(&self) -> EvalStrategy {
        self.strategy
    }

    pub fn weights(&self) -> EvalWeights {
        self.weights
    }

    /// Score of the position for the side owning `mine`, which is to move.
    ///
    /// Finished games are scored with [`terminal_score`] whatever the strategy.
    pub fn evaluate(&self, mine: Bitboard, theirs: Bitboard) -> f64 {
        let my_moves = movegen::candidates(mine, theirs);
        let their_moves = movegen::candidates(theirs, mine);
        if my_moves.is_empty() && their_moves.is_empty() {
            return terminal_score(mine, theirs);
        }

        match self.strategy {
            EvalStrategy::Material => material_score(mine, theirs),
            EvalStrategy::Heuristic => {
                let mobility = diff(my_moves, their_moves);
                let edge = diff(mine & EDGE_MASK, theirs & EDGE_MASK);
                let corner = diff(mine & CORNER_MASK, theirs & CORNER_MASK);
                (self.weights.mobility * mobility
                    + self.weights.edge * edge
                    + self.weights.corner * corner)
                    / self.span
            }
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        let weights = EvalWeights::default();
        Evaluator {
            strategy: EvalStrategy::Heuristic,
            weights,
            span: weights.span(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::player::Player;

    fn sides(board: &Board, side: Player) -> (Bitboard, Bitboard) {
        (board.own(side), board.opponent(side))
    }

    #[test]
    fn test_initial_position_is_balanced() {
        let eval = Evaluator::default();
        let (mine, theirs) = sides(&Board::initial(), Player::Black);
        assert_eq!(eval.evaluate(mine, theirs), 0.0);
    }

    #[test]
    fn test_heuristic_is_antisymmetric() {
        let board: Board = "
            B.......
            .W......
            ..WB....
            ...WB...
            ...BWW..
            ........
            ......B.
            W......."
            .parse()
            .expect("valid board");
        let eval = Evaluator::default();
        let (b, w) = sides(&board, Player::Black);
        assert_eq!(eval.evaluate(b, w), -eval.evaluate(w, b));
        assert!(eval.evaluate(b, w).abs() <= 1.0);
    }

    #[test]
    fn test_corner_outweighs_edge() {
        // Same mobility, one side holds a corner, the other an edge square.
        let corner = Evaluator::new(EvalStrategy::Heuristic, EvalWeights::new(0.0, 4.0, 8.0))
            .expect("valid weights");
        let mine = Bitboard::single(0) | Bitboard::single(27);
        let theirs = Bitboard::single(3) | Bitboard::single(36);
        assert!(corner.evaluate(mine, theirs) > 0.0);
    }

    #[test]
    fn test_heuristic_value() {
        // Black: corner (0,0) + centre; White: edge (3,0) + centre.
        let mine = Bitboard::single(0) | Bitboard::single(27);
        let theirs = Bitboard::single(3) | Bitboard::single(28);
        let eval = Evaluator::default();
        let mobility = movegen::candidates(mine, theirs).count() as f64
            - movegen::candidates(theirs, mine).count() as f64;
        let expected = (mobility - 4.0 + 8.0) / (64.0 + 4.0 * 24.0 + 8.0 * 4.0);
        assert_eq!(eval.evaluate(mine, theirs), expected);
    }

    #[test]
    fn test_material_strategy() {
        let eval = Evaluator::new(EvalStrategy::Material, EvalWeights::new(0.0, 0.0, 0.0))
            .expect("weights are ignored for material");
        let board = Board::initial()
            .apply_move(Player::Black, Bitboard::single(26))
            .expect("legal move");
        let (b, w) = sides(&board, Player::Black);
        assert_eq!(eval.evaluate(b, w), 3.0 / 64.0);
        assert_eq!(eval.evaluate(w, b), -3.0 / 64.0);
    }

    #[test]
    fn test_terminal_score() {
        let full: Board = format!("{}{}", "B".repeat(40), "W".repeat(24))
            .parse()
            .expect("valid board");
        let (b, w) = sides(&full, Player::Black);
        let eval = Evaluator::default();
        assert_eq!(eval.evaluate(b, w), 1.0 + 16.0 / 64.0);
        assert_eq!(eval.evaluate(w, b), -(1.0 + 16.0 / 64.0));
        assert_eq!(terminal_score(Bitboard(0b1), Bitboard(0b10)), 0.0);
    }

    #[test]
    fn test_invalid_weights() {
        assert!(matches!(
            Evaluator::new(EvalStrategy::Heuristic, EvalWeights::new(0.0, 0.0, 0.0)),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            Evaluator::new(EvalStrategy::Heuristic, EvalWeights::new(-1.0, 4.0, 8.0)),
            Err(EngineError::InvalidConfig(_))
        ));
        assert!(matches!(
            Evaluator::new(EvalStrategy::Heuristic, EvalWeights::new(f64::NAN, 4.0, 8.0)),
            Err(EngineError::InvalidConfig(_))
        ));
    }
}
