//! Depth-limited negamax with alpha-beta pruning, and the root driver that
//! picks the computer's move.
//!
//! Every score is from the point of view of the side to move at the node
//! that produced it. A child's score is negated on the way up and the
//! `(alpha, beta)` window is negated and swapped on the way down.
//!
//! The search is fail-soft: a node returns the best score it actually saw,
//! which may lie outside the window it was given, but is never the window
//! bound itself unless some explored line produced that exact value.

use std::fmt;

use log::{debug, trace};

use crate::bitboard::Bitboard;
use crate::board::Board;
use crate::error::EngineError;
use crate::eval::{terminal_score, EvalStrategy, EvalWeights, Evaluator};
use crate::movegen::{candidates, flips};
use crate::player::Player;
use crate::position::Position;
use crate::r#move::Move;

pub const DEFAULT_DEPTH: u8 = 3;

/// Deepest allowed search. A game never lasts more than 60 plies.
pub const MAX_DEPTH: u8 = 60;

/// When the remaining depth is decremented.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DepthPolicy {
    /// Once per round of two plies; a depth of `n` looks `2n` plies past the
    /// root move.
    #[default]
    PerRound,
    /// Once per ply.
    PerPly,
}

/// Everything the computer player needs to choose a move.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub depth: u8,
    pub strategy: EvalStrategy,
    pub weights: EvalWeights,
    pub depth_policy: DepthPolicy,
    /// Disable to search every branch with an open window.
    pub pruning: bool,
}

impl SearchConfig {
    pub fn new(depth: u8) -> Self {
        SearchConfig {
            depth,
            ..Self::default()
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_strategy(mut self, strategy: EvalStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_weights(mut self, weights: EvalWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_depth_policy(mut self, depth_policy: DepthPolicy) -> Self {
        self.depth_policy = depth_policy;
        self
    }

    pub fn with_pruning(mut self, pruning: bool) -> Self {
        self.pruning = pruning;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.depth > MAX_DEPTH {
            return Err(EngineError::InvalidConfig(format!(
                "depth {} exceeds the maximum of {}",
                self.depth, MAX_DEPTH
            )));
        }
        self.evaluator().map(|_| ())
    }

    pub fn evaluator(&self) -> Result<Evaluator, EngineError> {
        Evaluator::new(self.strategy, self.weights)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            depth: DEFAULT_DEPTH,
            strategy: EvalStrategy::default(),
            weights: EvalWeights::default(),
            depth_policy: DepthPolicy::default(),
            pruning: true,
        }
    }
}

/// The move chosen by [`best_move`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SearchResult {
    pub best_move: Move,
    /// Single-bit mask of the chosen square.
    pub square: Bitboard,
    /// Score of the chosen move for the side that plays it.
    pub score: f64,
    /// Board after the move is applied.
    pub board: Board,
    /// Nodes visited below the root.
    pub nodes: u64,
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Move: {}, Score: {:.4}, Nodes: {}",
            self.best_move, self.score, self.nodes
        )
    }
}

struct Searcher {
    evaluator: Evaluator,
    depth_policy: DepthPolicy,
    pruning: bool,
    nodes: u64,
}

impl Searcher {
    fn new(config: &SearchConfig) -> Result<Self, EngineError> {
        config.validate()?;
        Ok(Searcher {
            evaluator: config.evaluator()?,
            depth_policy: config.depth_policy,
            pruning: config.pruning,
            nodes: 0,
        })
    }

    /// Remaining depth for the children of a node at `ply` (`depth > 0`).
    #[inline]
    fn child_depth(&self, depth: u8, ply: u32) -> u8 {
        match self.depth_policy {
            DepthPolicy::PerPly => depth - 1,
            DepthPolicy::PerRound => depth - (ply % 2) as u8,
        }
    }

    fn negamax(
        &mut self,
        mine: Bitboard,
        theirs: Bitboard,
        depth: u8,
        ply: u32,
        mut alpha: f64,
        beta: f64,
    ) -> f64 {
        self.nodes += 1;

        if depth == 0 {
            return self.evaluator.evaluate(mine, theirs);
        }

        let moves = candidates(mine, theirs);
        let next_depth = self.child_depth(depth, ply);

        if moves.is_empty() {
            if candidates(theirs, mine).is_empty() {
                return terminal_score(mine, theirs);
            }
            // Pass: same discs, the other side moves
            return -self.negamax(theirs, mine, next_depth, ply + 1, -beta, -alpha);
        }

        let mut best = f64::NEG_INFINITY;
        for mv in moves.iter_squares() {
            let flipped = flips(mine, theirs, mv);
            let score = -self.negamax(
                theirs ^ flipped,
                mine ^ flipped ^ mv,
                next_depth,
                ply + 1,
                -beta,
                -alpha,
            );
            if score > best {
                best = score;
            }
            if best > alpha {
                alpha = best;
            }
            if self.pruning && alpha >= beta {
                break;
            }
        }
        best
    }
}

/// Score `board` for `side`, which is to move, looking `depth` deep.
///
/// With pruning enabled in `config` the result is exact when it falls
/// strictly inside `(alpha, beta)` and a bound on the exact value otherwise.
pub fn search(
    board: &Board,
    side: Player,
    depth: u8,
    alpha: f64,
    beta: f64,
    config: &SearchConfig,
) -> Result<f64, EngineError> {
    let mut searcher = Searcher::new(&config.with_depth(depth))?;
    Ok(searcher.negamax(
        board.own(side),
        board.opponent(side),
        depth,
        0,
        alpha,
        beta,
    ))
}

/// Search every legal move of `side` and return the best one, or `None`
/// when `side` has to pass. Ties go to the move enumerated first (highest
/// square index first).
pub fn best_move(
    board: &Board,
    side: Player,
    config: &SearchConfig,
) -> Result<Option<SearchResult>, EngineError> {
    let mut searcher = Searcher::new(config)?;
    let mine = board.own(side);
    let theirs = board.opponent(side);

    let mut best: Option<(Bitboard, f64)> = None;
    for mv in candidates(mine, theirs).iter_squares() {
        let flipped = flips(mine, theirs, mv);
        // Only a child that beats the current best matters exactly
        let beta = match best {
            Some((_, best_score)) if config.pruning => -best_score,
            _ => f64::INFINITY,
        };
        let score = -searcher.negamax(
            theirs ^ flipped,
            mine ^ flipped ^ mv,
            config.depth,
            0,
            f64::NEG_INFINITY,
            beta,
        );
        trace!("{} considers {:?}: {:.4}", side, Position::from_bitboard(mv), score);
        if best.map_or(true, |(_, best_score)| score > best_score) {
            best = Some((mv, score));
        }
    }

    let Some((square, score)) = best else {
        debug!("{} has no legal move and passes", side);
        return Ok(None);
    };
    let best_move = Move::from_bitboard(square).ok_or(EngineError::NotASingleSquare(square.bits()))?;
    let result = SearchResult {
        best_move,
        square,
        score,
        board: board.apply_candidate(side, square),
        nodes: searcher.nodes,
    };
    debug!("{} chooses {}", side, result);
    Ok(Some(result))
}

/// Run the search for `side` and return the board after its chosen move.
/// The board comes back unchanged when `side` has to pass.
pub fn choose_computer_move(
    board: &Board,
    side: Player,
    config: &SearchConfig,
) -> Result<Board, EngineError> {
    Ok(best_move(board, side, config)?
        .map(|result| result.board)
        .unwrap_or(*board))
}
