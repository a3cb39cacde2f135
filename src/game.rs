use log::{debug, info};

use crate::board::Board;
use crate::error::EngineError;
use crate::outcome::GameOutcome;
use crate::player::Player;
use crate::position::Position;
use crate::r#move::Move;
use crate::search::{best_move, SearchConfig, SearchResult};

/// A game in progress: the board, whose turn it is, and whether it is over.
///
/// Black moves first. A side without a legal placement must pass; the game
/// ends as soon as neither side can place a disc.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    current_player: Player,
    is_over: bool,
    outcome: Option<GameOutcome>,
    consecutive_passes: u8,
    move_count: usize,
}

impl Game {
    pub fn new() -> Self {
        Self::from_board(Board::initial(), Player::FIRST)
    }

    /// Resume from an arbitrary position with `to_move` on turn.
    pub fn from_board(board: Board, to_move: Player) -> Self {
        let mut game = Game {
            board,
            current_player: to_move,
            is_over: false,
            outcome: None,
            consecutive_passes: 0,
            move_count: 0,
        };
        game.check_game_over();
        game
    }

    /// Back to the starting position.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Player {
        self.current_player
    }

    pub fn is_over(&self) -> bool {
        self.is_over
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    pub fn move_count(&self) -> usize {
        self.move_count
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    pub fn get_piece(&self, pos: &Position) -> Option<Player> {
        self.board.get_piece(pos)
    }

    /// Disc counts as `(black, white)`.
    pub fn score(&self) -> (u32, u32) {
        (
            self.board.disc_count(Player::Black),
            self.board.disc_count(Player::White),
        )
    }

    /// Placements for the side to move, highest square first. A pass is the
    /// only legal move when there are none.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_over {
            return Vec::new();
        }

        let moves: Vec<Move> = self
            .board
            .candidates(self.current_player)
            .iter_squares()
            .filter_map(Move::from_bitboard)
            .collect();

        if moves.is_empty() {
            vec![Move::pass()]
        } else {
            moves
        }
    }

    pub fn is_legal_move(&self, move_: &Move) -> bool {
        self.validate(move_).is_ok()
    }

    fn validate(&self, move_: &Move) -> Result<(), EngineError> {
        if self.is_over {
            return Err(EngineError::GameOver);
        }

        let candidates = self.board.candidates(self.current_player);
        match move_ {
            Move::Pass if candidates.is_nonzero() => {
                Err(EngineError::PassNotAllowed(candidates.count()))
            }
            Move::Pass => Ok(()),
            Move::Place { col, row } => {
                let pos = Position::new(*col, *row);
                if pos.is_valid() && (candidates & pos.to_bitboard()).is_nonzero() {
                    Ok(())
                } else {
                    Err(EngineError::IllegalMove(pos))
                }
            }
        }
    }

    /// Play `move_` for the side to move. Illegal moves leave the game
    /// untouched.
    pub fn make_move(&mut self, move_: &Move) -> Result<(), EngineError> {
        self.validate(move_)?;

        match move_ {
            Move::Pass => {
                self.consecutive_passes += 1;
                debug!("{} passes", self.current_player);
            }
            Move::Place { .. } => {
                self.consecutive_passes = 0;
                self.board = self
                    .board
                    .apply_move(self.current_player, move_.to_bitboard())?;
            }
        }

        self.move_count += 1;
        self.current_player = self.current_player.opposite();
        self.check_game_over();

        Ok(())
    }

    /// Let the engine choose and play a move for the side to move. Returns
    /// `None` when the engine had to pass.
    pub fn play_computer_move(
        &mut self,
        config: &SearchConfig,
    ) -> Result<Option<SearchResult>, EngineError> {
        if self.is_over {
            return Err(EngineError::GameOver);
        }

        let result = best_move(&self.board, self.current_player, config)?;
        let move_ = result.map_or(Move::Pass, |r| r.best_move);
        self.make_move(&move_)?;
        Ok(result)
    }

    fn check_game_over(&mut self) {
        if !self.is_over && self.board.is_terminal() {
            self.is_over = true;
            let outcome = GameOutcome::from_counts(
                self.board.disc_count(Player::Black),
                self.board.disc_count(Player::White),
            );
            self.outcome = Some(outcome);
            info!("game over after {} moves: {}", self.move_count, outcome);
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (black, white) = self.score();
        write!(
            f,
            "Game(turn: {}, black: {}, white: {}, is_over: {}, outcome: {:?})\n{}",
            self.current_player, black, white, self.is_over, self.outcome, self.board
        )
    }
}
