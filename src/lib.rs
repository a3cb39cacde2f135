pub mod bitboard;
pub mod board;
pub mod error;
pub mod eval;
pub mod game;
pub mod movegen;
pub mod r#move;
pub mod outcome;
pub mod player;
pub mod position;
pub mod search;
pub mod turn_lock;

#[cfg(feature = "serde")]
pub mod serde_support;

pub use bitboard::Bitboard;
pub use board::Board;
pub use error::EngineError;
pub use player::Player;
pub use search::{choose_computer_move, SearchConfig};

#[cfg(feature = "python")]
extern crate pyo3;

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule(gil_used = false)]
fn spooky_reversi(m: &Bound<'_, PyModule>) -> PyResult<()> {
    use player::Player;
    use python_bindings::*;
    m.add_class::<PyBoard>()?;
    m.add_class::<PyGame>()?;
    m.add_class::<PyMove>()?;
    m.add_class::<PyGameOutcome>()?;
    m.add("BLACK", Player::Black.sign())?;
    m.add("WHITE", Player::White.sign())?;
    m.add("PASS_ACTION", r#move::PASS_ACTION)?;
    m.add("DEFAULT_DEPTH", search::DEFAULT_DEPTH)?;
    Ok(())
}

#[cfg(feature = "python")]
mod python_bindings {
    use super::*;
    use crate::board::Board;
    use crate::error::EngineError;
    use crate::game::Game;
    use crate::outcome::GameOutcome;
    use crate::player::Player;
    use crate::position::Position;
    use crate::r#move::Move;
    use crate::search::SearchConfig;
    use crate::turn_lock::TurnLock;

    impl From<EngineError> for PyErr {
        fn from(err: EngineError) -> Self {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
        }
    }

    fn player_from_sign(side: i8) -> PyResult<Player> {
        Player::from_sign(side).ok_or_else(|| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                "Invalid player value: {}",
                side
            ))
        })
    }

    fn config_for(depth: Option<u8>) -> SearchConfig {
        depth.map_or_else(SearchConfig::default, SearchConfig::new)
    }

    #[pyclass(name = "Board")]
    #[derive(Clone)]
    pub struct PyBoard {
        board: Board,
    }

    #[pymethods]
    impl PyBoard {
        #[new]
        pub fn new() -> Self {
            PyBoard {
                board: Board::initial(),
            }
        }

        #[staticmethod]
        pub fn empty() -> Self {
            PyBoard {
                board: Board::empty(),
            }
        }

        #[staticmethod]
        pub fn from_string(cells: &str) -> PyResult<Self> {
            Ok(PyBoard {
                board: cells.parse()?,
            })
        }

        pub fn get_piece(&self, col: u8, row: u8) -> Option<i8> {
            self.board
                .get_piece(&Position::new(col, row))
                .map(Player::sign)
        }

        pub fn set_piece(&mut self, col: u8, row: u8, piece: Option<i8>) -> PyResult<()> {
            let player = piece.map(player_from_sign).transpose()?;
            self.board.set_piece(&Position::new(col, row), player);
            Ok(())
        }

        pub fn black(&self) -> u64 {
            self.board.black().bits()
        }

        pub fn white(&self) -> u64 {
            self.board.white().bits()
        }

        pub fn candidates(&self, side: i8) -> PyResult<u64> {
            Ok(self.board.candidates(player_from_sign(side)?).bits())
        }

        pub fn candidate_squares(&self, side: i8) -> PyResult<Vec<(u8, u8)>> {
            Ok(self
                .board
                .candidates(player_from_sign(side)?)
                .iter_ones()
                .map(Position::from_index)
                .map(|p| (p.col, p.row))
                .collect())
        }

        pub fn apply_move(&self, side: i8, col: u8, row: u8) -> PyResult<PyBoard> {
            let board = self
                .board
                .apply_move(player_from_sign(side)?, Move::place(col, row).to_bitboard())?;
            Ok(PyBoard { board })
        }

        #[pyo3(signature = (side, depth=None))]
        pub fn choose_computer_move(&self, side: i8, depth: Option<u8>) -> PyResult<PyBoard> {
            let board = crate::search::choose_computer_move(
                &self.board,
                player_from_sign(side)?,
                &config_for(depth),
            )?;
            Ok(PyBoard { board })
        }

        pub fn disc_count(&self, side: i8) -> PyResult<u32> {
            Ok(self.board.disc_count(player_from_sign(side)?))
        }

        pub fn is_terminal(&self) -> bool {
            self.board.is_terminal()
        }

        pub fn to_compact_string(&self) -> String {
            self.board.to_compact_string()
        }

        pub fn __eq__(&self, other: &PyBoard) -> bool {
            self.board == other.board
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.board.hash(&mut hasher);
            hasher.finish()
        }

        pub fn __str__(&self) -> String {
            self.board.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("Board({:?})", self.board.to_compact_string())
        }
    }

    #[pyclass(name = "Game")]
    pub struct PyGame {
        game: Game,
        lock: TurnLock,
    }

    impl PyGame {
        fn busy() -> PyErr {
            PyErr::new::<pyo3::exceptions::PyRuntimeError, _>("a turn is already in progress")
        }
    }

    #[pymethods]
    impl PyGame {
        #[new]
        pub fn new() -> Self {
            PyGame {
                game: Game::new(),
                lock: TurnLock::new(),
            }
        }

        #[staticmethod]
        pub fn from_board(board: &PyBoard, to_move: i8) -> PyResult<Self> {
            Ok(PyGame {
                game: Game::from_board(board.board, player_from_sign(to_move)?),
                lock: TurnLock::new(),
            })
        }

        pub fn turn(&self) -> i8 {
            self.game.turn().sign()
        }

        pub fn is_over(&self) -> bool {
            self.game.is_over()
        }

        pub fn move_count(&self) -> usize {
            self.game.move_count()
        }

        pub fn score(&self) -> (u32, u32) {
            self.game.score()
        }

        pub fn get_piece(&self, col: u8, row: u8) -> Option<i8> {
            self.game
                .get_piece(&Position::new(col, row))
                .map(Player::sign)
        }

        pub fn board(&self) -> PyBoard {
            PyBoard {
                board: *self.game.board(),
            }
        }

        pub fn outcome(&self) -> Option<PyGameOutcome> {
            self.game.outcome().map(|o| PyGameOutcome { outcome: o })
        }

        pub fn reward_from_perspective(&self, perspective: i8) -> PyResult<f32> {
            let perspective = player_from_sign(perspective)?;
            Ok(self
                .game
                .outcome()
                .map(|o| o.encode_winner_from_perspective(perspective))
                .unwrap_or(0.0))
        }

        pub fn legal_moves(&self) -> Vec<PyMove> {
            self.game
                .legal_moves()
                .into_iter()
                .map(|m| PyMove { move_: m })
                .collect()
        }

        pub fn legal_action_indices(&self) -> Vec<usize> {
            self.game
                .legal_moves()
                .iter()
                .map(Move::to_action)
                .collect()
        }

        pub fn is_legal_move(&self, move_: &PyMove) -> bool {
            self.game.is_legal_move(&move_.move_)
        }

        pub fn make_move(&mut self, move_: &PyMove) -> PyResult<()> {
            let _guard = self.lock.try_acquire().ok_or_else(Self::busy)?;
            self.game.make_move(&move_.move_)?;
            Ok(())
        }

        pub fn apply_action(&mut self, action: usize) -> bool {
            let Some(_guard) = self.lock.try_acquire() else {
                return false;
            };
            match Move::from_action(action) {
                Some(move_) => self.game.make_move(&move_).is_ok(),
                None => false,
            }
        }

        /// Let the engine play for the side to move. Returns the move played.
        #[pyo3(signature = (depth=None))]
        pub fn computer_move(&mut self, depth: Option<u8>) -> PyResult<PyMove> {
            let _guard = self.lock.try_acquire().ok_or_else(Self::busy)?;
            let result = self.game.play_computer_move(&config_for(depth))?;
            Ok(PyMove {
                move_: result.map_or(Move::Pass, |r| r.best_move),
            })
        }

        pub fn reset(&mut self) -> PyResult<()> {
            let _guard = self.lock.try_acquire().ok_or_else(Self::busy)?;
            self.game.reset();
            Ok(())
        }

        pub fn __str__(&self) -> String {
            self.game.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!(
                "Game(turn={:?}, over={}, score={:?})",
                self.game.turn(),
                self.game.is_over(),
                self.game.score()
            )
        }
    }

    #[pyclass(name = "Move")]
    #[derive(Clone, Debug)]
    pub struct PyMove {
        move_: Move,
    }

    #[pymethods]
    impl PyMove {
        #[staticmethod]
        pub fn place(col: u8, row: u8) -> Self {
            PyMove {
                move_: Move::place(col, row),
            }
        }

        #[staticmethod]
        pub fn pass_move() -> Self {
            PyMove {
                move_: Move::pass(),
            }
        }

        pub fn is_pass(&self) -> bool {
            self.move_.is_pass()
        }

        pub fn col(&self) -> Option<u8> {
            self.move_.col()
        }

        pub fn row(&self) -> Option<u8> {
            self.move_.row()
        }

        pub fn action(&self) -> usize {
            self.move_.to_action()
        }

        #[staticmethod]
        pub fn from_action(action: usize) -> PyResult<Self> {
            match Move::from_action(action) {
                Some(mv) => Ok(PyMove { move_: mv }),
                _ => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(
                    "invalid action",
                )),
            }
        }

        pub fn __str__(&self) -> String {
            self.move_.to_string()
        }

        pub fn __repr__(&self) -> String {
            match &self.move_ {
                Move::Place { col, row } => format!("Move.place({}, {})", col, row),
                Move::Pass => "Move.pass_move()".to_string(),
            }
        }

        pub fn __eq__(&self, other: &PyMove) -> bool {
            self.move_ == other.move_
        }

        pub fn __hash__(&self) -> u64 {
            use std::hash::{Hash, Hasher};
            let mut hasher = std::collections::hash_map::DefaultHasher::new();
            self.move_.hash(&mut hasher);
            hasher.finish()
        }
    }

    #[pyclass(name = "GameOutcome")]
    #[derive(Clone, Copy, Debug)]
    pub struct PyGameOutcome {
        outcome: GameOutcome,
    }

    #[pymethods]
    impl PyGameOutcome {
        pub fn winner(&self) -> Option<i8> {
            self.outcome.winner().map(Player::sign)
        }

        pub fn encode_winner_absolute(&self) -> f32 {
            self.outcome.encode_winner_absolute()
        }

        pub fn is_draw(&self) -> bool {
            self.outcome.is_draw()
        }

        pub fn __str__(&self) -> String {
            self.outcome.to_string()
        }

        pub fn __repr__(&self) -> String {
            format!("GameOutcome({})", self.outcome)
        }

        pub fn __eq__(&self, other: &PyGameOutcome) -> bool {
            self.outcome == other.outcome
        }
    }
}
