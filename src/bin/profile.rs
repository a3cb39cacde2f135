//! Plays seeded computer-vs-computer games for profiling.
//!
//! Usage: `profile [games] [depth]`. Build with `--features hotpath` to get
//! per-function timings.

use log::{info, warn};
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rand::SeedableRng;
use spooky_reversi::game::Game;
use spooky_reversi::outcome::GameOutcome;
use spooky_reversi::r#move::Move;
use spooky_reversi::search::SearchConfig;
use spooky_reversi::turn_lock::TurnLock;
use spooky_reversi::EngineError;

/// Random moves played before the engines take over, so games differ.
const RANDOM_OPENING_PLIES: usize = 4;

#[hotpath::measure]
fn random_opening(game: &mut Game, rng: &mut StdRng) -> Result<(), EngineError> {
    for _ in 0..RANDOM_OPENING_PLIES {
        if game.is_over() {
            break;
        }
        let moves = game.legal_moves();
        let mv = moves.choose(rng).copied().unwrap_or(Move::Pass);
        game.make_move(&mv)?;
    }
    Ok(())
}

#[hotpath::measure]
fn computer_turn(game: &mut Game, lock: &TurnLock, config: &SearchConfig) -> Result<(), EngineError> {
    let Some(_guard) = lock.try_acquire() else {
        warn!("turn already in progress, skipping");
        return Ok(());
    };
    game.play_computer_move(config)?;
    Ok(())
}

#[hotpath::measure]
fn play_game(seed: u64, config: &SearchConfig) -> Result<GameOutcome, EngineError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = Game::new();
    let lock = TurnLock::new();

    random_opening(&mut game, &mut rng)?;
    while !game.is_over() {
        computer_turn(&mut game, &lock, config)?;
    }

    let (black, white) = game.score();
    let outcome = game.outcome().unwrap_or(GameOutcome::Draw);
    info!("game {}: {} ({} - {})", seed, outcome, black, white);
    Ok(outcome)
}

#[hotpath::main]
fn main() -> Result<(), EngineError> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let games: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(10);
    let depth: u8 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(spooky_reversi::search::DEFAULT_DEPTH);

    let config = SearchConfig::new(depth);
    config.validate()?;

    let mut tally = [0u32; 3];
    for seed in 0..games {
        match play_game(seed, &config)? {
            GameOutcome::BlackWin => tally[0] += 1,
            GameOutcome::WhiteWin => tally[1] += 1,
            GameOutcome::Draw => tally[2] += 1,
        }
    }

    println!(
        "{} games at depth {}: black {}, white {}, draws {}",
        games, depth, tally[0], tally[1], tally[2]
    );
    Ok(())
}
