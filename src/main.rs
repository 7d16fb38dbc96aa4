use std::env;

use anyhow::{Context, Result};
use chess_rules::{Color, Difficulty, Game, GameStatus, MoveError, SessionConfig};
use log::info;

fn difficulty_arg(args: &[String], idx: usize, default: Difficulty) -> Result<Difficulty> {
    match args.get(idx) {
        Some(arg) => arg
            .parse()
            .with_context(|| format!("argument #{idx} must be a difficulty")),
        None => Ok(default),
    }
}

/// Computer vs computer. Usage: `self-play [white-difficulty] [black-difficulty]`.
fn main() -> Result<()> {
    env_logger::init(); // Log to stderr (if you run with `RUST_LOG=debug`).
    let args: Vec<String> = env::args().collect();
    let white = difficulty_arg(&args, 1, Difficulty::Medium)?;
    let black = difficulty_arg(&args, 2, Difficulty::Hard)?;
    let config = SessionConfig::from_env();
    let mut rng = config.rng();
    info!("White plays {white}, Black plays {black}");

    let mut game = Game::new();
    for ply in 1..=config.max_plies {
        let difficulty = match game.current_player() {
            Color::White => white,
            Color::Black => black,
        };
        match game.ai_move(difficulty, &mut rng) {
            Ok(played) => info!("{ply:>3}. {played}"),
            Err(MoveError::NoLegalMoves(color)) => {
                println!("{color} has no legal moves, stalemate");
                break;
            }
            Err(err) => return Err(err).context("computer failed to move"),
        }
        if let GameStatus::Checkmate { winner } = game.status() {
            println!("Checkmate! {winner} wins");
            break;
        }
    }
    println!("{}", game.board());
    println!("{} moves played", game.history().len());
    Ok(())
}
