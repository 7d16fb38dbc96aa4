use std::fmt::Display;
use std::str::FromStr;

use log::trace;
use rand::seq::SliceRandom;
use rand::RngCore;
use thiserror::Error;

use crate::core::definitions::Move;
use crate::core::engine::Board;

/// Move selection for the side to move. `None` only when it has no legal move.
pub trait Algorithm {
    fn choose(&self, board: &mut Board, rng: &mut dyn RngCore) -> Option<Move>;
}

/** Uniformly random legal move. */
pub struct RandomMove;

/** Random capture if there is one, random move otherwise. */
pub struct PreferCapture;

/** First move in board order that checks the opponent, random move otherwise. */
pub struct SeekCheck;

impl Algorithm for RandomMove {
    fn choose(&self, board: &mut Board, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = board.legal_moves_for(board.turn());
        moves.choose(rng).copied()
    }
}

impl Algorithm for PreferCapture {
    fn choose(&self, board: &mut Board, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = board.legal_moves_for(board.turn());
        let captures: Vec<Move> = moves
            .iter()
            .filter(|candidate| board.get(candidate.to).is_some())
            .copied()
            .collect();
        trace!("{} captures among {} moves", captures.len(), moves.len());
        if captures.is_empty() {
            moves.choose(rng).copied()
        } else {
            captures.choose(rng).copied()
        }
    }
}

impl Algorithm for SeekCheck {
    fn choose(&self, board: &mut Board, rng: &mut dyn RngCore) -> Option<Move> {
        let moves = board.legal_moves_for(board.turn());
        moves
            .iter()
            .find(|candidate| board.gives_check(candidate.from, candidate.to))
            .copied()
            .or_else(|| moves.choose(rng).copied())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn algorithm(self) -> &'static dyn Algorithm {
        match self {
            Difficulty::Easy => &RandomMove,
            Difficulty::Medium => &PreferCapture,
            Difficulty::Hard => &SeekCheck,
        }
    }
}

impl Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown difficulty `{0}`, expected easy, medium or hard")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ParseDifficultyError(s.to_string())),
        }
    }
}
