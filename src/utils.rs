use std::{fmt::Display, ops::AddAssign};

use log::error;

use crate::core::definitions::{Color, GameStatus, Move, PieceType};
use crate::core::game::Game;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PerftResult {
    pub all: usize,
    pub captures: usize,
    pub en_passant: usize,
    pub castles: usize,
    pub promotions: usize,
    pub checks: usize,
    pub checkmates: usize,
}

impl AddAssign for PerftResult {
    fn add_assign(&mut self, rhs: Self) {
        self.all += rhs.all;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

impl Display for PerftResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} - cp: {:<4} ep: {:<4} cs: {:<4} pr: {:<4} Ch: {:<4} CM: {:4}",
            self.all,
            self.captures,
            self.en_passant,
            self.castles,
            self.promotions,
            self.checks,
            self.checkmates
        )
    }
}

/// Kind of the last ply, read off the position it was played in.
fn classify(game: &Game, candidate: Move) -> PerftResult {
    let board = game.board();
    let mut result = PerftResult {
        all: 1,
        ..Default::default()
    };
    if board.get(candidate.to).is_some() {
        result.captures += 1;
    }
    if board.en_passant_victim(candidate.from, candidate.to).is_some() {
        result.captures += 1;
        result.en_passant += 1;
    }
    if board.castling_rook(candidate.from, candidate.to).is_some() {
        result.castles += 1;
    }
    if let Some(piece) = board.get(candidate.from) {
        if piece.kind == PieceType::Pawn && candidate.to.row == piece.color.promotion_row() {
            result.promotions += 1;
        }
    }
    result
}

/// Counts the leaves of the legal move tree `depth` plies deep.
/// Promotions are counted once, as a queen.
pub fn perft(game: &Game, depth: usize) -> PerftResult {
    if depth == 0 {
        return PerftResult {
            all: 1,
            ..Default::default()
        };
    }
    let mut game = game.clone();
    let moves = game.legal_moves_for(game.current_player());
    let mut result = PerftResult::default();
    for candidate in moves {
        let mut child = game.clone();
        if let Err(err) = child.commit_with(candidate.from, candidate.to, &mut |_: Color| {
            PieceType::Queen
        }) {
            error!("Listed move {candidate} was refused: {err}");
            continue;
        }
        if depth == 1 {
            let mut leaf = classify(&game, candidate);
            if child.checked() {
                leaf.checks += 1;
            }
            if matches!(child.status(), GameStatus::Checkmate { .. }) {
                leaf.checkmates += 1;
            }
            result += leaf;
        } else {
            result += perft(&child, depth - 1);
        }
    }
    result
}

/// [`perft`] split by first move, each line printed to stdout.
pub fn perft_divide(game: &Game, depth: usize) -> PerftResult {
    let mut game = game.clone();
    let mut total = PerftResult::default();
    for candidate in game.legal_moves_for(game.current_player()) {
        let mut child = game.clone();
        if child
            .commit_with(candidate.from, candidate.to, &mut |_: Color| PieceType::Queen)
            .is_err()
        {
            continue;
        }
        let result = perft(&child, depth.saturating_sub(1));
        println!(" {candidate} : {result}");
        total += result;
    }
    println!("+ total: {total}");
    total
}
