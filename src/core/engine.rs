use std::fmt::Display;

use log::trace;

use crate::core::definitions::{Color, Move, Piece, PieceType, Square};
use crate::core::utils::{
    between, distance, is_in_diagonal_line, is_in_straight_line, king_distance,
};

const BACK_RANK: [PieceType; 8] = [
    PieceType::Rook,
    PieceType::Knight,
    PieceType::Bishop,
    PieceType::Queen,
    PieceType::King,
    PieceType::Bishop,
    PieceType::Knight,
    PieceType::Rook,
];

/// Previous contents of every square touched by [`Board::try_move`].
///
/// A plain move touches origin and destination; en passant adds the
/// captured pawn's square, castling adds both rook squares.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    saved: [Option<(Square, Option<Piece>)>; 4],
}

impl Snapshot {
    fn save(&mut self, square: Square, content: Option<Piece>) {
        if let Some(slot) = self.saved.iter_mut().find(|slot| slot.is_none()) {
            *slot = Some((square, content));
        }
    }
}

/** 8x8 mailbox board */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    grid: [[Option<Piece>; 8]; 8],
    turn: Color,
    last_move: Option<(Square, Square)>,
    in_check: bool,
}

impl Board {
    /// Standard initial arrangement, White to move.
    pub fn standard() -> Board {
        let mut board = Board::empty(Color::White);
        for (col, kind) in BACK_RANK.into_iter().enumerate() {
            for color in [Color::White, Color::Black] {
                board.grid[color.home_row() as usize][col] = Some(Piece::new(kind, color));
                board.grid[color.pawn_row() as usize][col] =
                    Some(Piece::new(PieceType::Pawn, color));
            }
        }
        board
    }

    pub fn empty(turn: Color) -> Board {
        Board {
            grid: [[None; 8]; 8],
            turn,
            last_move: None,
            in_check: false,
        }
    }

    #[inline]
    pub fn get(&self, square: Square) -> Option<Piece> {
        self.grid[square.row as usize][square.col as usize]
    }

    #[inline]
    fn set(&mut self, square: Square, content: Option<Piece>) {
        self.grid[square.row as usize][square.col as usize] = content;
    }

    /// Puts `piece` on `square` and returns what stood there before.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.get(square);
        self.set(square, Some(piece));
        self.in_check = self.is_in_check(self.turn);
        previous
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let previous = self.get(square);
        self.set(square, None);
        self.in_check = self.is_in_check(self.turn);
        previous
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn set_turn(&mut self, turn: Color) {
        self.turn = turn;
        self.in_check = self.is_in_check(turn);
    }

    pub fn last_move(&self) -> Option<(Square, Square)> {
        self.last_move
    }

    pub fn set_last_move(&mut self, last_move: Option<(Square, Square)>) {
        self.last_move = last_move;
    }

    /// Cached check state of the side to move.
    pub fn in_check(&self) -> bool {
        self.in_check
    }

    /// Pieces of `color` in row-major order.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |square| {
            self.get(square)
                .filter(|piece| piece.color == color)
                .map(|piece| (square, piece))
        })
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces(color)
            .find(|(_, piece)| piece.kind == PieceType::King)
            .map(|(square, _)| square)
    }

    pub fn is_path_clear(&self, from: Square, to: Square) -> bool {
        if !is_in_straight_line(from, to) && !is_in_diagonal_line(from, to) {
            return false;
        }
        between(from, to).all(|square| self.get(square).is_none())
    }

    /// Whether the piece on `from` may go to `to` by its movement pattern,
    /// ignoring the safety of its own king. Judged for the color of the
    /// piece itself, not for the side to move.
    pub fn is_pseudo_legal(&self, from: Square, to: Square) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        if from == to {
            return false;
        }
        if self
            .get(to)
            .is_some_and(|target| target.color == piece.color)
        {
            return false;
        }
        match piece.kind {
            PieceType::Pawn => self.is_pawn_move(piece, from, to),
            PieceType::Knight => distance(from, to) == 3 && !is_in_straight_line(from, to),
            PieceType::Bishop => is_in_diagonal_line(from, to) && self.is_path_clear(from, to),
            PieceType::Rook => is_in_straight_line(from, to) && self.is_path_clear(from, to),
            PieceType::Queen => {
                (is_in_straight_line(from, to) || is_in_diagonal_line(from, to))
                    && self.is_path_clear(from, to)
            }
            PieceType::King => {
                king_distance(from, to) == 1 || self.castling_rook(from, to).is_some()
            }
        }
    }

    fn is_pawn_move(&self, pawn: Piece, from: Square, to: Square) -> bool {
        let direction = pawn.color.pawn_direction();
        let rows = to.row as i8 - from.row as i8;
        let target = self.get(to);
        if from.col == to.col && target.is_none() {
            if rows == direction {
                return true;
            }
            if rows == 2 * direction && !pawn.has_moved && from.row == pawn.color.pawn_row() {
                return from
                    .offset(direction, 0)
                    .is_some_and(|square| self.get(square).is_none());
            }
            return false;
        }
        if from.col.abs_diff(to.col) == 1 && rows == direction {
            return target.is_some() || self.en_passant_victim(from, to).is_some();
        }
        false
    }

    /// Square of the pawn taken en passant if `from -> to` is such a capture.
    ///
    /// The previous move must be an enemy pawn's two-row advance that ended
    /// right beside the capturing pawn.
    pub fn en_passant_victim(&self, from: Square, to: Square) -> Option<Square> {
        let pawn = self.get(from)?;
        if pawn.kind != PieceType::Pawn
            || from.row != pawn.color.en_passant_row()
            || to.row as i8 - from.row as i8 != pawn.color.pawn_direction()
            || from.col.abs_diff(to.col) != 1
            || self.get(to).is_some()
        {
            return None;
        }
        let (last_from, last_to) = self.last_move?;
        let victim = Square {
            row: from.row,
            col: to.col,
        };
        let target = self.get(victim)?;
        (last_to == victim
            && last_from.col == last_to.col
            && last_from.row.abs_diff(last_to.row) == 2
            && target.kind == PieceType::Pawn
            && target.color != pawn.color)
            .then_some(victim)
    }

    /// Rook origin and destination if `from -> to` is a castling king move.
    pub fn castling_rook(&self, from: Square, to: Square) -> Option<(Square, Square)> {
        let king = self.get(from)?;
        if king.kind != PieceType::King
            || king.has_moved
            || from.row != to.row
            || from.col.abs_diff(to.col) != 2
        {
            return None;
        }
        let rook_from = Square {
            row: from.row,
            col: if to.col < from.col { 0 } else { 7 },
        };
        let rook = self.get(rook_from)?;
        if rook.kind != PieceType::Rook
            || rook.color != king.color
            || rook.has_moved
            || !self.is_path_clear(from, rook_from)
        {
            return None;
        }
        let rook_to = Square {
            row: from.row,
            col: (from.col + to.col) / 2,
        };
        Some((rook_from, rook_to))
    }

    /// Whether a piece of `by` can move onto `square`. Exact for occupied
    /// squares, which is all check detection asks about.
    pub fn is_square_attacked(&self, square: Square, by: Color) -> bool {
        self.pieces(by)
            .any(|(from, _)| self.is_pseudo_legal(from, square))
    }

    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_square_attacked(king, color.opposite()),
            None => {
                trace!("No {color} king on the board, so no check");
                false
            }
        }
    }

    /// King may neither castle out of check nor across an attacked square.
    pub fn is_castling_safe(&mut self, from: Square, to: Square) -> bool {
        let Some(king) = self.get(from) else {
            return false;
        };
        if self.is_in_check(king.color) {
            return false;
        }
        let transit = Square {
            row: from.row,
            col: (from.col + to.col) / 2,
        };
        !self.preview(from, transit, |board| board.is_in_check(king.color))
    }

    /// Pseudo-legal and does not leave the mover's own king in check.
    pub fn is_legal(&mut self, from: Square, to: Square) -> bool {
        if !self.is_pseudo_legal(from, to) {
            return false;
        }
        let Some(piece) = self.get(from) else {
            return false;
        };
        if self.castling_rook(from, to).is_some() && !self.is_castling_safe(from, to) {
            trace!("Castling {from}{to} crosses an attacked square");
            return false;
        }
        !self.preview(from, to, |board| board.is_in_check(piece.color))
    }

    /// Legal destinations of the piece on `from`, whatever its color.
    pub fn legal_moves(&mut self, from: Square) -> Vec<Square> {
        if self.get(from).is_none() {
            return Vec::new();
        }
        Square::all().filter(|&to| self.is_legal(from, to)).collect()
    }

    /// Every legal move of `color`, origins then destinations in row-major order.
    pub fn legal_moves_for(&mut self, color: Color) -> Vec<Move> {
        let origins: Vec<Square> = self.pieces(color).map(|(square, _)| square).collect();
        let mut moves = Vec::with_capacity(64);
        for from in origins {
            moves.extend(
                self.legal_moves(from)
                    .into_iter()
                    .map(|to| Move::new(from, to)),
            );
        }
        moves
    }

    pub fn has_legal_move(&mut self, color: Color) -> bool {
        let origins: Vec<Square> = self.pieces(color).map(|(square, _)| square).collect();
        origins
            .into_iter()
            .any(|from| Square::all().any(|to| self.is_legal(from, to)))
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.is_in_check(color) && !self.has_legal_move(color)
    }

    /// Whether playing `from -> to` would put the mover's opponent in check.
    pub fn gives_check(&mut self, from: Square, to: Square) -> bool {
        let Some(piece) = self.get(from) else {
            return false;
        };
        self.preview(from, to, |board| board.is_in_check(piece.color.opposite()))
    }

    /// Moves the piece without any validation, including the en passant
    /// capture and the castling rook, and returns what is needed to undo it.
    /// Turn, last move and check flag stay untouched.
    pub fn try_move(&mut self, from: Square, to: Square) -> Snapshot {
        let mut snapshot = Snapshot::default();
        let Some(piece) = self.get(from) else {
            return snapshot;
        };
        let en_passant = self.en_passant_victim(from, to);
        let castling = self.castling_rook(from, to);
        snapshot.save(from, Some(piece));
        snapshot.save(to, self.get(to));
        if let Some(victim) = en_passant {
            snapshot.save(victim, self.get(victim));
            self.set(victim, None);
        }
        if let Some((rook_from, rook_to)) = castling {
            let rook = self.get(rook_from);
            snapshot.save(rook_from, rook);
            snapshot.save(rook_to, self.get(rook_to));
            self.set(rook_from, None);
            self.set(rook_to, rook.map(Piece::moved));
        }
        self.set(from, None);
        self.set(to, Some(piece.moved()));
        snapshot
    }

    pub fn revert(&mut self, snapshot: Snapshot) {
        for (square, content) in snapshot.saved.into_iter().rev().flatten() {
            self.set(square, content);
        }
    }

    /// Runs `inspect` on the board with `from -> to` applied, then undoes it.
    pub fn preview<R>(&mut self, from: Square, to: Square, inspect: impl FnOnce(&Board) -> R) -> R {
        let snapshot = self.try_move(from, to);
        let result = inspect(self);
        self.revert(snapshot);
        result
    }

    pub(crate) fn promote(&mut self, square: Square, kind: PieceType) {
        if let Some(piece) = self.grid[square.row as usize][square.col as usize].as_mut() {
            piece.kind = kind;
        }
    }

    /// Records the move and passes the turn.
    pub(crate) fn finish_turn(&mut self, from: Square, to: Square) {
        self.last_move = Some((from, to));
        self.turn = self.turn.opposite();
        self.in_check = self.is_in_check(self.turn);
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::standard()
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..8u8 {
            write!(f, "{} ", 8 - row)?;
            for col in 0..8u8 {
                let symbol = self
                    .get(Square { row, col })
                    .map(|piece| piece.symbol())
                    .unwrap_or('.');
                write!(f, "{symbol} ")?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}
