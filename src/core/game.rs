use log::{debug, info, trace, warn};
use rand::Rng;

use crate::core::algorithms::Difficulty;
use crate::core::definitions::{
    Cell, Color, Figure, GameStatus, Move, MoveError, MoveOutcome, PieceType, Square,
};
use crate::core::engine::Board;

/// Source of promotion choices, asked once per promoting move.
pub trait Promoter {
    fn choose(&mut self, color: Color) -> PieceType;
}

impl<F: FnMut(Color) -> PieceType> Promoter for F {
    fn choose(&mut self, color: Color) -> PieceType {
        self(color)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingPromotion {
    from: Square,
    to: Square,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    history: Vec<Move>,
    status: GameStatus,
    pending: Option<PendingPromotion>,
}

impl Game {
    pub fn new() -> Game {
        Game::with_board(Board::standard())
    }

    /// Starts a game from an arbitrary setup. The side to move comes from the board.
    pub fn with_board(mut board: Board) -> Game {
        let turn = board.turn();
        board.set_turn(turn);
        let mut game = Game {
            board,
            history: Vec::new(),
            status: GameStatus::InProgress,
            pending: None,
        };
        if game.board.is_checkmate(turn) {
            game.status = GameStatus::Checkmate {
                winner: turn.opposite(),
            };
        }
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.board.turn()
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn history(&self) -> &[Move] {
        &self.history
    }

    pub fn last_move(&self) -> Option<Move> {
        self.history.last().copied()
    }

    /// Square of the pawn waiting for its promotion choice.
    pub fn pending_promotion(&self) -> Option<Square> {
        self.pending.map(|pending| pending.to)
    }

    /// Check state of the side to move, as shown to the player.
    pub fn checked(&self) -> bool {
        self.board.in_check()
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.board.is_in_check(color)
    }

    pub fn is_checkmate(&mut self, color: Color) -> bool {
        self.board.is_checkmate(color)
    }

    pub fn legal_moves_for(&mut self, color: Color) -> Vec<Move> {
        self.board.legal_moves_for(color)
    }

    /// Where the piece on `square` may go right now. Empty unless it's a
    /// piece of the side to move in a running game.
    pub fn legal_destinations(&mut self, square: Square) -> Vec<Square> {
        if self.pending.is_some() || self.status.is_finished() {
            return Vec::new();
        }
        match self.board.get(square) {
            Some(piece) if piece.color == self.board.turn() => self.board.legal_moves(square),
            _ => Vec::new(),
        }
    }

    /// Validates and plays `from -> to` for the side to move.
    ///
    /// The move is applied first and rolled back when it leaves the mover in
    /// check, so a rejected move never changes the game. A pawn reaching the
    /// last rank stops at [`MoveOutcome::PromotionPending`] until
    /// [`Game::finalize_promotion`] is called.
    pub fn commit(&mut self, from: Square, to: Square) -> Result<MoveOutcome, MoveError> {
        if let Some(pending) = self.pending {
            return Err(MoveError::PromotionPending(pending.to));
        }
        if self.status.is_finished() {
            return Err(MoveError::GameOver);
        }
        let piece = self.board.get(from).ok_or(MoveError::EmptySquare(from))?;
        if piece.color != self.board.turn() {
            return Err(MoveError::WrongTurn {
                square: from,
                color: piece.color,
            });
        }
        if !self.board.is_pseudo_legal(from, to) {
            trace!("Rejected {from}{to}: not a {:?} move", piece.kind);
            return Err(MoveError::Illegal { from, to });
        }
        if self.board.castling_rook(from, to).is_some() && !self.board.is_castling_safe(from, to) {
            return Err(MoveError::Illegal { from, to });
        }

        let snapshot = self.board.try_move(from, to);
        if self.board.is_in_check(piece.color) {
            self.board.revert(snapshot);
            trace!("Rolled back {from}{to}: {} king left in check", piece.color);
            return Err(MoveError::SelfCheck { from, to });
        }

        if piece.kind == PieceType::Pawn && to.row == piece.color.promotion_row() {
            debug!("{} pawn on {to} awaits promotion", piece.color);
            self.pending = Some(PendingPromotion { from, to });
            return Ok(MoveOutcome::PromotionPending {
                square: to,
                color: piece.color,
            });
        }
        Ok(self.complete(Move::new(from, to)))
    }

    pub fn finalize_promotion(&mut self, kind: PieceType) -> Result<MoveOutcome, MoveError> {
        let pending = self.pending.ok_or(MoveError::NoPendingPromotion)?;
        if !kind.is_promotion_target() {
            return Err(MoveError::InvalidPromotion(kind));
        }
        self.board.promote(pending.to, kind);
        self.pending = None;
        Ok(self.complete(Move {
            from: pending.from,
            to: pending.to,
            promotion: Some(kind),
        }))
    }

    /// [`Game::commit`] followed by the promotion choice from `promoter`, if needed.
    pub fn commit_with<P: Promoter + ?Sized>(
        &mut self,
        from: Square,
        to: Square,
        promoter: &mut P,
    ) -> Result<MoveOutcome, MoveError> {
        match self.commit(from, to)? {
            MoveOutcome::PromotionPending { color, .. } => {
                let choice = promoter.choose(color);
                let kind = if choice.is_promotion_target() {
                    choice
                } else {
                    warn!("Can't promote to {choice:?}, taking a queen instead");
                    PieceType::Queen
                };
                self.finalize_promotion(kind)
            }
            outcome => Ok(outcome),
        }
    }

    fn complete(&mut self, record: Move) -> MoveOutcome {
        let mover = self.board.turn();
        self.board.finish_turn(record.from, record.to);
        self.history.push(record);
        debug!("{mover} played {record}");
        let opponent = mover.opposite();
        if self.board.in_check() && self.board.is_checkmate(opponent) {
            info!("Checkmate, {mover} wins after {} moves", self.history.len());
            self.status = GameStatus::Checkmate { winner: mover };
        }
        MoveOutcome::Completed
    }

    /// Picks a move for the side to move and plays it through [`Game::commit`].
    /// Computer promotions always take a queen.
    pub fn ai_move<R: Rng>(&mut self, difficulty: Difficulty, rng: &mut R) -> Result<Move, MoveError> {
        if let Some(pending) = self.pending {
            return Err(MoveError::PromotionPending(pending.to));
        }
        if self.status.is_finished() {
            return Err(MoveError::GameOver);
        }
        let color = self.board.turn();
        let chosen = difficulty
            .algorithm()
            .choose(&mut self.board, rng)
            .ok_or(MoveError::NoLegalMoves(color))?;
        debug!("{color} computer ({difficulty}) chose {chosen}");
        self.commit_with(chosen.from, chosen.to, &mut |_: Color| PieceType::Queen)?;
        self.last_move().ok_or(MoveError::NoLegalMoves(color))
    }

    pub fn ai_move_default(&mut self, difficulty: Difficulty) -> Result<Move, MoveError> {
        self.ai_move(difficulty, &mut rand::thread_rng())
    }

    pub fn cell(&self, square: Square) -> Cell {
        match self.board.get(square) {
            None => Cell::Empty,
            Some(piece) => Cell::Figure(Figure {
                kind: piece.kind,
                color: piece.color,
                last_move: self
                    .board
                    .last_move()
                    .is_some_and(|(from, to)| from == square || to == square),
                impose_check: piece.kind == PieceType::King && self.board.is_in_check(piece.color),
                can_move: false,
            }),
        }
    }

    /// Row-major grid of cells for the renderer.
    pub fn ui_board(&mut self) -> Vec<Vec<Cell>> {
        (0..8u8)
            .map(|row| {
                (0..8u8)
                    .map(|col| {
                        let square = Square { row, col };
                        match self.cell(square) {
                            Cell::Figure(mut figure) => {
                                figure.can_move = !self.legal_destinations(square).is_empty();
                                Cell::Figure(figure)
                            }
                            Cell::Empty => Cell::Empty,
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}
