use std::fmt::Display;

use thiserror::Error;

use crate::core::utils::square_name;

#[derive(PartialEq, Eq, Debug, Default, Clone, Copy, Hash)]
pub enum Color {
    Black,
    #[default]
    White,
}

impl Color {
    pub fn opposite(self) -> Color {
        if self == Color::White {
            Color::Black
        } else {
            Color::White
        }
    }

    /// Row step of a pawn of this color. White moves towards row 0.
    #[inline]
    pub fn pawn_direction(self) -> i8 {
        match self {
            Color::White => -1,
            Color::Black => 1,
        }
    }

    #[inline]
    pub fn home_row(self) -> u8 {
        match self {
            Color::White => 7,
            Color::Black => 0,
        }
    }

    #[inline]
    pub fn pawn_row(self) -> u8 {
        match self {
            Color::White => 6,
            Color::Black => 1,
        }
    }

    #[inline]
    pub fn promotion_row(self) -> u8 {
        self.opposite().home_row()
    }

    /// Row a pawn must stand on to capture en passant.
    #[inline]
    pub fn en_passant_row(self) -> u8 {
        match self {
            Color::White => 3,
            Color::Black => 4,
        }
    }
}

impl Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(if self == &Self::White {
            "White"
        } else {
            "Black"
        })
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    pub fn is_promotion_target(self) -> bool {
        matches!(
            self,
            PieceType::Queen | PieceType::Rook | PieceType::Bishop | PieceType::Knight
        )
    }

    pub fn symbol(self) -> char {
        match self {
            PieceType::Pawn => 'p',
            PieceType::Knight => 'n',
            PieceType::Bishop => 'b',
            PieceType::Rook => 'r',
            PieceType::Queen => 'q',
            PieceType::King => 'k',
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceType,
    pub has_moved: bool,
}

impl Piece {
    pub fn new(kind: PieceType, color: Color) -> Piece {
        Piece {
            color,
            kind,
            has_moved: false,
        }
    }

    /** Same piece with the moved flag raised. */
    pub fn moved(self) -> Piece {
        Piece {
            has_moved: true,
            ..self
        }
    }

    /// Uppercase for White, lowercase for Black.
    pub fn symbol(&self) -> char {
        let symbol = self.kind.symbol();
        match self.color {
            Color::White => symbol.to_ascii_uppercase(),
            Color::Black => symbol,
        }
    }
}

/// Board coordinate. Row 0 is Black's home rank, row 7 is White's.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Square {
    pub row: u8,
    pub col: u8,
}

impl Square {
    pub fn new(row: u8, col: u8) -> Option<Square> {
        (row < 8 && col < 8).then_some(Square { row, col })
    }

    pub const fn at(row: u8, col: u8) -> Square {
        assert!(row < 8 && col < 8, "Square is out of board!");
        Square { row, col }
    }

    pub fn offset(self, rows: i8, cols: i8) -> Option<Square> {
        let row = self.row as i8 + rows;
        let col = self.col as i8 + cols;
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Some(Square {
                row: row as u8,
                col: col as u8,
            })
        } else {
            None
        }
    }

    /// Every square in row-major order.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..64u8).map(|idx| Square {
            row: idx / 8,
            col: idx % 8,
        })
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(square_name(*self))
    }
}

/// Committed move as kept in the history. `promotion` is only known once
/// the promotion choice has been made.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Move {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

impl Move {
    pub fn new(from: Square, to: Square) -> Move {
        Move {
            from,
            to,
            promotion: None,
        }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.symbol())?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Figure {
    pub kind: PieceType,
    pub color: Color,
    pub last_move: bool,
    pub impose_check: bool,
    pub can_move: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Cell {
    Empty,
    Figure(Figure),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /** Move is on the board and the turn has passed. */
    Completed,
    /** Pawn reached the last rank; waiting for `finalize_promotion`. */
    PromotionPending { square: Square, color: Color },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    NotStarted,
    InProgress,
    Checkmate { winner: Color },
}

impl GameStatus {
    pub fn is_finished(&self) -> bool {
        matches!(self, GameStatus::Checkmate { .. })
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("there is no piece on {0}")]
    EmptySquare(Square),
    #[error("piece on {square} belongs to {color}, who is not to move")]
    WrongTurn { square: Square, color: Color },
    #[error("move {from}{to} is not allowed")]
    Illegal { from: Square, to: Square },
    #[error("move {from}{to} leaves own king in check")]
    SelfCheck { from: Square, to: Square },
    #[error("promotion on {0} must be finalized first")]
    PromotionPending(Square),
    #[error("there is no promotion to finalize")]
    NoPendingPromotion,
    #[error("pawn can't be promoted to {0:?}")]
    InvalidPromotion(PieceType),
    #[error("{0} has no legal moves")]
    NoLegalMoves(Color),
    #[error("game is already over")]
    GameOver,
    #[error("no game is being played")]
    NotPlaying,
    #[error("it's the computer's turn ({0})")]
    NotYourTurn(Color),
}
