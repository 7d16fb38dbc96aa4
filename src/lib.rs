pub mod config;
pub mod core;
pub mod utils;

// module re-exports
pub use crate::config::SessionConfig;
pub use crate::core::algorithms::{Algorithm, Difficulty, ParseDifficultyError};
pub use crate::core::definitions::{
    Cell, Color, Figure, GameStatus, Move, MoveError, MoveOutcome, Piece, PieceType, Square,
};
pub use crate::core::engine::Board;
pub use crate::core::game::{Game, Promoter};
pub use crate::core::session::{Opponent, Session, SessionState};
