use std::fmt::Display;
use std::str::FromStr;

use log::{debug, info};
use rand::Rng;

use crate::config::SessionConfig;
use crate::core::algorithms::{Difficulty, ParseDifficultyError};
use crate::core::definitions::{Color, GameStatus, Move, MoveError, MoveOutcome, Square};
use crate::core::game::{Game, Promoter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opponent {
    Human,
    Computer(Difficulty),
}

impl Display for Opponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Opponent::Human => f.pad("human"),
            Opponent::Computer(difficulty) => write!(f, "computer ({difficulty})"),
        }
    }
}

impl FromStr for Opponent {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("human") {
            Ok(Opponent::Human)
        } else {
            s.parse().map(Opponent::Computer)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Menu,
    Playing,
    Finished { winner: Color },
}

/// One seat at the board: owns the current game and decides whose turn
/// it is between the human and the computer.
#[derive(Debug, Clone)]
pub struct Session {
    config: SessionConfig,
    game: Option<Game>,
    state: SessionState,
}

impl Session {
    pub fn new(config: SessionConfig) -> Session {
        Session {
            config,
            game: None,
            state: SessionState::Menu,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn game(&self) -> Option<&Game> {
        self.game.as_ref()
    }

    pub fn status(&self) -> GameStatus {
        self.game
            .as_ref()
            .map_or(GameStatus::NotStarted, Game::status)
    }

    /// Starts a fresh game, dropping the previous one.
    pub fn start(&mut self) -> &mut Game {
        info!("New game against {}", self.config.opponent);
        self.state = SessionState::Playing;
        self.game.insert(Game::new())
    }

    pub fn back_to_menu(&mut self) {
        self.game = None;
        self.state = SessionState::Menu;
    }

    pub fn computer_to_move(&self) -> bool {
        match (&self.game, self.config.opponent) {
            (Some(game), Opponent::Computer(_)) => {
                self.state == SessionState::Playing
                    && game.current_player() == self.config.computer_color
            }
            _ => false,
        }
    }

    pub fn legal_destinations(&mut self, square: Square) -> Vec<Square> {
        if self.state != SessionState::Playing || self.computer_to_move() {
            return Vec::new();
        }
        self.game
            .as_mut()
            .map(|game| game.legal_destinations(square))
            .unwrap_or_default()
    }

    pub fn in_check(&self, color: Color) -> bool {
        self.game.as_ref().is_some_and(|game| game.in_check(color))
    }

    /// Human move. Rejected while the computer is to move.
    pub fn play<P: Promoter + ?Sized>(
        &mut self,
        from: Square,
        to: Square,
        promoter: &mut P,
    ) -> Result<MoveOutcome, MoveError> {
        if self.computer_to_move() {
            return Err(MoveError::NotYourTurn(self.config.computer_color));
        }
        let outcome = self.playing_game()?.commit_with(from, to, promoter)?;
        self.refresh();
        Ok(outcome)
    }

    /// Lets the computer move when it is its turn; `Ok(None)` otherwise.
    pub fn respond<R: Rng>(&mut self, rng: &mut R) -> Result<Option<Move>, MoveError> {
        let Opponent::Computer(difficulty) = self.config.opponent else {
            return Ok(None);
        };
        if !self.computer_to_move() {
            return Ok(None);
        }
        let played = self.playing_game()?.ai_move(difficulty, rng)?;
        debug!("Computer answered {played}");
        self.refresh();
        Ok(Some(played))
    }

    fn playing_game(&mut self) -> Result<&mut Game, MoveError> {
        match (self.state, self.game.as_mut()) {
            (SessionState::Playing, Some(game)) => Ok(game),
            _ => Err(MoveError::NotPlaying),
        }
    }

    fn refresh(&mut self) {
        if let Some(GameStatus::Checkmate { winner }) = self.game.as_ref().map(Game::status) {
            info!("{winner} wins");
            self.state = SessionState::Finished { winner };
        }
    }
}
