use std::str::FromStr;

use log::warn;
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::core::definitions::Color;
use crate::core::session::Opponent;

pub const DEFAULT_MAX_PLIES: usize = 300;

/// Session settings read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// `CHESS_OPPONENT`: `human`, `easy`, `medium` or `hard`.
    pub opponent: Opponent,
    /// `CHESS_COMPUTER_COLOR`: `white` or `black`.
    pub computer_color: Color,
    /// `CHESS_SEED`: fixed seed for the computer's choices.
    pub seed: Option<u64>,
    /// `CHESS_MAX_PLIES`: cap on computer vs computer games.
    pub max_plies: usize,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = SessionConfig::default();
        SessionConfig {
            opponent: parse_or(&lookup, "CHESS_OPPONENT", defaults.opponent),
            computer_color: lookup("CHESS_COMPUTER_COLOR")
                .map(|value| match value.trim().to_lowercase().as_str() {
                    "white" => Color::White,
                    "black" => Color::Black,
                    _ => {
                        warn!("Ignoring CHESS_COMPUTER_COLOR={value}, expected white or black");
                        defaults.computer_color
                    }
                })
                .unwrap_or(defaults.computer_color),
            seed: lookup("CHESS_SEED").and_then(|value| match value.trim().parse() {
                Ok(seed) => Some(seed),
                Err(err) => {
                    warn!("Ignoring CHESS_SEED={value}: {err}");
                    None
                }
            }),
            max_plies: parse_or(&lookup, "CHESS_MAX_PLIES", defaults.max_plies),
        }
    }

    /// Seeded generator when a seed is configured, entropy otherwise.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            opponent: Opponent::Human,
            computer_color: Color::Black,
            seed: None,
            max_plies: DEFAULT_MAX_PLIES,
        }
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(value) => value.trim().parse().unwrap_or_else(|err| {
            warn!("Ignoring {key}={value}: {err}");
            default
        }),
    }
}
