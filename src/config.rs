//! Runtime configuration

use crate::game::{OutputFormat, VerbosityLevel, MAX_PLAYERS, MIN_PLAYERS};
use crate::{HanabiError, Result};

/// Environment variable holding the difficulty level
pub const DIFFICULTY_ENV_VAR: &str = "HANABI_DIFFICULTY_LEVEL";

/// Older misspelled name, read only when `HANABI_DIFFICULTY_LEVEL` is unset
pub const LEGACY_DIFFICULTY_ENV_VAR: &str = "HANABI_DIFICULTY_LEVEL";

/// Difficulty used when the setting is missing or not a number
///
/// Anything `<= 0` is novice mode: every card is known from the deal.
pub const DEFAULT_DIFFICULTY: i32 = 0;

pub const DEFAULT_PLAYERS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: i32,
    pub players: usize,
    pub verbosity: VerbosityLevel,
    pub output_format: OutputFormat,
}

impl Config {
    /// Defaults, with difficulty taken from the environment
    pub fn from_env() -> Self {
        let raw = difficulty_setting(
            std::env::var(DIFFICULTY_ENV_VAR).ok(),
            std::env::var(LEGACY_DIFFICULTY_ENV_VAR).ok(),
        );
        Config {
            difficulty: parse_difficulty(raw.as_deref()),
            ..Config::default()
        }
    }

    pub fn with_difficulty(mut self, difficulty: i32) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_players(mut self, players: usize) -> Self {
        self.players = players;
        self
    }

    pub fn is_novice(&self) -> bool {
        self.difficulty <= 0
    }

    pub fn validate(&self) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.players) {
            return Err(HanabiError::InvalidConfig(format!(
                "player count must be between {MIN_PLAYERS} and {MAX_PLAYERS}, got {}",
                self.players
            )));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            difficulty: DEFAULT_DIFFICULTY,
            players: DEFAULT_PLAYERS,
            verbosity: VerbosityLevel::default(),
            output_format: OutputFormat::default(),
        }
    }
}

/// The raw difficulty setting, preferring the current variable name
pub fn difficulty_setting(current: Option<String>, legacy: Option<String>) -> Option<String> {
    current.or(legacy)
}

/// Lenient difficulty parsing: unset or garbage falls back to the default
pub fn parse_difficulty(raw: Option<&str>) -> i32 {
    raw.and_then(|s| s.trim().parse().ok())
        .unwrap_or(DEFAULT_DIFFICULTY)
}
