//! Error types for the Hanabi engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum HanabiError {
    /// Structural impossibility: bad deck, empty draw pile, missing table stack
    #[error("Rule violation: {0}")]
    RuleViolation(String),

    /// A legal-looking action that breaks the rules of the game
    #[error("Invalid turn: {0}")]
    InvalidTurn(String),

    #[error("Card position {position} is outside of a hand of {hand_size} cards")]
    PositionOutOfRange { position: usize, hand_size: usize },

    #[error("No game in progress. Start new game.")]
    NoGameInProgress,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Coarse classification used by the command loop to decide how a failed
/// line is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameErrorKind {
    RuleViolation,
    InvalidTurn,
    Unexpected,
}

impl HanabiError {
    pub fn kind(&self) -> GameErrorKind {
        match self {
            HanabiError::RuleViolation(_) => GameErrorKind::RuleViolation,
            HanabiError::InvalidTurn(_) => GameErrorKind::InvalidTurn,
            _ => GameErrorKind::Unexpected,
        }
    }

    /// True for the game error family (rule violations and invalid turns)
    pub fn is_game_error(&self) -> bool {
        self.kind() != GameErrorKind::Unexpected
    }
}

pub type Result<T> = std::result::Result<T, HanabiError>;
