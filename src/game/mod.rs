//! Game rules, turn order and the command loop

pub mod command;
pub mod engine;
pub mod logger;
pub mod processor;
pub mod rotation;
pub mod status;
pub mod table;

pub use command::Command;
pub use engine::{GameEngine, GameStatus, PlayOutcome, RevealedInfo, MAX_PLAYERS, MIN_PLAYERS};
pub use logger::{GameLogger, LogEntry, OutputFormat, OutputMode, VerbosityLevel};
pub use processor::{CommandProcessor, LineOutcome, RunSummary};
pub use rotation::TurnRotation;
pub use status::{GameSummary, StatusSnapshot};
pub use table::{ColorStack, Table};
