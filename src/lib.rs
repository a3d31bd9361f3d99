//! Hanabi - cooperative card game engine driven by text commands
//!
//! Commands are read one per line, applied to a rules engine that tracks the
//! draw pile, the fireworks table and what every player has been told about
//! their own cards, and a status report is printed after each line.

pub mod config;
pub mod core;
pub mod error;
pub mod game;

pub use config::Config;
pub use error::{GameErrorKind, HanabiError, Result};
