//! Core game types and entities

pub mod card;
pub mod entity;
pub mod hand;
pub mod player;

pub use card::{Card, CardFace, CardFactory, Color, Knowledge, Rank};
pub use entity::{EntityId, IdGenerator};
pub use hand::{Hand, HAND_SIZE};
pub use player::{Player, PlayerId};

/// Convenience alias: cards are the only entities with IDs
pub type CardId = EntityId;
