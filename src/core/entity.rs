//! Card identity with simple integer IDs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simple integer ID for game entities
///
/// Two cards with the same color and rank are still different cards; the ID
/// is what tells them apart. IDs are never reused within one generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(u32);

impl EntityId {
    pub fn new(id: u32) -> Self {
        EntityId(id)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of entity IDs
///
/// Owned by whoever mints cards (see `CardFactory`); there is no process-wide
/// counter. A generator never hands out the same ID twice and is never reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    next_id: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        IdGenerator { next_id: 1 }
    }

    /// Generate a new unique EntityId
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId::new(self.next_id);
        self.next_id += 1;
        id
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
