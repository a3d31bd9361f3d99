//! Player representation

use crate::core::{Card, Hand};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Seat number, assigned in turn order starting at 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerId(u8);

impl PlayerId {
    pub fn new(seat: u8) -> Self {
        PlayerId(seat)
    }

    pub fn seat(&self) -> u8 {
        self.0
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Represents a player in the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    hand: Hand,
}

impl Player {
    pub fn new(id: PlayerId) -> Self {
        Player {
            id,
            hand: Hand::new(),
        }
    }

    /// Seat `count` players numbered from 1 (at most 255)
    pub fn seat_all(count: usize) -> Vec<Player> {
        (1..=u8::MAX)
            .take(count)
            .map(|seat| Player::new(PlayerId::new(seat)))
            .collect()
    }

    pub fn cards(&self) -> &[Card] {
        self.hand.cards()
    }

    pub fn card_at(&self, position: usize) -> Result<Card> {
        self.hand.get(position)
    }

    pub fn add_to_hand(&mut self, card: Card) -> Result<()> {
        self.hand.add(card)
    }

    /// Swap a freshly drawn card into `position`, returning the card that left
    pub fn replace_card(&mut self, position: usize, new_card: Card) -> Result<Card> {
        self.hand.replace(position, new_card)
    }

    pub fn clear_hand(&mut self) {
        self.hand.clear();
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hand)
    }
}
