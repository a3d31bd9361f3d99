//! A player's hand of cards

use crate::core::Card;
use crate::{HanabiError, Result};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Number of cards every player holds once the game has started
pub const HAND_SIZE: usize = 5;

/// Ordered hand; position 0 is the leftmost card
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Hand {
    cards: SmallVec<[Card; HAND_SIZE]>,
}

impl Hand {
    pub fn new() -> Self {
        Hand {
            cards: SmallVec::new(),
        }
    }

    /// Add a dealt card to the end of the hand
    pub fn add(&mut self, card: Card) -> Result<()> {
        if self.is_full() {
            return Err(HanabiError::RuleViolation(format!(
                "Hand already holds {HAND_SIZE} cards"
            )));
        }
        self.cards.push(card);
        Ok(())
    }

    /// Swap `new_card` into `position` and return the card that was there
    ///
    /// The drawn card takes the vacated slot, so the other cards keep their
    /// positions (it is not appended at the end). The hand never shrinks.
    pub fn replace(&mut self, position: usize, new_card: Card) -> Result<Card> {
        let slot = self
            .cards
            .get_mut(position)
            .ok_or(HanabiError::PositionOutOfRange {
                position,
                hand_size: HAND_SIZE,
            })?;
        Ok(std::mem::replace(slot, new_card))
    }

    pub fn get(&self, position: usize) -> Result<Card> {
        self.cards
            .get(position)
            .copied()
            .ok_or(HanabiError::PositionOutOfRange {
                position,
                hand_size: HAND_SIZE,
            })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.cards.len() >= HAND_SIZE
    }

    pub fn clear(&mut self) {
        self.cards.clear();
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{card}")?;
        }
        Ok(())
    }
}
