//! Turn order

use crate::core::Player;
use crate::{HanabiError, Result};
use std::collections::VecDeque;

/// Who acts now, who acts next, and how many turns have passed
///
/// Advancing moves the current player to the back of the queue and takes the
/// new current player from the front.
#[derive(Debug, Clone)]
pub struct TurnRotation {
    current: Player,
    waiting: VecDeque<Player>,
    /// Completed turns since the game started (starts at 0)
    pub turn_number: u32,
}

impl TurnRotation {
    /// Seat `players` in the given order; the first one acts first
    pub fn new(players: Vec<Player>) -> Result<Self> {
        let mut waiting = VecDeque::from(players);
        let current = waiting
            .pop_front()
            .ok_or_else(|| HanabiError::RuleViolation("No players to seat".into()))?;
        Ok(TurnRotation {
            current,
            waiting,
            turn_number: 0,
        })
    }

    pub fn current(&self) -> &Player {
        &self.current
    }

    pub fn current_mut(&mut self) -> &mut Player {
        &mut self.current
    }

    /// The player who acts after the current one
    ///
    /// With a single seated player this is the current player.
    pub fn next(&self) -> &Player {
        self.waiting.front().unwrap_or(&self.current)
    }

    /// Pass the turn
    pub fn advance(&mut self) {
        self.turn_number += 1;
        if let Some(next) = self.waiting.pop_front() {
            let previous = std::mem::replace(&mut self.current, next);
            self.waiting.push_back(previous);
        }
    }
}
