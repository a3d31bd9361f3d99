//! The shared fireworks table: one stack per color

use crate::core::{Card, Color, Knowledge, Rank};
use crate::{HanabiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cards successfully played onto one color
///
/// An empty stack is the base marker: its top reads as rank 0 (`Unknown`).
/// The base can never be removed, so the stack is never truly empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorStack {
    played: Vec<Card>,
}

impl ColorStack {
    pub fn top(&self) -> Knowledge<Rank> {
        Knowledge::from(self.played.last().map(|c| c.rank))
    }

    /// Numeric top rank, 0 for the base marker
    pub fn top_value(&self) -> u8 {
        self.top().known().map_or(0, |r| r.value())
    }

    pub fn cards(&self) -> &[Card] {
        &self.played
    }
}

/// Table with a stack for every color, in `Color::ALL` order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    stacks: Vec<(Color, ColorStack)>,
}

impl Table {
    pub fn new() -> Self {
        Table {
            stacks: Color::ALL
                .iter()
                .map(|&color| (color, ColorStack::default()))
                .collect(),
        }
    }

    fn stack_mut(&mut self, color: Color) -> Result<&mut ColorStack> {
        self.stacks
            .iter_mut()
            .find(|(c, _)| *c == color)
            .map(|(_, stack)| stack)
            .ok_or_else(|| {
                HanabiError::RuleViolation(format!("Cannot find stack on table for {color}"))
            })
    }

    pub fn stack(&self, color: Color) -> Result<&ColorStack> {
        self.stacks
            .iter()
            .find(|(c, _)| *c == color)
            .map(|(_, stack)| stack)
            .ok_or_else(|| {
                HanabiError::RuleViolation(format!("Cannot find stack on table for {color}"))
            })
    }

    /// Put `card` on its color stack if it is exactly one rank above the top
    ///
    /// Returns `Ok(false)` and leaves the table untouched otherwise.
    pub fn try_play(&mut self, card: Card) -> Result<bool> {
        let stack = self.stack_mut(card.color)?;
        let step = i16::from(card.rank.value()) - i16::from(stack.top_value());
        if step == 1 {
            stack.played.push(card);
            Ok(true)
        } else {
            Ok(false)
        }
    }

    pub fn top(&self, color: Color) -> Result<Knowledge<Rank>> {
        Ok(self.stack(color)?.top())
    }

    /// Pop every stack down to its base marker
    pub fn clear(&mut self) {
        for (_, stack) in self.stacks.iter_mut() {
            stack.played.clear();
        }
    }
}

impl Default for Table {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (color, stack)) in self.stacks.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}{}", color, stack.top_value())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardFactory;

    fn card(factory: &mut CardFactory, token: &str) -> Card {
        factory.make(token.parse().unwrap())
    }

    #[test]
    fn test_fresh_table() {
        let table = Table::new();
        assert_eq!(table.to_string(), "R0 G0 B0 W0 Y0");
        for color in Color::ALL {
            assert_eq!(table.top(color).unwrap(), Knowledge::Unknown);
        }
    }

    #[test]
    fn test_play_in_sequence() {
        let mut factory = CardFactory::new();
        let mut table = Table::new();

        for token in ["G1", "G2", "G3", "G4", "G5"] {
            let c = card(&mut factory, token);
            assert!(table.try_play(c).unwrap(), "{token} should play");
            assert_eq!(table.top(Color::Green).unwrap(), Knowledge::Known(c.rank));
        }
        assert_eq!(table.to_string(), "R0 G5 B0 W0 Y0");
        assert_eq!(table.stack(Color::Green).unwrap().cards().len(), 5);
    }

    #[test]
    fn test_rejects_gaps_and_repeats() {
        let mut factory = CardFactory::new();
        let mut table = Table::new();

        assert!(!table.try_play(card(&mut factory, "R2")).unwrap());
        assert_eq!(table.to_string(), "R0 G0 B0 W0 Y0");

        assert!(table.try_play(card(&mut factory, "R1")).unwrap());
        assert!(!table.try_play(card(&mut factory, "R1")).unwrap());
        assert!(!table.try_play(card(&mut factory, "R3")).unwrap());
        assert_eq!(table.top(Color::Red).unwrap(), Knowledge::Known(Rank::One));
    }

    #[test]
    fn test_clear_restores_base() {
        let mut factory = CardFactory::new();
        let mut table = Table::new();
        for token in ["R1", "R2", "B1", "Y1", "Y2", "Y3"] {
            table.try_play(card(&mut factory, token)).unwrap();
        }
        assert_eq!(table.to_string(), "R2 G0 B1 W0 Y3");

        table.clear();
        assert_eq!(table.to_string(), "R0 G0 B0 W0 Y0");
        table.clear();
        assert_eq!(table.to_string(), "R0 G0 B0 W0 Y0");
        assert!(table.try_play(card(&mut factory, "R1")).unwrap());
    }
}
