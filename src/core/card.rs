//! Card types and definitions

use crate::core::{EntityId, IdGenerator};
use crate::{HanabiError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Firework colors, in table order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Red,
    Green,
    Blue,
    White,
    Yellow,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::Red,
        Color::Green,
        Color::Blue,
        Color::White,
        Color::Yellow,
    ];

    pub fn letter(&self) -> char {
        match self {
            Color::Red => 'R',
            Color::Green => 'G',
            Color::Blue => 'B',
            Color::White => 'W',
            Color::Yellow => 'Y',
        }
    }

    pub fn from_letter(c: char) -> Option<Color> {
        match c {
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            'B' => Some(Color::Blue),
            'W' => Some(Color::White),
            'Y' => Some(Color::Yellow),
            _ => None,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// Card rank, 1 through 5
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    One = 1,
    Two,
    Three,
    Four,
    Five,
}

impl Rank {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        match v {
            1 => Some(Rank::One),
            2 => Some(Rank::Two),
            3 => Some(Rank::Three),
            4 => Some(Rank::Four),
            5 => Some(Rank::Five),
            _ => None,
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// What a player has been told about one attribute of a card
///
/// Kept separate from `Color`/`Rank` so "no information" can never be mixed
/// into rank arithmetic by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Knowledge<T> {
    Unknown,
    Known(T),
}

impl<T> Default for Knowledge<T> {
    fn default() -> Self {
        Knowledge::Unknown
    }
}

impl<T: Copy> Knowledge<T> {
    pub fn is_known(&self) -> bool {
        matches!(self, Knowledge::Known(_))
    }

    pub fn known(&self) -> Option<T> {
        match self {
            Knowledge::Known(v) => Some(*v),
            Knowledge::Unknown => None,
        }
    }
}

impl<T> From<Option<T>> for Knowledge<T> {
    fn from(value: Option<T>) -> Self {
        match value {
            Some(v) => Knowledge::Known(v),
            None => Knowledge::Unknown,
        }
    }
}

/// Color and rank without identity, as written in a deck list (`R3`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardFace {
    pub color: Color,
    pub rank: Rank,
}

impl CardFace {
    pub fn new(color: Color, rank: Rank) -> Self {
        CardFace { color, rank }
    }
}

impl fmt::Display for CardFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color, self.rank)
    }
}

impl FromStr for CardFace {
    type Err = HanabiError;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.trim().chars();
        let (Some(c), Some(r), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(HanabiError::RuleViolation(format!("Invalid card '{s}'")));
        };
        let color = Color::from_letter(c)
            .ok_or_else(|| HanabiError::RuleViolation(format!("Invalid card color in '{s}'")))?;
        let rank = r
            .to_digit(10)
            .and_then(|d| Rank::from_value(d as u8))
            .ok_or_else(|| HanabiError::RuleViolation(format!("Invalid card rank in '{s}'")))?;
        Ok(CardFace::new(color, rank))
    }
}

/// A physical card in the game
///
/// Cards are small `Copy` values; identity lives in `id`, so two R3s in the
/// same deck compare unequal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID for this card instance
    pub id: EntityId,
    pub color: Color,
    pub rank: Rank,
}

impl Card {
    pub fn new(id: EntityId, face: CardFace) -> Self {
        Card {
            id,
            color: face.color,
            rank: face.rank,
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.color, self.rank)
    }
}

/// Mints cards with fresh identities
#[derive(Debug, Clone, Default)]
pub struct CardFactory {
    ids: IdGenerator,
}

impl CardFactory {
    pub fn new() -> Self {
        CardFactory {
            ids: IdGenerator::new(),
        }
    }

    pub fn make(&mut self, face: CardFace) -> Card {
        Card::new(self.ids.next_id(), face)
    }

    /// Build a deck in the given order, front card first
    pub fn make_deck(&mut self, faces: &[CardFace]) -> Vec<Card> {
        faces.iter().map(|&face| self.make(face)).collect()
    }
}
