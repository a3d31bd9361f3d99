//! The rules engine
//!
//! `GameEngine` owns the draw pile, the table, everything players have been
//! told about their cards, and the score counters. It knows nothing about
//! text commands or turn order; see `CommandProcessor` for that.

use crate::core::{Card, CardId, Color, Knowledge, Player, Rank, HAND_SIZE};
use crate::game::Table;
use crate::{HanabiError, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Fewest players a game can be started with
pub const MIN_PLAYERS: usize = 2;
/// Most players a game can be started with
pub const MAX_PLAYERS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Ended,
    Started,
}

/// What a card's holder has been told about it
///
/// Fields only ever go from `Unknown` to `Known`, and only to the card's true
/// value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RevealedInfo {
    pub color: Knowledge<Color>,
    pub rank: Knowledge<Rank>,
}

impl RevealedInfo {
    /// Full knowledge of the card
    pub fn of(card: &Card) -> Self {
        RevealedInfo {
            color: Knowledge::Known(card.color),
            rank: Knowledge::Known(card.rank),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.color.is_known() && self.rank.is_known()
    }
}

/// How a successful play was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayOutcome {
    /// Both color and rank were known to the player
    Informed,
    /// The player was missing color, rank or both
    Risky,
}

#[derive(Debug, Clone)]
pub struct GameEngine {
    status: GameStatus,
    /// Draw pile, front card is drawn next
    deck: VecDeque<Card>,
    table: Table,
    revealed: FxHashMap<CardId, RevealedInfo>,
    /// Dropped and misplayed cards, in the order they left play
    discards: Vec<Card>,
    score: u32,
    risks: u32,
    successful_plays: u32,
}

impl GameEngine {
    pub fn new() -> Self {
        GameEngine {
            status: GameStatus::Ended,
            deck: VecDeque::new(),
            table: Table::new(),
            revealed: FxHashMap::default(),
            discards: Vec::new(),
            score: 0,
            risks: 0,
            successful_plays: 0,
        }
    }

    /// Reset everything and deal a new game from `deck`, front card first
    ///
    /// With `difficulty <= 0` every card is fully known from the start. On
    /// error nothing has changed.
    pub fn start_game(
        &mut self,
        deck: Vec<Card>,
        players: &mut [Player],
        difficulty: i32,
    ) -> Result<()> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&players.len()) {
            return Err(HanabiError::RuleViolation(format!(
                "A game needs {MIN_PLAYERS} to {MAX_PLAYERS} players, got {}",
                players.len()
            )));
        }
        let min_deck_size = players.len() * HAND_SIZE + 1;
        if deck.len() < min_deck_size {
            return Err(HanabiError::RuleViolation(format!(
                "Not enough cards: {} players need at least {} cards, got {}",
                players.len(),
                min_deck_size,
                deck.len()
            )));
        }

        self.status = GameStatus::Started;
        self.score = 0;
        self.risks = 0;
        self.successful_plays = 0;
        self.table.clear();
        self.revealed.clear();
        self.discards.clear();
        self.deck = VecDeque::from(deck);

        if difficulty <= 0 {
            for card in self.deck.iter() {
                self.revealed.insert(card.id, RevealedInfo::of(card));
            }
        }

        self.deal(players)
    }

    fn deal(&mut self, players: &mut [Player]) -> Result<()> {
        for player in players.iter_mut() {
            player.clear_hand();
            for _ in 0..HAND_SIZE {
                let card = self.draw_card()?;
                player.add_to_hand(card)?;
            }
        }
        Ok(())
    }

    /// Take the front card of the draw pile
    ///
    /// Taking the last card ends the game immediately, before the caller has
    /// done anything with the card.
    pub fn draw_card(&mut self) -> Result<Card> {
        if self.deck.len() == 1 {
            self.end_game();
        }
        self.deck
            .pop_front()
            .ok_or_else(|| HanabiError::RuleViolation("Deck is empty. Start new game.".into()))
    }

    /// Play `card` onto the table
    ///
    /// A failed play is an invalid turn; the card goes to the discard pile and
    /// no counter changes.
    pub fn play_card(&mut self, card: Card) -> Result<PlayOutcome> {
        if !self.table.try_play(card)? {
            self.discards.push(card);
            return Err(HanabiError::InvalidTurn(format!("Cannot play card {card}")));
        }

        self.score += 1;
        self.successful_plays += 1;

        let informed = self
            .revealed
            .get(&card.id)
            .is_some_and(|info| info.is_complete());
        if informed {
            Ok(PlayOutcome::Informed)
        } else {
            self.risks += 1;
            Ok(PlayOutcome::Risky)
        }
    }

    pub fn tell_color(&mut self, card: Card, color: Knowledge<Color>) -> Result<()> {
        if !color.is_known() {
            return Err(HanabiError::InvalidTurn("Color was not provided".into()));
        }
        self.record_info(card, color, Knowledge::Unknown)
    }

    pub fn tell_rank(&mut self, card: Card, rank: Knowledge<Rank>) -> Result<()> {
        if !rank.is_known() {
            return Err(HanabiError::InvalidTurn("Rank was not provided".into()));
        }
        self.record_info(card, Knowledge::Unknown, rank)
    }

    /// Store a truthful hint about `card`
    ///
    /// Any asserted value must match the card. Known fields are never
    /// cleared; `Unknown` arguments leave the record as it was.
    fn record_info(
        &mut self,
        card: Card,
        color: Knowledge<Color>,
        rank: Knowledge<Rank>,
    ) -> Result<()> {
        if let Knowledge::Known(c) = color {
            if c != card.color {
                return Err(HanabiError::InvalidTurn(format!(
                    "Card color {card} not equals {c}"
                )));
            }
        }
        if let Knowledge::Known(r) = rank {
            if r != card.rank {
                return Err(HanabiError::InvalidTurn(format!(
                    "Card rank {card} not equals {r}"
                )));
            }
        }

        let info = self.revealed.entry(card.id).or_default();
        if color.is_known() {
            info.color = color;
        }
        if rank.is_known() {
            info.rank = rank;
        }
        Ok(())
    }

    /// Discard `card`. Dropping has no effect on score or risk.
    pub fn drop_card(&mut self, card: Card) {
        self.discards.push(card);
    }

    pub fn end_game(&mut self) {
        self.status = GameStatus::Ended;
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status == GameStatus::Ended
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn risk_count(&self) -> u32 {
        self.risks
    }

    pub fn successful_plays(&self) -> u32 {
        self.successful_plays
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    pub fn deck_len(&self) -> usize {
        self.deck.len()
    }

    pub fn discard_pile(&self) -> &[Card] {
        &self.discards
    }

    pub fn revealed_info(&self, card: CardId) -> Option<RevealedInfo> {
        self.revealed.get(&card).copied()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{CardFace, CardFactory};

    const SCENARIO_DECK: [&str; 11] = [
        "R1", "R2", "R3", "R4", "R5", "G1", "G2", "G3", "G4", "G5", "B1",
    ];

    fn make_deck(factory: &mut CardFactory, tokens: &[&str]) -> Vec<Card> {
        let faces: Vec<CardFace> = tokens.iter().map(|t| t.parse().unwrap()).collect();
        factory.make_deck(&faces)
    }

    fn started(difficulty: i32) -> (GameEngine, Vec<Player>) {
        let mut factory = CardFactory::new();
        let deck = make_deck(&mut factory, &SCENARIO_DECK);
        let mut players = Player::seat_all(2);
        let mut engine = GameEngine::new();
        engine.start_game(deck, &mut players, difficulty).unwrap();
        (engine, players)
    }

    #[test]
    fn test_new_engine_is_ended() {
        let engine = GameEngine::new();
        assert!(engine.is_finished());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.deck_len(), 0);
    }

    #[test]
    fn test_start_game_deals_in_order() {
        let (engine, players) = started(1);

        assert_eq!(engine.status(), GameStatus::Started);
        assert_eq!(players[0].to_string(), "R1 R2 R3 R4 R5");
        assert_eq!(players[1].to_string(), "G1 G2 G3 G4 G5");
        assert_eq!(engine.deck_len(), 1);
        for player in &players {
            assert_eq!(player.cards().len(), HAND_SIZE);
        }
    }

    #[test]
    fn test_start_game_needs_a_spare_card() {
        let mut factory = CardFactory::new();
        let deck = make_deck(&mut factory, &SCENARIO_DECK[..10]);
        let mut players = Player::seat_all(2);
        let mut engine = GameEngine::new();

        let err = engine.start_game(deck, &mut players, 1).unwrap_err();
        assert!(matches!(err, HanabiError::RuleViolation(_)));
        assert!(engine.is_finished());

        let deck = make_deck(&mut factory, &SCENARIO_DECK);
        let err = engine.start_game(deck, &mut [], 1).unwrap_err();
        assert!(matches!(err, HanabiError::RuleViolation(_)));
    }

    #[test]
    fn test_start_game_checks_player_count() {
        let mut factory = CardFactory::new();
        let mut engine = GameEngine::new();

        for count in [1, MAX_PLAYERS + 1] {
            let deck = make_deck(&mut factory, &[SCENARIO_DECK; 3].concat());
            let mut players = Player::seat_all(count);
            let err = engine.start_game(deck, &mut players, 1).unwrap_err();
            assert!(matches!(err, HanabiError::RuleViolation(_)), "{count} players");
            assert!(engine.is_finished());
            assert!(players.iter().all(|p| p.cards().is_empty()));
        }

        let deck = make_deck(&mut factory, &[SCENARIO_DECK; 3].concat());
        let mut players = Player::seat_all(MAX_PLAYERS);
        engine.start_game(deck, &mut players, 1).unwrap();
        assert_eq!(engine.deck_len(), 33 - MAX_PLAYERS * HAND_SIZE);
    }

    #[test]
    fn test_drawing_last_card_ends_game() {
        let (mut engine, _players) = started(1);

        let card = engine.draw_card().unwrap();
        assert_eq!(card.to_string(), "B1");
        assert!(engine.is_finished());

        let err = engine.draw_card().unwrap_err();
        assert!(matches!(err, HanabiError::RuleViolation(_)));
    }

    #[test]
    fn test_uninformed_play_is_risky() {
        let (mut engine, players) = started(1);
        let r1 = players[0].card_at(0).unwrap();

        assert_eq!(engine.play_card(r1).unwrap(), PlayOutcome::Risky);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.successful_plays(), 1);
        assert_eq!(engine.risk_count(), 1);
    }

    #[test]
    fn test_color_hint_alone_is_still_risky() {
        let (mut engine, players) = started(1);
        let r1 = players[0].card_at(0).unwrap();

        engine.tell_color(r1, Knowledge::Known(Color::Red)).unwrap();
        assert_eq!(engine.play_card(r1).unwrap(), PlayOutcome::Risky);
        assert_eq!(engine.risk_count(), 1);
    }

    #[test]
    fn test_full_hint_makes_play_informed() {
        let (mut engine, players) = started(1);
        let r1 = players[0].card_at(0).unwrap();

        engine.tell_color(r1, Knowledge::Known(Color::Red)).unwrap();
        engine.tell_rank(r1, Knowledge::Known(Rank::One)).unwrap();
        assert_eq!(engine.revealed_info(r1.id), Some(RevealedInfo::of(&r1)));

        assert_eq!(engine.play_card(r1).unwrap(), PlayOutcome::Informed);
        assert_eq!(engine.score(), 1);
        assert_eq!(engine.risk_count(), 0);
    }

    #[test]
    fn test_novice_mode_knows_everything() {
        let (mut engine, players) = started(0);
        for card in players.iter().flat_map(|p| p.cards()) {
            assert!(engine.revealed_info(card.id).unwrap().is_complete());
        }

        let r1 = players[0].card_at(0).unwrap();
        assert_eq!(engine.play_card(r1).unwrap(), PlayOutcome::Informed);
        assert_eq!(engine.risk_count(), 0);
    }

    #[test]
    fn test_failed_play_changes_no_counters() {
        let (mut engine, players) = started(1);
        let r2 = players[0].card_at(1).unwrap();

        let err = engine.play_card(r2).unwrap_err();
        assert!(matches!(err, HanabiError::InvalidTurn(_)));
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.successful_plays(), 0);
        assert_eq!(engine.risk_count(), 0);
        assert_eq!(engine.table().to_string(), "R0 G0 B0 W0 Y0");
        assert_eq!(engine.discard_pile(), &[r2]);
    }

    #[test]
    fn test_untruthful_hints_rejected() {
        let (mut engine, players) = started(1);
        let g3 = players[1].card_at(2).unwrap();

        let err = engine.tell_color(g3, Knowledge::Known(Color::Blue)).unwrap_err();
        assert!(matches!(err, HanabiError::InvalidTurn(_)));
        let err = engine.tell_rank(g3, Knowledge::Known(Rank::Two)).unwrap_err();
        assert!(matches!(err, HanabiError::InvalidTurn(_)));
        assert_eq!(engine.revealed_info(g3.id), None);
    }

    #[test]
    fn test_empty_hints_rejected() {
        let (mut engine, players) = started(1);
        let g3 = players[1].card_at(2).unwrap();

        assert!(matches!(
            engine.tell_color(g3, Knowledge::Unknown),
            Err(HanabiError::InvalidTurn(_))
        ));
        assert!(matches!(
            engine.tell_rank(g3, Knowledge::Unknown),
            Err(HanabiError::InvalidTurn(_))
        ));
    }

    #[test]
    fn test_record_info_is_idempotent_and_narrows() {
        let (mut engine, players) = started(1);
        let g3 = players[1].card_at(2).unwrap();

        engine.tell_rank(g3, Knowledge::Known(Rank::Three)).unwrap();
        engine.tell_rank(g3, Knowledge::Known(Rank::Three)).unwrap();
        let info = engine.revealed_info(g3.id).unwrap();
        assert_eq!(info.rank, Knowledge::Known(Rank::Three));
        assert_eq!(info.color, Knowledge::Unknown);

        engine
            .record_info(g3, Knowledge::Unknown, Knowledge::Unknown)
            .unwrap();
        assert_eq!(engine.revealed_info(g3.id), Some(info));

        engine.tell_color(g3, Knowledge::Known(Color::Green)).unwrap();
        assert!(engine.revealed_info(g3.id).unwrap().is_complete());
    }

    #[test]
    fn test_drop_card_only_records() {
        let (mut engine, players) = started(1);
        let r5 = players[0].card_at(4).unwrap();

        engine.drop_card(r5);
        assert_eq!(engine.discard_pile(), &[r5]);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.risk_count(), 0);
    }

    #[test]
    fn test_restart_resets_state() {
        let (mut engine, players) = started(1);
        let r1 = players[0].card_at(0).unwrap();
        engine.tell_color(r1, Knowledge::Known(Color::Red)).unwrap();
        engine.play_card(r1).unwrap();
        engine.end_game();

        let mut factory = CardFactory::new();
        let deck = make_deck(&mut factory, &SCENARIO_DECK);
        let mut players = Player::seat_all(2);
        engine.start_game(deck, &mut players, 1).unwrap();

        assert!(!engine.is_finished());
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.risk_count(), 0);
        assert_eq!(engine.successful_plays(), 0);
        assert_eq!(engine.table().to_string(), "R0 G0 B0 W0 Y0");
        assert_eq!(engine.revealed_info(r1.id), None);
    }
}
