//! Status reports printed after every processed line

use crate::game::{GameEngine, TurnRotation};
use serde::{Deserialize, Serialize};

/// End-of-game counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub turns: u32,
    pub successful_plays: u32,
    pub risky_plays: u32,
}

/// Everything the status block shows, captured at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    pub turn: u32,
    pub score: u32,
    pub finished: bool,
    pub current_player: String,
    pub next_player: String,
    pub table: String,
    /// Present once the game has ended
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<GameSummary>,
}

impl StatusSnapshot {
    pub fn capture(engine: &GameEngine, rotation: &TurnRotation) -> Self {
        let finished = engine.is_finished();
        StatusSnapshot {
            turn: rotation.turn_number,
            score: engine.score(),
            finished,
            current_player: rotation.current().to_string(),
            next_player: rotation.next().to_string(),
            table: engine.table().to_string(),
            summary: finished.then(|| GameSummary {
                turns: rotation.turn_number,
                successful_plays: engine.successful_plays(),
                risky_plays: engine.risk_count(),
            }),
        }
    }

    /// The text status block, one entry per output line
    pub fn text_lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(5);
        if let Some(summary) = &self.summary {
            lines.push(format!(
                "Turn: {}, cards: {}, with risk: {}",
                summary.turns, summary.successful_plays, summary.risky_plays
            ));
        }
        lines.push(format!(
            "Turn: {}, Score: {}, Finished: {}",
            self.turn, self.score, self.finished
        ));
        lines.push(format!("{:>18}{}", "Current player: ", self.current_player));
        lines.push(format!("{:>18}{}", "Next player: ", self.next_player));
        lines.push(format!("{:>18}{}", "Table: ", self.table));
        lines
    }

    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
