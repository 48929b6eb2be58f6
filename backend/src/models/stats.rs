use crate::models::game::Move;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Cumulative counters for one player
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerRecord {
    pub wins: u64,
    pub losses: u64,
    pub draws: u64,
}

/// Running maxima across all players, stored as the `max-stats` record
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct GlobalAggregate {
    pub best_winner: Option<String>,
    pub best_wins: u64,
    pub worst_loser: Option<String>,
    pub worst_losses: u64,
}

/// One side of a settled match
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub player: String,
    #[serde(rename = "move")]
    pub chosen: Move,
}

/// Summary of a settled match, used for the audit log
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchReport {
    pub id: Uuid,
    pub first: Participant,
    pub second: Participant,
    /// `None` for a draw
    pub winner: Option<String>,
    pub settled_at: DateTime<Utc>,
}

impl MatchReport {
    pub fn new(first: Participant, second: Participant, winner: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            first,
            second,
            winner,
            settled_at: Utc::now(),
        }
    }

    /// Winner name for log output, empty for a draw
    pub fn winner_label(&self) -> &str {
        self.winner.as_deref().unwrap_or("")
    }
}
