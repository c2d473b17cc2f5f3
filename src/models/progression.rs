use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Durable player progression, persisted across sessions.
///
/// `rank_id` is always recomputed from `total_score` against the rank table;
/// it is stored only so the stats screen can render without a table lookup
/// at deserialization time. `highest_rank_id` only ever moves up the ladder.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerProgression {
    pub total_score: u64,
    pub sessions_completed: u64,
    pub total_correct: u64,
    pub total_answered: u64,
    pub coins: u64,
    pub rank_id: String,
    pub highest_rank_id: String,
    pub last_played: Option<DateTime<Utc>>,
}

impl Default for PlayerProgression {
    fn default() -> Self {
        Self {
            total_score: 0,
            sessions_completed: 0,
            total_correct: 0,
            total_answered: 0,
            coins: 0,
            rank_id: "apprentice".to_string(),
            highest_rank_id: "apprentice".to_string(),
            last_played: None,
        }
    }
}

impl PlayerProgression {
    /// Lifetime answer accuracy in percent, 0.0 when nothing answered yet.
    pub fn accuracy(&self) -> f64 {
        if self.total_answered == 0 {
            0.0
        } else {
            (self.total_correct as f64 / self.total_answered as f64) * 100.0
        }
    }
}
