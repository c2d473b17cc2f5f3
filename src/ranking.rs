//! Progression and ranking engine.
//!
//! Pure functions over the rank table and the durable progression record.
//! The current tier is always recomputed from the cumulative score, never
//! patched incrementally, so repeated recomputation can never drift.

use chrono::{DateTime, Utc};

use crate::config::GameConfig;
use crate::models::{GradeBand, PlayerProgression, RankTier};

/// Highest tier whose threshold is at or below `score`.
///
/// Total for every `score` as long as the table is validated (non-empty,
/// first threshold 0), and monotone in `score`.
pub fn tier_for<'a>(score: u64, table: &'a [RankTier]) -> &'a RankTier {
    table
        .iter()
        .rev()
        .find(|tier| tier.min_score <= score)
        .unwrap_or(&table[0])
}

/// Position of a tier id in the ladder, 0 (lowest) when unknown.
pub fn tier_index(id: &str, table: &[RankTier]) -> usize {
    table.iter().position(|tier| tier.id == id).unwrap_or(0)
}

/// Fraction of the way from the current tier's threshold to the next,
/// clamped to [0, 1]. The top tier always reports 1.0. Display only.
pub fn tier_progress(score: u64, table: &[RankTier]) -> f64 {
    let current = tier_for(score, table);
    let index = tier_index(&current.id, table);
    match table.get(index + 1) {
        Some(next) => {
            let span = (next.min_score - current.min_score) as f64;
            let into = (score - current.min_score) as f64;
            (into / span).clamp(0.0, 1.0)
        }
        None => 1.0,
    }
}

/// Points and coins earned by one completed session or mission.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReward {
    pub points: u64,
    pub coins: u64,
    /// Whether the all-correct completion bonus was granted.
    pub perfect: bool,
}

/// Reward for answering `correct` of `total` questions.
///
/// The completion bonus requires every answer correct, and a non-empty
/// session (a zero-length session can never be "perfect").
pub fn session_reward(correct: usize, total: usize, config: &GameConfig) -> SessionReward {
    let perfect = total > 0 && correct == total;
    let mut points = correct as u64 * config.points_per_correct;
    let mut coins = correct as u64 * config.coins_per_correct;
    if perfect {
        points += config.perfect_bonus_points;
        coins += config.perfect_bonus_coins;
    }
    SessionReward {
        points,
        coins,
        perfect,
    }
}

/// Surfaced when applying a reward moved the player to a different tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankChange {
    pub old_id: String,
    pub old_name: String,
    pub new_id: String,
    pub new_name: String,
}

/// Everything the result screen needs after a completed session.
#[derive(Clone, Debug, PartialEq)]
pub struct SessionOutcome {
    pub reward: SessionReward,
    pub rank_change: Option<RankChange>,
}

/// Fold a completed session into the durable progression record.
pub fn apply_session(
    progression: &mut PlayerProgression,
    correct: usize,
    total: usize,
    config: &GameConfig,
    now: DateTime<Utc>,
) -> SessionOutcome {
    let reward = session_reward(correct, total, config);
    let rank_change = apply_reward(progression, reward.points, reward.coins, config, now);
    progression.sessions_completed += 1;
    progression.total_correct += correct as u64;
    progression.total_answered += total as u64;
    SessionOutcome {
        reward,
        rank_change,
    }
}

/// Add points and coins, recompute the tier from scratch, and detect a
/// tier change. Also shared by the mission subsystem.
pub fn apply_reward(
    progression: &mut PlayerProgression,
    points: u64,
    coins: u64,
    config: &GameConfig,
    now: DateTime<Utc>,
) -> Option<RankChange> {
    let old_tier = tier_for(progression.total_score, &config.ranks).clone();

    progression.total_score += points;
    progression.coins += coins;
    progression.last_played = Some(now);

    let new_tier = tier_for(progression.total_score, &config.ranks);
    progression.rank_id = new_tier.id.clone();

    // Highest rank only moves up, even if a reshaped table would place the
    // stored value above the freshly computed one.
    let highest = tier_index(&progression.highest_rank_id, &config.ranks);
    if tier_index(&new_tier.id, &config.ranks) > highest {
        progression.highest_rank_id = new_tier.id.clone();
    }

    if old_tier.id != new_tier.id {
        Some(RankChange {
            old_id: old_tier.id,
            old_name: old_tier.name,
            new_id: new_tier.id.clone(),
            new_name: new_tier.name.clone(),
        })
    } else {
        None
    }
}

/// Grade band for a session's percentage correct.
pub fn grade_for<'a>(correct: usize, total: usize, bands: &'a [GradeBand]) -> &'a GradeBand {
    let percent = percentage(correct, total);
    bands
        .iter()
        .rev()
        .find(|band| f64::from(band.min_percent) <= percent)
        .unwrap_or(&bands[0])
}

/// Percentage correct, 0.0 for an empty session.
pub fn percentage(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        (correct as f64 / total as f64) * 100.0
    }
}
