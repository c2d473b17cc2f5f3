//! Game configuration.
//!
//! Every tunable constant lives here: session length, reward values, the
//! supporter interstitial probability, the cumulative rank ladder, and the
//! session grade bands. A JSON file passed with `--config` overrides the
//! defaults field by field.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::models::{GradeBand, RankTier};

/// All gameplay constants in one validated record.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Questions drawn per session (clamped to the pool size).
    pub session_length: usize,
    /// Name used when the player submits an empty or whitespace-only name.
    pub default_player_name: String,
    pub points_per_correct: u64,
    /// Granted only when every answer in the session was correct.
    pub perfect_bonus_points: u64,
    pub coins_per_correct: u64,
    pub perfect_bonus_coins: u64,
    /// Probability in [0, 1] of a supporter shoutout between trials.
    pub supporter_chance: f64,
    pub ranks: Vec<RankTier>,
    pub grades: Vec<GradeBand>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            session_length: 5,
            default_player_name: "Ninja".to_string(),
            points_per_correct: 100,
            perfect_bonus_points: 500,
            coins_per_correct: 10,
            perfect_bonus_coins: 50,
            supporter_chance: 0.2,
            ranks: default_ranks(),
            grades: default_grades(),
        }
    }
}

fn default_ranks() -> Vec<RankTier> {
    vec![
        RankTier::new("apprentice", "Apprentice", 0, 1),
        RankTier::new("shinobi", "Shinobi", 100, 2),
        RankTier::new("assassin", "Assassin", 300, 3),
        RankTier::new("ninja", "Ninja", 700, 4),
        RankTier::new("master_ninja", "Master Ninja", 1500, 5),
        RankTier::new("grand_master", "Grand Master", 3000, 6),
    ]
}

fn default_grades() -> Vec<GradeBand> {
    vec![
        GradeBand::new(
            0,
            "THUG",
            "Unseen Failure",
            "You have much to learn, {player}. Return to the shadows and train harder.",
        ),
        GradeBand::new(
            40,
            "NOVICE",
            "Hidden Footstep",
            "You have passed the trial, {player}, but your blade lacks discipline.",
        ),
        GradeBand::new(
            80,
            "ELITE NINJA",
            "Expert Infiltrator",
            "Well done, {player}. Lord Gohda will be pleased with your progress.",
        ),
        GradeBand::new(
            100,
            "GRANDMASTER",
            "Shadow Assassin",
            "Unbelievable, {player}. You are a true master of the Azuma Clan.",
        ),
    ]
}

/// Error validating or loading a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "Failed to read config: {}", e),
            ConfigError::Parse(e) => write!(f, "Failed to parse config: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
            ConfigError::Invalid(_) => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(err: std::io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        ConfigError::Parse(err)
    }
}

impl GameConfig {
    /// Load a config file and validate it.
    pub fn from_json<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the structural invariants the rest of the game relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session_length == 0 {
            return Err(ConfigError::Invalid(
                "session_length must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.supporter_chance) {
            return Err(ConfigError::Invalid(
                "supporter_chance must be in [0, 1]".to_string(),
            ));
        }
        if self.default_player_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "default_player_name must not be empty".to_string(),
            ));
        }

        match self.ranks.first() {
            None => {
                return Err(ConfigError::Invalid("rank table is empty".to_string()));
            }
            Some(first) if first.min_score != 0 => {
                return Err(ConfigError::Invalid(
                    "lowest rank threshold must be 0".to_string(),
                ));
            }
            Some(_) => {}
        }
        for pair in self.ranks.windows(2) {
            if pair[1].min_score <= pair[0].min_score {
                return Err(ConfigError::Invalid(format!(
                    "rank thresholds must strictly increase ({} -> {})",
                    pair[0].id, pair[1].id
                )));
            }
        }

        match self.grades.first() {
            None => {
                return Err(ConfigError::Invalid("grade table is empty".to_string()));
            }
            Some(first) if first.min_percent != 0 => {
                return Err(ConfigError::Invalid(
                    "lowest grade threshold must be 0".to_string(),
                ));
            }
            Some(_) => {}
        }
        for pair in self.grades.windows(2) {
            if pair[1].min_percent <= pair[0].min_percent {
                return Err(ConfigError::Invalid(
                    "grade thresholds must strictly increase".to_string(),
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_non_increasing_rank_thresholds() {
        let mut config = GameConfig::default();
        config.ranks[2].min_score = config.ranks[1].min_score;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_nonzero_first_rank_threshold() {
        let mut config = GameConfig::default();
        config.ranks[0].min_score = 10;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_out_of_range_supporter_chance() {
        let mut config = GameConfig::default();
        config.supporter_chance = 1.5;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_empty_rank_table() {
        let mut config = GameConfig::default();
        config.ranks.clear();
        assert!(config.validate().is_err());
    }
}
