use serde::Deserialize;

/// One tier in the cumulative-score rank ladder.
///
/// Tables are ordered ascending by `min_score`; the first tier's threshold
/// is always 0 so every score maps to a tier.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct RankTier {
    pub id: String,
    pub name: String,
    pub min_score: u64,
    pub stars: u8,
}

impl RankTier {
    pub fn new(id: &str, name: &str, min_score: u64, stars: u8) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            min_score,
            stars,
        }
    }
}

/// A session-result flavor band keyed on percentage correct.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GradeBand {
    /// Minimum percentage (0-100) for this band.
    pub min_percent: u8,
    pub rank: String,
    pub title: String,
    /// Verdict text; `{player}` is substituted with the display name.
    pub verdict: String,
}

impl GradeBand {
    pub fn new(min_percent: u8, rank: &str, title: &str, verdict: &str) -> Self {
        Self {
            min_percent,
            rank: rank.to_string(),
            title: title.to_string(),
            verdict: verdict.to_string(),
        }
    }
}
