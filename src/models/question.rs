use serde::Deserialize;

/// A single trivia question as loaded from the question pool.
#[derive(Clone, Debug, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<String>,
    pub answer: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub commentator: Option<String>,
}

impl Question {
    /// Exact string comparison against the correct option.
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}
