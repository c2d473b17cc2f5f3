//! Question and supporter data loading.
//!
//! An external question file is optional; any failure to read or parse it
//! falls back to the built-in pool with a warning. Data loading never aborts
//! the game.

use std::fmt;
use std::fs;
use std::path::Path;

use log::{info, warn};

use crate::models::{Question, Supporter};

/// Error reading an external question file.
#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(e) => write!(f, "failed to read question file: {}", e),
            LoadError::Parse(e) => write!(f, "failed to parse question file: {}", e),
            LoadError::Empty => write!(f, "question file contains no questions"),
        }
    }
}

impl std::error::Error for LoadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LoadError::Io(e) => Some(e),
            LoadError::Parse(e) => Some(e),
            LoadError::Empty => None,
        }
    }
}

/// Load the question pool, falling back to the built-in set on any failure.
pub fn load_questions(path: Option<&Path>) -> Vec<Question> {
    match path {
        None => builtin_questions(),
        Some(path) => match read_questions(path) {
            Ok(questions) => {
                info!("loaded {} questions from {}", questions.len(), path.display());
                questions
            }
            Err(err) => {
                warn!(
                    "{} ({}); using the built-in question pool",
                    err,
                    path.display()
                );
                builtin_questions()
            }
        },
    }
}

fn read_questions(path: &Path) -> Result<Vec<Question>, LoadError> {
    let content = fs::read_to_string(path).map_err(LoadError::Io)?;
    let questions: Vec<Question> = serde_json::from_str(&content).map_err(LoadError::Parse)?;
    if questions.is_empty() {
        return Err(LoadError::Empty);
    }
    Ok(questions)
}

fn q(prompt: &str, options: &[&str], answer: &str, commentator: &str) -> Question {
    Question {
        question: prompt.to_string(),
        options: options.iter().map(|s| s.to_string()).collect(),
        answer: answer.to_string(),
        difficulty: None,
        commentator: Some(commentator.to_string()),
    }
}

/// The built-in question pool, always available.
pub fn builtin_questions() -> Vec<Question> {
    vec![
        q(
            "Who is the main Azuma ninja?",
            &["Rikimaru", "Ayame", "Tatsumaru", "Lord Gohda"],
            "Rikimaru",
            "rikimaru",
        ),
        q(
            "Which tool is used for silent kills?",
            &["Smoke Bomb", "Shuriken", "Sword", "Grapple Hook"],
            "Shuriken",
            "rikimaru",
        ),
        q(
            "Which stage is known for pagodas and lanterns?",
            &["Temple", "Castle", "Village", "Forest"],
            "Temple",
            "ayame",
        ),
        q(
            "Who is Rikimaru's ally?",
            &["Ayame", "Lord Gohda", "Onikage", "Tatsumaru"],
            "Ayame",
            "ayame",
        ),
        q(
            "You see a guard patrolling near your target. What do you do?",
            &["Attack directly", "Hide and wait", "Distract", "Retreat"],
            "Hide and wait",
            "rikimaru",
        ),
        q(
            "Your mission is timed. Do you move quickly and risk detection?",
            &["Yes", "No", "Depends", "Ignore"],
            "Depends",
            "ayame",
        ),
        q(
            "Is it honorable to kill a sleeping enemy?",
            &["Yes", "No", "Depends", "Ignore"],
            "Depends",
            "tatsumaru",
        ),
        q(
            "Should a ninja steal from a corrupt lord?",
            &["Yes", "No", "Depends", "Ignore"],
            "Depends",
            "tatsumaru",
        ),
        q(
            "Who said: 'Stealth is the soul of the ninja'?",
            &["Rikimaru", "Ayame", "Tatsumaru", "Lord Gohda"],
            "Rikimaru",
            "rikimaru",
        ),
        q(
            "Who said: 'Honor guides the shadow'?",
            &["Ayame", "Rikimaru", "Rin", "Tatsumaru"],
            "Ayame",
            "ayame",
        ),
    ]
}

/// The hand-maintained clan ally list shown on the supporters screen.
pub fn builtin_supporters() -> Vec<Supporter> {
    vec![
        Supporter::new("Rikimaru", "@AzureShadow", "Master Ninja"),
        Supporter::new("Ayame", "@CrimsonBlossom", "Kunoichi Specialist"),
        Supporter::new("Tatsumaru", "@FallenBlade", "Former Azuma Elite"),
        Supporter::new("Lord Gohda", "@GohdaLord", "Clan Patron"),
        Supporter::new("Matsunoshin", "@GoldenRetainer", "Chief Strategist"),
        Supporter::new("Shadow Walker", "@NinjaPath", "Clan Supporter"),
        Supporter::new("Silent Blade", "@StealthArt", "Weapons Master"),
        Supporter::new("Kunoichi", "@NightFlower", "Training Master"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn builtin_pool_is_consistent() {
        let questions = builtin_questions();
        assert!(!questions.is_empty());
        for question in &questions {
            assert!(
                question.options.contains(&question.answer),
                "answer missing from options: {}",
                question.question
            );
        }
    }

    #[test]
    fn missing_file_falls_back_to_builtin_pool() {
        let path = PathBuf::from("/nonexistent/questions.json");
        let questions = load_questions(Some(&path));
        assert_eq!(questions.len(), builtin_questions().len());
    }

    #[test]
    fn builtin_supporters_are_named() {
        let supporters = builtin_supporters();
        assert_eq!(supporters.len(), 8);
        assert!(supporters.iter().all(|s| !s.name.is_empty()));
    }
}
