//! The trial-loop state machine.
//!
//! One session is a fixed number of question trials. Each trial moves
//! through `Presenting -> Feedback`, optionally detours through a supporter
//! shoutout, then either presents the next trial or completes.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::GameConfig;
use crate::feedback;
use crate::models::{Question, Supporter};

/// Where the session currently is within a trial.
#[derive(Clone, Debug)]
pub enum SessionPhase {
    /// Showing a question, waiting for an answer.
    Presenting,
    /// Showing commentator feedback for the answer just given.
    Feedback {
        correct: bool,
        commentator: &'static str,
        line: &'static str,
    },
    /// A supporter shoutout that must be dismissed before continuing.
    Supporter {
        supporter: Supporter,
        commentator: &'static str,
    },
    /// All trials answered; results are ready.
    Complete,
}

/// Data-free view of [`SessionPhase`], for input dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PhaseKind {
    Presenting,
    Feedback,
    Supporter,
    Complete,
}

impl SessionPhase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            SessionPhase::Presenting => PhaseKind::Presenting,
            SessionPhase::Feedback { .. } => PhaseKind::Feedback,
            SessionPhase::Supporter { .. } => PhaseKind::Supporter,
            SessionPhase::Complete => PhaseKind::Complete,
        }
    }
}

/// Outcome of one answered trial, kept for the result breakdown.
#[derive(Clone, Debug)]
pub struct TrialRecord {
    pub selected: String,
    pub correct: bool,
}

/// One run of N trials, owned by the game controller for its lifetime.
pub struct TrialSession {
    pub player_name: String,
    questions: Vec<Question>,
    current_index: usize,
    correct_count: usize,
    records: Vec<TrialRecord>,
    pub phase: SessionPhase,
}

impl TrialSession {
    /// Start a session with a fresh random draw from the pool.
    ///
    /// The draw size is clamped to the pool size, so a short pool yields a
    /// shorter session rather than an error. An empty pool yields `None`.
    pub fn start<R: Rng>(
        name: &str,
        pool: &[Question],
        config: &GameConfig,
        rng: &mut R,
    ) -> Option<Self> {
        if pool.is_empty() {
            return None;
        }

        let trimmed = name.trim();
        let player_name = if trimmed.is_empty() {
            config.default_player_name.clone()
        } else {
            trimmed.to_string()
        };

        let mut drawn: Vec<Question> = pool.to_vec();
        drawn.shuffle(rng);
        drawn.truncate(config.session_length.min(pool.len()));

        Some(Self {
            player_name,
            questions: drawn,
            current_index: 0,
            correct_count: 0,
            records: Vec::new(),
            phase: SessionPhase::Presenting,
        })
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.current_index)
    }

    /// 1-based, for display.
    pub fn current_trial_number(&self) -> usize {
        (self.current_index + 1).min(self.total_trials())
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn total_trials(&self) -> usize {
        self.questions.len()
    }

    pub fn correct_count(&self) -> usize {
        self.correct_count
    }

    pub fn records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.phase, SessionPhase::Complete)
    }

    /// Grade the selected option and move to commentator feedback.
    ///
    /// Ignored outside `Presenting`; the UI only offers the question's own
    /// options, so the selected string is always one of them.
    pub fn submit_answer<R: Rng>(&mut self, selected: &str, rng: &mut R) {
        if !matches!(self.phase, SessionPhase::Presenting) {
            return;
        }
        let Some(question) = self.current_question() else {
            return;
        };

        let correct = question.is_correct(selected);
        let commentator_id = question
            .commentator
            .as_deref()
            .unwrap_or(feedback::DEFAULT_COMMENTATOR);
        // Resolve through the pool lookup so unknown tags show the
        // fallback commentator's name alongside its lines.
        let commentator = feedback::display_name(commentator_id);
        let line = feedback::comment_for(commentator_id, correct, rng);

        if correct {
            self.correct_count += 1;
        }
        self.records.push(TrialRecord {
            selected: selected.to_string(),
            correct,
        });
        self.phase = SessionPhase::Feedback {
            correct,
            commentator,
            line,
        };
    }

    /// Leave the feedback view: maybe detour through a supporter shoutout
    /// (with probability `chance`), otherwise move to the next trial or to
    /// completion.
    pub fn advance<R: Rng>(&mut self, supporters: &[Supporter], chance: f64, rng: &mut R) {
        if !matches!(self.phase, SessionPhase::Feedback { .. }) {
            return;
        }

        if !supporters.is_empty() && rng.gen_bool(chance) {
            let supporter = supporters[rng.gen_range(0..supporters.len())].clone();
            let commentator = feedback::display_name(feedback::random_commentator(rng));
            self.phase = SessionPhase::Supporter {
                supporter,
                commentator,
            };
            return;
        }

        self.proceed();
    }

    /// Close the supporter shoutout and continue the session.
    pub fn dismiss_supporter(&mut self) {
        if matches!(self.phase, SessionPhase::Supporter { .. }) {
            self.proceed();
        }
    }

    fn proceed(&mut self) {
        self.current_index += 1;
        if self.current_index >= self.questions.len() {
            self.phase = SessionPhase::Complete;
        } else {
            self.phase = SessionPhase::Presenting;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn question(prompt: &str, answer: &str) -> Question {
        Question {
            question: prompt.to_string(),
            options: vec![answer.to_string(), "Wrong".to_string()],
            answer: answer.to_string(),
            difficulty: None,
            commentator: None,
        }
    }

    fn pool(n: usize) -> Vec<Question> {
        (0..n).map(|i| question(&format!("Q{}", i), "Yes")).collect()
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(99)
    }

    /// Answer the current question (optionally correctly) and skip any
    /// supporter shoutout on the way to the next trial.
    fn play_trial(session: &mut TrialSession, correct: bool, rng: &mut StdRng) {
        let selected = if correct { "Yes" } else { "Wrong" };
        session.submit_answer(selected, rng);
        assert!(matches!(session.phase, SessionPhase::Feedback { .. }));
        session.advance(&[], 0.0, rng);
    }

    #[test]
    fn empty_name_falls_back_to_default() {
        let config = GameConfig::default();
        let session =
            TrialSession::start("   ", &pool(5), &config, &mut rng()).expect("pool is non-empty");
        assert_eq!(session.player_name, config.default_player_name);
    }

    #[test]
    fn name_is_trimmed() {
        let config = GameConfig::default();
        let session =
            TrialSession::start("  Rin  ", &pool(5), &config, &mut rng()).unwrap();
        assert_eq!(session.player_name, "Rin");
    }

    #[test]
    fn empty_pool_cannot_start() {
        let config = GameConfig::default();
        assert!(TrialSession::start("Rin", &[], &config, &mut rng()).is_none());
    }

    #[test]
    fn short_pool_clamps_session_length() {
        let config = GameConfig::default();
        let session = TrialSession::start("Rin", &pool(3), &config, &mut rng()).unwrap();
        assert_eq!(session.total_trials(), 3);
    }

    #[test]
    fn full_session_reaches_complete_with_bounded_counters() {
        let config = GameConfig::default();
        let mut rng = rng();
        let mut session = TrialSession::start("Rin", &pool(8), &config, &mut rng).unwrap();
        assert_eq!(session.total_trials(), config.session_length);

        for i in 0..config.session_length {
            play_trial(&mut session, i % 2 == 0, &mut rng);
        }

        assert!(session.is_complete());
        assert_eq!(session.current_index(), config.session_length);
        assert!(session.correct_count() <= config.session_length);
        assert_eq!(session.correct_count(), 3);
        assert_eq!(session.records().len(), config.session_length);
    }

    #[test]
    fn submit_is_ignored_outside_presenting() {
        let config = GameConfig::default();
        let mut rng = rng();
        let mut session = TrialSession::start("Rin", &pool(5), &config, &mut rng).unwrap();

        session.submit_answer("Yes", &mut rng);
        let count = session.correct_count();
        session.submit_answer("Yes", &mut rng);
        assert_eq!(session.correct_count(), count);
        assert_eq!(session.records().len(), 1);
    }

    #[test]
    fn guaranteed_shoutout_requires_dismissal() {
        let config = GameConfig::default();
        let mut rng = rng();
        let supporters = vec![Supporter::new("Shadow Walker", "@NinjaPath", "Clan Supporter")];
        let mut session = TrialSession::start("Rin", &pool(5), &config, &mut rng).unwrap();

        session.submit_answer("Yes", &mut rng);
        session.advance(&supporters, 1.0, &mut rng);
        assert!(matches!(session.phase, SessionPhase::Supporter { .. }));

        // Still on trial 0 until the shoutout is dismissed.
        assert_eq!(session.current_index(), 0);
        session.dismiss_supporter();
        assert!(matches!(session.phase, SessionPhase::Presenting));
        assert_eq!(session.current_index(), 1);
    }

    #[test]
    fn zero_chance_never_shouts_out() {
        let config = GameConfig::default();
        let mut rng = rng();
        let supporters = vec![Supporter::new("Silent Blade", "@StealthArt", "Weapons Master")];
        let mut session = TrialSession::start("Rin", &pool(5), &config, &mut rng).unwrap();

        for _ in 0..config.session_length {
            session.submit_answer("Yes", &mut rng);
            session.advance(&supporters, 0.0, &mut rng);
            assert!(!matches!(session.phase, SessionPhase::Supporter { .. }));
        }
        assert!(session.is_complete());
    }

    #[test]
    fn unknown_commentator_still_produces_feedback() {
        let config = GameConfig::default();
        let mut rng = rng();
        let mut odd = question("Q", "Yes");
        odd.commentator = Some("yamazaki".to_string());
        let mut session = TrialSession::start("Rin", &[odd], &config, &mut rng).unwrap();

        session.submit_answer("Yes", &mut rng);
        match &session.phase {
            SessionPhase::Feedback {
                correct,
                commentator,
                ..
            } => {
                assert!(*correct);
                assert_eq!(*commentator, "Rikimaru");
            }
            other => panic!("expected feedback, got {:?}", other),
        }
    }
}
