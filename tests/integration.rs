// Integration tests exercising the library surface the way the binary
// uses it: draw a session from the built-in pool, play it through, and
// fold the result into persisted progression.

use rand::SeedableRng;
use rand::rngs::StdRng;

use shadow_trials::GameConfig;
use shadow_trials::data;
use shadow_trials::ranking;
use shadow_trials::session::{SessionPhase, TrialSession};
use shadow_trials::storage::SaveStore;

#[test]
fn full_session_from_builtin_pool_updates_progression() {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(2024);
    let pool = data::load_questions(None);

    let mut session =
        TrialSession::start("Rin", &pool, &config, &mut rng).expect("built-in pool is non-empty");
    assert_eq!(session.total_trials(), config.session_length);

    // Always answer correctly; the correct option is part of the question.
    while !session.is_complete() {
        match &session.phase {
            SessionPhase::Presenting => {
                let answer = session.current_question().unwrap().answer.clone();
                session.submit_answer(&answer, &mut rng);
            }
            SessionPhase::Feedback { correct, .. } => {
                assert!(*correct);
                session.advance(&data::builtin_supporters(), config.supporter_chance, &mut rng);
            }
            SessionPhase::Supporter { .. } => session.dismiss_supporter(),
            SessionPhase::Complete => unreachable!(),
        }
    }

    assert_eq!(session.correct_count(), config.session_length);

    let mut progression = shadow_trials::PlayerProgression::default();
    let outcome = ranking::apply_session(
        &mut progression,
        session.correct_count(),
        session.total_trials(),
        &config,
        chrono::Utc::now(),
    );

    assert!(outcome.reward.perfect);
    assert_eq!(progression.total_score, 1000);
    assert_eq!(progression.rank_id, "ninja");
    assert!(outcome.rank_change.is_some());

    // Persist and reload through the storage adapter.
    let dir = std::env::temp_dir().join(format!("shadow-trials-it-{}", std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    let store = SaveStore::new(&dir);
    store.save_progression(&progression);
    assert_eq!(store.load_progression(), progression);
}

#[test]
fn unavailable_question_file_still_starts_a_session() {
    let config = GameConfig::default();
    let mut rng = StdRng::seed_from_u64(5);
    let missing = std::path::PathBuf::from("/no/such/questions.json");
    let pool = data::load_questions(Some(&missing));

    let fallback = data::builtin_questions();
    assert_eq!(pool.len(), fallback.len());

    let session = TrialSession::start("", &pool, &config, &mut rng).unwrap();
    assert_eq!(session.player_name, config.default_player_name);
    assert_eq!(
        session.total_trials(),
        config.session_length.min(fallback.len())
    );
}
