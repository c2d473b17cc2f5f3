//! Commentator flavor feedback.
//!
//! Each question carries an optional commentator tag; after every answer a
//! random line from that character's correct/incorrect pool is shown.
//! Unknown tags resolve to the default commentator, never to a random one.

use rand::Rng;
use rand::seq::SliceRandom;

pub const DEFAULT_COMMENTATOR: &str = "rikimaru";

struct CommentPool {
    id: &'static str,
    name: &'static str,
    correct: &'static [&'static str],
    incorrect: &'static [&'static str],
}

static POOLS: [CommentPool; 3] = [
    CommentPool {
        id: "rikimaru",
        name: "Rikimaru",
        correct: &[
            "Correct. The Azuma way is subtle and sure.",
            "Well reasoned. A ninja must understand both blade and mind.",
            "Good judgment. True strength lies in restraint.",
            "Yes. The silent approach leaves no trace.",
            "Proper. We serve from darkness.",
        ],
        incorrect: &[
            "No. The scrolls teach otherwise.",
            "Incorrect. Study our ways more carefully.",
            "Wrong. A true ninja thinks before acting.",
            "That violates our code.",
            "Unwise. Consider the alternatives.",
        ],
    },
    CommentPool {
        id: "ayame",
        name: "Ayame",
        correct: &[
            "Excellent! Speed and grace win battles.",
            "Well done! A kunoichi's intuition is key.",
            "Perfect! The silent step prevails.",
            "Yes! Cleverness over brute force.",
            "Good! Adaptability is our strength.",
        ],
        incorrect: &[
            "No! Too direct. We work unseen.",
            "Incorrect! Patience would serve better.",
            "Wrong! A kunoichi must be subtle.",
            "No! Consider the consequences.",
            "Incorrect! That lacks elegance.",
        ],
    },
    CommentPool {
        id: "tatsumaru",
        name: "Tatsumaru",
        correct: &[
            "Hmph. You understand true power.",
            "Correct. Strength determines fate.",
            "Good. Power must be absolute.",
            "Yes. The strong make their own rules.",
            "Well chosen. Sentiment is weakness.",
        ],
        incorrect: &[
            "Weak. Such thinking leads to failure.",
            "No! Power is taken, not given.",
            "Wrong. Sentimentality is a luxury.",
            "Incorrect. Only strength matters.",
            "No! You think like a servant.",
        ],
    },
];

fn pool_for(commentator: &str) -> &'static CommentPool {
    POOLS
        .iter()
        .find(|p| p.id == commentator)
        .unwrap_or(&POOLS[0])
}

/// Pick a random feedback line for the given commentator and outcome.
///
/// Unknown commentator ids fall back to [`DEFAULT_COMMENTATOR`].
pub fn comment_for<R: Rng>(commentator: &str, correct: bool, rng: &mut R) -> &'static str {
    let pool = pool_for(commentator);
    let lines = if correct { pool.correct } else { pool.incorrect };
    // Pools are never empty, but choose() keeps this total anyway.
    lines.choose(rng).copied().unwrap_or("...")
}

/// Display name for a commentator id, defaulting like the comment pools.
pub fn display_name(commentator: &str) -> &'static str {
    pool_for(commentator).name
}

/// A uniformly random commentator id, used for supporter shoutouts.
pub fn random_commentator<R: Rng>(rng: &mut R) -> &'static str {
    POOLS[rng.gen_range(0..POOLS.len())].id
}

/// Substitute `{key}` tokens from the given map.
///
/// Tokens with no matching key are left intact, so a typo in a template
/// shows up in the output instead of silently vanishing.
pub fn fill_template(text: &str, vars: &[(&str, &str)]) -> String {
    let mut out = text.to_string();
    for (key, value) in vars {
        out = out.replace(&format!("{{{}}}", key), value);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn unknown_commentator_falls_back_to_default() {
        let mut rng = StdRng::seed_from_u64(7);
        let line = comment_for("yamazaki", true, &mut rng);
        assert!(pool_for(DEFAULT_COMMENTATOR).correct.contains(&line));
        assert_eq!(display_name("yamazaki"), "Rikimaru");
    }

    #[test]
    fn correct_and_incorrect_draw_from_separate_pools() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..20 {
            let good = comment_for("ayame", true, &mut rng);
            let bad = comment_for("ayame", false, &mut rng);
            assert!(pool_for("ayame").correct.contains(&good));
            assert!(pool_for("ayame").incorrect.contains(&bad));
        }
    }

    #[test]
    fn seeded_selection_is_deterministic() {
        let a = comment_for("tatsumaru", false, &mut StdRng::seed_from_u64(42));
        let b = comment_for("tatsumaru", false, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn template_substitutes_known_keys() {
        let out = fill_template("Well done, {player}.", &[("player", "Rin")]);
        assert_eq!(out, "Well done, Rin.");
    }

    #[test]
    fn template_preserves_unknown_tokens() {
        let out = fill_template("Hello {plyer}", &[("player", "Rin")]);
        assert_eq!(out, "Hello {plyer}");
    }
}
