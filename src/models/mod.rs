mod progression;
mod question;
mod rank;
mod supporter;

pub use progression::PlayerProgression;
pub use question::Question;
pub use rank::{GradeBand, RankTier};
pub use supporter::Supporter;
