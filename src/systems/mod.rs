mod rank_adjust;
mod simple_elo;

pub use rank_adjust::{AdjustedField, RankedParticipant, adjust_ranks};
pub use simple_elo::{RatingChange, SimpleElo};
