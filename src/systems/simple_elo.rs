//! A single-pass Elo estimate of one contestant's rating change, in the spirit of
//! the Codeforces system (https://codeforces.com/blog/entry/20762) but without its
//! binary search for a performance rating.

use super::{AdjustedField, RankedParticipant};
use crate::numerical::{ELO_SCALE, elo_win_probability};
use serde::Serialize;

#[derive(Debug)]
pub struct SimpleElo {
    pub k_factor: f64, // must be positive, scales every delta
    pub scale: f64,    // must be positive, the rating gap for 10:1 odds
}

impl Default for SimpleElo {
    fn default() -> Self {
        Self {
            k_factor: 40.,
            scale: ELO_SCALE,
        }
    }
}

/// The outcome of `SimpleElo::rating_change()`, before any rounding.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RatingChange {
    pub expected_rank: f64,
    pub performance: f64,
    pub delta: f64,
    pub new_rating: f64,
}

impl SimpleElo {
    /// Sum of the player's win probabilities against everyone in the field, itself included.
    /// The self-comparison always contributes exactly 0.5.
    pub fn expected_rank(&self, player: &RankedParticipant, field: &AdjustedField) -> f64 {
        let my_rating = player.effective_rating();
        field
            .iter()
            .map(|foe| elo_win_probability(my_rating, foe.effective_rating(), self.scale))
            .sum()
    }

    /// Number of places at or below the player's: the winner scores the field size.
    pub fn performance(&self, player: &RankedParticipant, field: &AdjustedField) -> f64 {
        (field.len() + 1) as f64 - player.adjusted_rank as f64
    }

    // The caller guarantees that player is a member of field
    pub fn rating_change(&self, player: &RankedParticipant, field: &AdjustedField) -> RatingChange {
        let expected_rank = self.expected_rank(player, field);
        let performance = self.performance(player, field);
        let delta = self.k_factor * (performance - expected_rank);
        RatingChange {
            expected_rank,
            performance,
            delta,
            new_rating: player.effective_rating() + delta,
        }
    }
}
