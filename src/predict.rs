use crate::data_processing::Standings;
use crate::domain::Handle;
use crate::systems::{AdjustedField, SimpleElo, adjust_ranks};
use serde::Serialize;
use std::fmt;

/// A projected rating change for one contestant, unrounded.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Prediction {
    pub handle: String,
    pub old_rating: i32,
    pub expected_rank: f64,
    pub actual_rank: usize,
    pub performance: f64,
    pub field_size: usize,
    pub delta: f64,
    pub new_rating: f64,
}

impl Prediction {
    pub fn rounded_new_rating(&self) -> i64 {
        self.new_rating.round() as i64
    }

    pub fn rounded_delta(&self) -> i64 {
        self.delta.round() as i64
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "User: {}", self.handle)?;
        writeln!(f, "Old Rating: {}", self.old_rating)?;
        writeln!(f, "New Rating: {}", self.rounded_new_rating())?;
        write!(f, "Rating Change: {}", self.rounded_delta())
    }
}

/// Projects the rating change of `handle` within an already adjusted field.
/// Returns `None` if the handle is unrated or absent from the standings.
pub fn predict_in_field(system: &SimpleElo, field: &AdjustedField, handle: &str) -> Option<Prediction> {
    let player = field.find(handle)?;
    let change = system.rating_change(player, field);
    Some(Prediction {
        handle: player.handle.clone(),
        old_rating: player.rating.unwrap_or(0),
        expected_rank: change.expected_rank,
        actual_rank: player.adjusted_rank,
        performance: change.performance,
        field_size: field.len(),
        delta: change.delta,
        new_rating: change.new_rating,
    })
}

/// Like `predict_in_field()`, for a handle typed by a user.
/// Input that fails handle validation cannot be in the field, so it is simply not found.
pub fn predict_for_input(system: &SimpleElo, field: &AdjustedField, input: &str) -> Option<Prediction> {
    match Handle::parse(input.to_owned()) {
        Ok(handle) => predict_in_field(system, field, handle.as_ref()),
        Err(reason) => {
            tracing::warn!("{}", reason);
            None
        }
    }
}

/// Adjusts the standings and projects the rating change of `handle` with the default system.
#[tracing::instrument(name = "Predicting a rating change", skip(standings), fields(contest = %standings.contest.name))]
pub fn predict(standings: &Standings, handle: &str) -> Option<Prediction> {
    let field = adjust_ranks(standings.participants.iter().cloned());
    let prediction = predict_in_field(&SimpleElo::default(), &field, handle);
    if prediction.is_none() {
        tracing::warn!("{} is not among the {} rated contestants", handle, field.len());
    }
    prediction
}
