use crate::data_processing::Participant;
use serde::Serialize;

/// A participant annotated with its place among the rated contestants.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankedParticipant {
    pub handle: String,
    pub rating: Option<i32>,
    pub points: f64,
    pub raw_rank: usize,
    /// 1-based place after removing unrated contestants; ties share a place.
    pub adjusted_rank: usize,
}

impl RankedParticipant {
    fn new(participant: Participant, adjusted_rank: usize) -> Self {
        Self {
            handle: participant.handle,
            rating: participant.rating,
            points: participant.points,
            raw_rank: participant.raw_rank,
            adjusted_rank,
        }
    }

    /// Rating used in the Elo formulas; a missing rating counts as 0.
    pub fn effective_rating(&self) -> f64 {
        self.rating.unwrap_or(0) as f64
    }
}

/// The rated contestants of a contest, from first to last place.
#[derive(Clone, Debug, Default)]
pub struct AdjustedField {
    ranked: Vec<RankedParticipant>,
}

impl AdjustedField {
    pub fn len(&self) -> usize {
        self.ranked.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RankedParticipant> {
        self.ranked.iter()
    }

    pub fn as_slice(&self) -> &[RankedParticipant] {
        &self.ranked
    }

    /// Returns the contestant with the given handle, if they're in the field.
    pub fn find(&self, handle: &str) -> Option<&RankedParticipant> {
        self.ranked.iter().find(|p| p.handle == handle)
    }
}

impl<'a> IntoIterator for &'a AdjustedField {
    type Item = &'a RankedParticipant;
    type IntoIter = std::slice::Iter<'a, RankedParticipant>;

    fn into_iter(self) -> Self::IntoIter {
        self.ranked.iter()
    }
}

/// Drops unrated contestants, sorts the rest by points (then rating), and assigns places.
///
/// A contestant tied on points with its predecessor inherits the predecessor's place;
/// anyone else is placed at its own 1-based position, so places skip after a tie:
/// points `[9, 8, 8, 8, 7, 6]` are placed `[1, 2, 2, 2, 5, 6]`.
/// Rating only decides the order within a tie, never the place.
pub fn adjust_ranks(participants: impl IntoIterator<Item = Participant>) -> AdjustedField {
    let mut rated: Vec<Participant> = participants.into_iter().filter(Participant::is_rated).collect();

    // Stable, so exact duplicates keep their input order.
    // Adding 0.0 turns -0.0 into 0.0, which total_cmp would otherwise order apart.
    rated.sort_by(|a, b| {
        (b.points + 0.)
            .total_cmp(&(a.points + 0.))
            .then_with(|| b.rating.cmp(&a.rating))
    });

    let mut ranked: Vec<RankedParticipant> = Vec::with_capacity(rated.len());
    for (i, participant) in rated.into_iter().enumerate() {
        let adjusted_rank = match ranked.last() {
            Some(prev) if prev.points == participant.points => prev.adjusted_rank,
            _ => i + 1,
        };
        ranked.push(RankedParticipant::new(participant, adjusted_rank));
    }

    tracing::debug!("Adjusted field holds {} rated contestants", ranked.len());
    AdjustedField { ranked }
}
