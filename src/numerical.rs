/// Rating gap at which the stronger player is ten times as likely to win.
pub const ELO_SCALE: f64 = 400.;

/// Probability that a player rated `rating` beats a player rated `foe`,
/// under the classical Elo logistic curve with base 10.
pub fn elo_win_probability(rating: f64, foe: f64, scale: f64) -> f64 {
    1. / (1. + 10f64.powf((foe - rating) / scale))
}
