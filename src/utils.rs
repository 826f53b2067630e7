//! Assorted numeric helpers shared by the driver and the frontier.

/// Absolute tolerance for score comparisons during path reconstruction.
///
/// Scores are sums of per-cell match values in `[0, 1]`; comparing them for
/// equality after a different summation order needs a little slack.
pub const SCORE_TOLERANCE: f32 = 1e-3;

/// Optimistic ceiling on the total score of any completion of a partial path.
///
/// A path that has accumulated `score` and stands at cell `(i, j)` can take
/// at most `min(width - i, height - j)` further diagonal steps, each worth
/// at most 1.
#[inline]
pub fn max_possible_score(score: f32, width: u32, height: u32, i: u32, j: u32) -> f32 {
    score + (width - i).min(height - j) as f32
}

/// Score equality within [`SCORE_TOLERANCE`].
#[inline]
pub fn scores_match(a: f32, b: f32) -> bool {
    (a - b).abs() <= SCORE_TOLERANCE
}
