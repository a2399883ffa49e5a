/// Weighted sum of a repository's normalized sub-scores.
///
/// `sub_scores[i]` is paired with `weights[i]`; weights are used as given and need not sum to 1.
#[must_use]
pub fn overall_score(sub_scores: &[f64], weights: &[f64]) -> f64 {
    debug_assert_eq!(sub_scores.len(), weights.len(), "every sub-score needs a weight");
    sub_scores.iter().zip(weights).map(|(score, weight)| score * weight).sum()
}
