use crate::facts::RepositoryFacts;
use std::sync::Arc;

/// A repository with its normalized sub-scores and the weighted overall score.
///
/// `sub_scores[i]` belongs to metric `i` of the metric set used for the run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredRepository {
    pub facts: Arc<RepositoryFacts>,
    pub sub_scores: Vec<f64>,
    pub overall_score: f64,
}
