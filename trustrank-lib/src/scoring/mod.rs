//! Scoring runs: aggregation, ranking, and orchestration
//!
//! [`Scorer`] drives a run. For each metric in the [`MetricSet`](crate::metrics::MetricSet)
//! it scores the whole cohort and normalizes the results, then combines each repository's
//! normalized sub-scores into an overall score with [`overall_score`]. The run result keeps
//! repositories in input order; [`rank`] orders them best first.
//!
//! A run can be stopped through its [`Cancellation`] flag. Progress goes to an optional
//! [`Progress`] sink supplied by the caller.

mod aggregate;
mod cancellation;
mod progress;
mod ranking;
mod scored_repository;
mod scorer;

pub(crate) const LOG_TARGET: &str = "   scoring";

pub use aggregate::overall_score;
pub use cancellation::Cancellation;
pub use progress::Progress;
pub use ranking::rank;
pub use scored_repository::ScoredRepository;
pub use scorer::{ScoreRun, Scorer};
