use crate::Result;
use crate::metrics::{MetricKind, MetricSet};
use crate::scoring::ScoredRepository;
use core::borrow::Borrow;
use core::fmt::Write;
use serde::{Deserialize, Serialize};

/// The structured score record handed to package ingestion.
///
/// Each metric field holds the repository's normalized sub-score for that metric,
/// multiplied by the metric kind's fixed record weight. `score` is their sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub ramp_up: f64,
    pub correctness: f64,
    pub bus_factor: f64,
    pub responsiveness: f64,
    pub license: f64,
    pub dependency: f64,
    pub score: f64,
}

impl ScoreRecord {
    /// Build the record for one scored repository.
    ///
    /// A metric kind missing from `metrics` contributes `0.0`.
    #[must_use]
    pub fn new(repository: &ScoredRepository, metrics: &MetricSet) -> Self {
        let weighted = |kind: MetricKind| {
            metrics
                .position(kind)
                .and_then(|index| repository.sub_scores.get(index))
                .map_or(0.0, |score| score * kind.record_weight())
        };

        let ramp_up = weighted(MetricKind::RampUp);
        let correctness = weighted(MetricKind::Correctness);
        let bus_factor = weighted(MetricKind::BusFactor);
        let responsiveness = weighted(MetricKind::Responsiveness);
        let license = weighted(MetricKind::License);
        let dependency = weighted(MetricKind::Dependency);

        Self {
            ramp_up,
            correctness,
            bus_factor,
            responsiveness,
            license,
            dependency,
            score: ramp_up + correctness + bus_factor + responsiveness + license + dependency,
        }
    }
}

/// Write one JSON score record per line, in the order given.
pub fn generate<T, W>(repositories: &[T], metrics: &MetricSet, writer: &mut W) -> Result<()>
where
    T: Borrow<ScoredRepository>,
    W: Write,
{
    for repository in repositories {
        let record = ScoreRecord::new(repository.borrow(), metrics);
        writeln!(writer, "{}", serde_json::to_string(&record)?)?;
    }

    Ok(())
}
