use super::{LOG_TARGET, MetricKind, calculators, correctness, normalize};
use crate::Result;
use crate::analysis::{AnalysisEngine, AnalysisSettings, RuleFailure};
use crate::facts::RepositoryFacts;
use crate::scoring::Cancellation;
use chrono::{DateTime, Utc};
use core::sync::atomic::{AtomicU64, Ordering};
use futures::{StreamExt, TryStreamExt, stream};
use std::sync::Arc;

/// One metric in a run: what it computes, what reports call it, and how much it counts.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub kind: MetricKind,
    pub name: Arc<str>,
    pub weight: f64,
}

/// Everything a metric needs beyond the facts of the repository being scored.
#[derive(Debug)]
pub struct MetricContext<'a, A> {
    /// The instant issue ages are measured against.
    pub now: DateTime<Utc>,
    pub engine: &'a A,
    pub analysis: &'a AnalysisSettings,
    pub cancellation: &'a Cancellation,

    /// Maximum number of repositories scored at once.
    pub concurrency: usize,

    /// Bumped once per repository scored, for progress reporting.
    pub completed: &'a AtomicU64,
}

/// A metric's raw score for one repository.
#[derive(Debug, Clone)]
pub struct RawScore {
    pub value: f64,

    /// Analysis steps that failed while producing the value.
    pub rule_failures: Vec<RuleFailure>,
}

impl RawScore {
    #[must_use]
    pub const fn new(value: f64) -> Self {
        Self {
            value,
            rule_failures: Vec::new(),
        }
    }
}

/// A metric's scores across every repository in a run, in repository order.
#[derive(Debug, Clone, Default)]
pub struct MetricScores {
    pub raw: Vec<f64>,
    pub normalized: Vec<f64>,
    pub rule_failures: Vec<RuleFailure>,
}

impl Metric {
    /// Create a metric that uses its kind's default name.
    #[must_use]
    pub fn new(kind: MetricKind, weight: f64) -> Self {
        Self::named(kind, kind.default_name(), weight)
    }

    #[must_use]
    pub fn named(kind: MetricKind, name: impl AsRef<str>, weight: f64) -> Self {
        Self {
            kind,
            name: Arc::from(name.as_ref()),
            weight,
        }
    }

    /// Compute this metric's raw score for one repository.
    pub async fn calculate_score<A: AnalysisEngine>(&self, facts: &RepositoryFacts, ctx: &MetricContext<'_, A>) -> RawScore {
        let score = match self.kind {
            MetricKind::RampUp => RawScore::new(calculators::ramp_up(facts)),
            MetricKind::Correctness => correctness::calculate(facts, ctx).await,
            MetricKind::BusFactor => RawScore::new(calculators::bus_factor(facts)),
            MetricKind::Responsiveness => RawScore::new(calculators::responsiveness(facts, ctx.now)),
            MetricKind::License => RawScore::new(calculators::license(facts)),
            MetricKind::Dependency => RawScore::new(calculators::dependency(facts)),
        };

        log::debug!(target: LOG_TARGET, "Repository '{}' has '{}' score of {}", facts.name, self.name, score.value);
        score
    }

    /// Compute raw scores for every repository, then normalize them across the cohort.
    ///
    /// Repositories are scored concurrently up to `ctx.concurrency`, and results come back
    /// in the order of `repositories`. The computation stops with an error if the run is
    /// cancelled before every repository has been started.
    pub async fn calculate_scores<A: AnalysisEngine>(
        &self,
        repositories: &[Arc<RepositoryFacts>],
        ctx: &MetricContext<'_, A>,
    ) -> Result<MetricScores> {
        let raw_scores: Vec<RawScore> = stream::iter(repositories)
            .map(|facts| async move {
                ctx.cancellation.check()?;
                let score = self.calculate_score(facts, ctx).await;
                let _ = ctx.completed.fetch_add(1, Ordering::Relaxed);
                Ok::<_, ohno::AppError>(score)
            })
            .buffered(ctx.concurrency.max(1))
            .try_collect()
            .await?;

        let mut raw = Vec::with_capacity(raw_scores.len());
        let mut rule_failures = Vec::new();
        for score in raw_scores {
            raw.push(score.value);
            rule_failures.extend(score.rule_failures);
        }

        let normalized = normalize(&raw);

        log::debug!(target: LOG_TARGET, "Raw '{}' scores: {raw:?}", self.name);
        log::trace!(target: LOG_TARGET, "Normalized '{}' scores: {normalized:?}", self.name);

        Ok(MetricScores {
            raw,
            normalized,
            rule_failures,
        })
    }
}
