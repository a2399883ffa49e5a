use super::{Cancellation, LOG_TARGET, Progress, ScoredRepository, overall_score, rank};
use crate::Result;
use crate::analysis::{AnalysisEngine, AnalysisSettings, RuleFailure, RuleFailurePolicy};
use crate::facts::RepositoryFacts;
use crate::metrics::{MetricContext, MetricSet};
use chrono::{DateTime, Utc};
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicU64, Ordering};
use ohno::bail;
use std::sync::Arc;

const DEFAULT_CONCURRENCY: usize = 4;

/// The outcome of a scoring run.
#[derive(Debug, Clone, Default)]
pub struct ScoreRun {
    /// Scored repositories in input order.
    pub scored: Vec<ScoredRepository>,

    /// Analysis failures that were scored as zero issues.
    pub rule_failures: Vec<RuleFailure>,
}

impl ScoreRun {
    /// The scored repositories, best first.
    #[must_use]
    pub fn ranked(&self) -> Vec<&ScoredRepository> {
        rank(self.scored.iter().collect())
    }
}

/// Scores and ranks a cohort of repositories against a metric set.
pub struct Scorer<A> {
    metrics: MetricSet,
    engine: A,
    analysis: AnalysisSettings,
    policy: RuleFailurePolicy,
    concurrency: usize,
    progress: Option<Arc<dyn Progress>>,
}

impl<A: AnalysisEngine> Scorer<A> {
    #[must_use]
    pub const fn new(metrics: MetricSet, engine: A, analysis: AnalysisSettings) -> Self {
        Self {
            metrics,
            engine,
            analysis,
            policy: RuleFailurePolicy::Abort,
            concurrency: DEFAULT_CONCURRENCY,
            progress: None,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: RuleFailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Limit how many repositories are scored at once. Values below 1 are treated as 1.
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn Progress>) -> Self {
        self.progress = Some(progress);
        self
    }

    #[must_use]
    pub const fn metrics(&self) -> &MetricSet {
        &self.metrics
    }

    /// Score every repository on every metric.
    ///
    /// `facts` is the whole cohort, in the order the results should keep. Issue ages are
    /// measured against `now`. The run fails as a whole if it is cancelled or if analysis
    /// fails under [`RuleFailurePolicy::Abort`].
    pub async fn score(&self, facts: Vec<RepositoryFacts>, now: DateTime<Utc>, cancellation: &Cancellation) -> Result<ScoreRun> {
        let result = self.score_core(facts, now, cancellation).await;
        if let Some(progress) = &self.progress {
            progress.done();
        }

        result
    }

    async fn score_core(&self, facts: Vec<RepositoryFacts>, now: DateTime<Utc>, cancellation: &Cancellation) -> Result<ScoreRun> {
        let repositories: Vec<Arc<RepositoryFacts>> = facts.into_iter().map(Arc::new).collect();
        let completed = Arc::new(AtomicU64::new(0));

        log::info!(
            target: LOG_TARGET,
            "Scoring {} repositories on {} metrics",
            repositories.len(),
            self.metrics.len()
        );

        if let Some(progress) = &self.progress {
            let total = (repositories.len() * self.metrics.len()) as u64;
            let completed = Arc::clone(&completed);
            progress.set_phase("Scoring");
            progress.set_determinate(Box::new(move || {
                let current = completed.load(Ordering::Relaxed);
                (total, current, format!("{current}/{total} evaluations"))
            }));
        }

        let ctx = MetricContext {
            now,
            engine: &self.engine,
            analysis: &self.analysis,
            cancellation,
            concurrency: self.concurrency,
            completed: &completed,
        };

        let mut columns = Vec::with_capacity(self.metrics.len());
        let mut rule_failures = Vec::new();

        for metric in &self.metrics {
            cancellation.check()?;

            let scores = metric.calculate_scores(&repositories, &ctx).await?;
            if let Some(first) = scores.rule_failures.first() {
                if self.policy == RuleFailurePolicy::Abort {
                    bail!(
                        "{} analysis step(s) failed while computing '{}', first: {first}",
                        scores.rule_failures.len(),
                        metric.name
                    );
                }

                for failure in &scores.rule_failures {
                    log::warn!(target: LOG_TARGET, "Counting as zero issues: {failure}");
                }
            }

            rule_failures.extend(scores.rule_failures);
            columns.push(scores.normalized);
        }

        let weights = self.metrics.weights();
        let scored = repositories
            .into_iter()
            .enumerate()
            .map(|(index, facts)| {
                let sub_scores: Vec<f64> = columns.iter().map(|column| column[index]).collect();
                let overall_score = overall_score(&sub_scores, &weights);
                log::debug!(
                    target: LOG_TARGET,
                    "Repository '{}' scored {overall_score} overall, sub-scores {sub_scores:?}",
                    facts.name
                );

                ScoredRepository {
                    facts,
                    sub_scores,
                    overall_score,
                }
            })
            .collect();

        Ok(ScoreRun { scored, rule_failures })
    }
}

impl<A> Debug for Scorer<A> {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Scorer")
            .field("metrics", &self.metrics)
            .field("analysis", &self.analysis)
            .field("policy", &self.policy)
            .field("concurrency", &self.concurrency)
            .field("progress", &self.progress.as_ref().map(|_| "<progress>"))
            .finish_non_exhaustive()
    }
}
