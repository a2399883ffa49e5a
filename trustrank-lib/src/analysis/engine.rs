use crate::Result;
use crate::facts::RepositoryFacts;
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use std::sync::Arc;

/// A static analysis tool that can inspect a local checkout of a repository.
pub trait AnalysisEngine: Send + Sync {
    /// Produce a local checkout of the repository and return its path.
    fn checkout(&self, facts: &RepositoryFacts) -> impl Future<Output = Result<Utf8PathBuf>> + Send;

    /// Run one analysis rule against a checkout and return the number of issues found.
    fn run_rule(&self, rule_id: &str, repo_path: &Utf8Path) -> impl Future<Output = Result<u64>> + Send;
}

/// The rules the correctness metric runs, and how long each may take.
#[derive(Debug, Clone)]
pub struct AnalysisSettings {
    pub rules: Arc<[String]>,
    pub rule_timeout: Duration,
}

impl AnalysisSettings {
    #[must_use]
    pub fn new(rules: impl IntoIterator<Item = String>, rule_timeout: Duration) -> Self {
        Self {
            rules: rules.into_iter().collect(),
            rule_timeout,
        }
    }
}
