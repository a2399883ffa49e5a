use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use strum::Display as StrumDisplay;

/// An analysis step that failed for one repository.
#[derive(Debug, Clone)]
pub struct RuleFailure {
    /// Name of the repository being analyzed.
    pub repository: Arc<str>,

    /// The rule that failed, or `None` when the checkout itself failed.
    pub rule: Option<Arc<str>>,

    pub error: Arc<ohno::AppError>,
}

impl Display for RuleFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match &self.rule {
            Some(rule) => write!(f, "rule '{rule}' failed for repository '{}': {:#}", self.repository, self.error),
            None => write!(f, "checkout of repository '{}' failed: {:#}", self.repository, self.error),
        }
    }
}

/// What a run does when analysis rules fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, StrumDisplay)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RuleFailurePolicy {
    /// Fail the whole run.
    #[default]
    Abort,

    /// Score each failed rule as having found no issues and report the failure.
    CountAsZero,
}
