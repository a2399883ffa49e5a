//! Raw score calculations for the metrics that only read repository facts.

use crate::facts::RepositoryFacts;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// Licenses accepted as compatible with the target license family.
const COMPATIBLE_LICENSES: &[&str] = &["MIT", "lgpl-2.1"];

/// Number of lines in the README, counting `\n`-separated segments.
#[expect(clippy::cast_precision_loss, reason = "line counts are far below f64's exact integer range")]
pub fn ramp_up(facts: &RepositoryFacts) -> f64 {
    facts.readme_text.split('\n').count() as f64
}

/// Number of distinct commit authors.
#[expect(clippy::cast_precision_loss, reason = "author counts are far below f64's exact integer range")]
pub fn bus_factor(facts: &RepositoryFacts) -> f64 {
    let authors: HashSet<&str> = facts.commits.iter().map(|commit| commit.author_id.as_str()).collect();
    authors.len() as f64
}

/// Negated sum of the average whole days open issues have been open and the dependency count.
#[expect(clippy::cast_precision_loss, reason = "day and dependency counts are far below f64's exact integer range")]
pub fn responsiveness(facts: &RepositoryFacts, now: DateTime<Utc>) -> f64 {
    let average_days_open = if facts.open_issues.is_empty() {
        0.0
    } else {
        let total_days: i64 = facts.open_issues.iter().map(|issue| (now - issue.created_at).num_days()).sum();
        total_days as f64 / facts.open_issues.len() as f64
    };

    -(average_days_open + facts.num_dependencies as f64)
}

/// `1.0` when the license is compatible with the target family, `0.0` otherwise.
pub fn license(facts: &RepositoryFacts) -> f64 {
    match facts.license_name.as_deref() {
        Some(name) if COMPATIBLE_LICENSES.contains(&name) => 1.0,
        _ => 0.0,
    }
}

/// `1.0` for no dependencies, otherwise the reciprocal of the dependency count.
#[expect(clippy::cast_precision_loss, reason = "dependency counts are far below f64's exact integer range")]
pub fn dependency(facts: &RepositoryFacts) -> f64 {
    if facts.num_dependencies == 0 {
        1.0
    } else {
        1.0 / facts.num_dependencies as f64
    }
}
