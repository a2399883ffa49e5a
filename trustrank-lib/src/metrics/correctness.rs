use super::{LOG_TARGET, MetricContext, RawScore};
use crate::analysis::{AnalysisEngine, RuleFailure};
use crate::facts::RepositoryFacts;
use ohno::app_err;
use std::sync::Arc;

/// Run every configured analysis rule against a checkout of the repository.
///
/// The raw score is the negated number of issues found by the rules that succeeded.
/// Rules that fail or time out are returned as failures rather than counted.
#[expect(clippy::cast_precision_loss, reason = "issue counts are far below f64's exact integer range")]
pub async fn calculate<A: AnalysisEngine>(facts: &RepositoryFacts, ctx: &MetricContext<'_, A>) -> RawScore {
    let rules = &ctx.analysis.rules;
    if rules.is_empty() {
        log::debug!(target: LOG_TARGET, "No analysis rules configured, skipping analysis of '{}'", facts.name);
        return RawScore::new(0.0);
    }

    let repository: Arc<str> = Arc::from(facts.name.as_str());

    let repo_path = match ctx.engine.checkout(facts).await {
        Ok(path) => path,
        Err(e) => {
            return RawScore {
                value: 0.0,
                rule_failures: vec![RuleFailure {
                    repository,
                    rule: None,
                    error: Arc::new(e),
                }],
            };
        }
    };

    let mut issues = 0_u64;
    let mut rule_failures = Vec::new();

    for rule in rules.iter() {
        let error = match tokio::time::timeout(ctx.analysis.rule_timeout, ctx.engine.run_rule(rule, &repo_path)).await {
            Ok(Ok(count)) => {
                log::debug!(target: LOG_TARGET, "Analysis rule {rule} found {count} issues with repository '{}'", facts.name);
                issues += count;
                continue;
            }
            Ok(Err(e)) => e,
            Err(_) => app_err!("timed out after {:.1}s", ctx.analysis.rule_timeout.as_secs_f64()),
        };

        log::warn!(target: LOG_TARGET, "Analysis rule {rule} failed for repository '{}': {error:#}", facts.name);
        rule_failures.push(RuleFailure {
            repository: Arc::clone(&repository),
            rule: Some(Arc::from(rule.as_str())),
            error: Arc::new(error),
        });
    }

    RawScore {
        value: -(issues as f64),
        rule_failures,
    }
}
