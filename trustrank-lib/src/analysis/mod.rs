//! Static analysis capability used by the correctness metric
//!
//! Correctness is the only metric that looks at code rather than repository facts. It
//! needs a local checkout of each repository and a tool that counts issues for a list
//! of rules. Both are reached through the [`AnalysisEngine`] trait so runs can swap in
//! a different tool, and tests can use an in-memory fake.
//!
//! [`SemgrepEngine`] is the production engine: shallow `git` clones under a checkout
//! directory and one `semgrep` invocation per rule. Child processes are killed when
//! their future is dropped, so the per-rule timeout applied by the metric also stops
//! the underlying tool.
//!
//! Failures are kept per rule and per repository as [`RuleFailure`] values. The
//! [`RuleFailurePolicy`] chosen by the caller decides whether any failure aborts the
//! run or is scored as zero issues and reported.

mod engine;
mod git;
mod path_utils;
mod rule_failure;
mod semgrep;

pub(crate) const LOG_TARGET: &str = "  analysis";

pub use engine::{AnalysisEngine, AnalysisSettings};
pub use rule_failure::{RuleFailure, RuleFailurePolicy};
pub use semgrep::SemgrepEngine;
