//! Per-repository metrics and cohort normalization
//!
//! A [`Metric`] pairs one of the six [`MetricKind`] computations with the name reports
//! use for it and the weight it carries in the overall score. Each computation turns
//! the facts of one repository into a raw number where higher is better:
//!
//! - **Ramp-up**: README line count
//! - **Correctness**: negated number of static analysis findings
//! - **Bus factor**: distinct commit authors
//! - **Responsiveness**: negated average days open issues have waited, plus dependency count
//! - **License**: whether the license is in the compatible family
//! - **Dependency**: reciprocal of the dependency count
//!
//! Raw numbers are not comparable across metrics, so [`Metric::calculate_scores`] scores
//! a whole cohort and rescales the results with [`normalize`] before they are weighted.
//!
//! Only correctness does I/O. It goes through the injected [`AnalysisEngine`](crate::analysis::AnalysisEngine)
//! and each rule is bounded by the configured timeout.

mod calculators;
mod correctness;
mod metric;
mod metric_kind;
mod metric_set;
mod normalize;

pub(crate) const LOG_TARGET: &str = "   metrics";

pub use metric::{Metric, MetricContext, MetricScores, RawScore};
pub use metric_kind::MetricKind;
pub use metric_set::MetricSet;
pub use normalize::normalize;
