use super::common::format_score;
use crate::Result;
use crate::metrics::MetricSet;
use crate::scoring::ScoredRepository;
use core::borrow::Borrow;
use core::fmt::Write;

/// Write the space-separated tabular report.
///
/// The header is `URL` followed by every metric name. Each repository then gets one line
/// holding its URL, overall score, and sub-scores in metric order. Rows are written in
/// the order given, which callers normally make the ranked order.
pub fn generate<T, W>(repositories: &[T], metrics: &MetricSet, writer: &mut W) -> Result<()>
where
    T: Borrow<ScoredRepository>,
    W: Write,
{
    write!(writer, "URL")?;
    for metric in metrics {
        write!(writer, " {}", metric.name)?;
    }
    writeln!(writer)?;

    for repository in repositories {
        let repository = repository.borrow();
        write!(writer, "{} {}", repository.facts.url, format_score(repository.overall_score))?;
        for &score in &repository.sub_scores {
            write!(writer, " {}", format_score(score))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}
