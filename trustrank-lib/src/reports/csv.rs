use super::common::format_score;
use crate::Result;
use crate::metrics::MetricSet;
use crate::scoring::ScoredRepository;
use core::borrow::Borrow;
use core::fmt::Write;
use ohno::{IntoAppError, app_err};

/// Write a CSV report with a `url,score,<metric names>` header, one row per repository.
pub fn generate<T, W>(repositories: &[T], metrics: &MetricSet, writer: &mut W) -> Result<()>
where
    T: Borrow<ScoredRepository>,
    W: Write,
{
    let mut csv = csv::Writer::from_writer(Vec::new());

    let header = ["url", "score"]
        .into_iter()
        .map(str::to_string)
        .chain(metrics.iter().map(|metric| metric.name.to_string()));
    csv.write_record(header).into_app_err("unable to write CSV header")?;

    for repository in repositories {
        let repository = repository.borrow();
        let row = [repository.facts.url.clone(), format_score(repository.overall_score)]
            .into_iter()
            .chain(repository.sub_scores.iter().map(|&score| format_score(score)));
        csv.write_record(row)
            .into_app_err_with(|| format!("unable to write CSV row for '{}'", repository.facts.url))?;
    }

    let bytes = csv
        .into_inner()
        .map_err(|e| app_err!("unable to flush CSV output: {}", e.error()))?;
    write!(writer, "{}", String::from_utf8(bytes).into_app_err("CSV output is not valid UTF-8")?)?;
    Ok(())
}
