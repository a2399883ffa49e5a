use super::common::{ScoreBand, format_score};
use crate::Result;
use crate::metrics::MetricSet;
use crate::scoring::ScoredRepository;
use core::borrow::Borrow;
use core::fmt::Write;
use owo_colors::OwoColorize;

/// Write a human-readable ranked listing, one block per repository.
pub fn generate<T, W>(repositories: &[T], metrics: &MetricSet, use_colors: bool, writer: &mut W) -> Result<()>
where
    T: Borrow<ScoredRepository>,
    W: Write,
{
    let name_width = metrics.iter().map(|metric| metric.name.len()).max().unwrap_or(0);

    for (index, repository) in repositories.iter().enumerate() {
        let repository = repository.borrow();
        if index > 0 {
            writeln!(writer)?;
        }

        let rank = format!("#{}", index + 1);
        let score = format_score(repository.overall_score);
        if use_colors {
            let score = match ScoreBand::classify(repository.overall_score, metrics) {
                ScoreBand::High => score.green().bold().to_string(),
                ScoreBand::Medium => score.yellow().bold().to_string(),
                ScoreBand::Low => score.red().bold().to_string(),
            };
            writeln!(writer, "{} {} scored {score}", rank.bold(), repository.facts.url.cyan())?;
        } else {
            writeln!(writer, "{rank} {} scored {score}", repository.facts.url)?;
        }

        for (metric, &sub_score) in metrics.iter().zip(&repository.sub_scores) {
            writeln!(
                writer,
                "  {:<name_width$} : {} (weight {})",
                metric.name,
                format_score(sub_score),
                format_score(metric.weight)
            )?;
        }
    }

    Ok(())
}
