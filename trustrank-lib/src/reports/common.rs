//! Formatting shared across report generators.

use crate::metrics::MetricSet;

/// Format a score in its shortest round-trip form, always with a decimal point.
pub fn format_score(score: f64) -> String {
    format!("{score:?}")
}

/// How good an overall score is relative to the best score the weights allow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    /// Classify a score by the fraction of the attainable maximum it reaches.
    ///
    /// The attainable maximum is the sum of the positive weights, since normalized
    /// sub-scores never exceed `1.0` for a cohort with distinct scores.
    pub fn classify(score: f64, metrics: &MetricSet) -> Self {
        let attainable: f64 = metrics.iter().map(|m| m.weight).filter(|w| *w > 0.0).sum();
        let fraction = if attainable > 0.0 { score / attainable } else { 0.0 };

        if fraction >= 0.7 {
            Self::High
        } else if fraction >= 0.4 {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{Metric, MetricKind};

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(1.0), "1.0");
        assert_eq!(format_score(0.0), "0.0");
        assert_eq!(format_score(0.25), "0.25");
        assert_eq!(format_score(-3.0), "-3.0");
        assert_eq!(format_score(0.1 + 0.2), "0.30000000000000004");
    }

    #[test]
    fn test_score_band() {
        let metrics = MetricSet::new([
            Metric::new(MetricKind::RampUp, 1.0),
            Metric::new(MetricKind::License, 1.0),
            Metric::new(MetricKind::BusFactor, -1.0),
        ])
        .unwrap();

        assert_eq!(ScoreBand::classify(2.0, &metrics), ScoreBand::High);
        assert_eq!(ScoreBand::classify(1.0, &metrics), ScoreBand::Medium);
        assert_eq!(ScoreBand::classify(0.5, &metrics), ScoreBand::Low);
    }

    #[test]
    fn test_score_band_without_positive_weights() {
        let metrics = MetricSet::new([Metric::new(MetricKind::RampUp, 0.0)]).unwrap();
        assert_eq!(ScoreBand::classify(0.0, &metrics), ScoreBand::Low);
    }
}
