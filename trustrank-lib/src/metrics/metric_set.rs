use super::{Metric, MetricKind};
use crate::Result;
use ohno::bail;
use std::collections::HashSet;
use strum::IntoEnumIterator;

/// An ordered, validated list of metrics.
///
/// The position of a metric in the set is the position of its sub-score in every
/// scored repository.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricSet {
    metrics: Vec<Metric>,
}

impl MetricSet {
    /// Build a metric set, rejecting empty lists, non-finite weights, and duplicate names.
    pub fn new(metrics: impl IntoIterator<Item = Metric>) -> Result<Self> {
        let metrics: Vec<Metric> = metrics.into_iter().collect();
        if metrics.is_empty() {
            bail!("at least one metric must be configured");
        }

        let mut names = HashSet::new();
        for metric in &metrics {
            if !metric.weight.is_finite() {
                bail!("metric '{}' has a non-finite weight ({})", metric.name, metric.weight);
            }

            if !names.insert(metric.name.as_ref()) {
                bail!("metric name '{}' is used more than once", metric.name);
            }
        }

        Ok(Self { metrics })
    }

    /// All six metrics with their default names and record weights.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            metrics: MetricKind::iter().map(|kind| Metric::new(kind, kind.record_weight())).collect(),
        }
    }

    /// Replace every metric's weight, keeping order and names.
    pub fn reweighted(&self, weights: &[f64]) -> Result<Self> {
        if weights.len() != self.metrics.len() {
            bail!(
                "{} weights were supplied for {} metrics, the counts must match",
                weights.len(),
                self.metrics.len()
            );
        }

        Self::new(self.metrics.iter().zip(weights).map(|(metric, &weight)| Metric {
            weight,
            ..metric.clone()
        }))
    }

    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.metrics.iter().map(|metric| metric.weight).collect()
    }

    /// Index of the first metric of the given kind.
    #[must_use]
    pub fn position(&self, kind: MetricKind) -> Option<usize> {
        self.metrics.iter().position(|metric| metric.kind == kind)
    }

    #[must_use]
    pub fn contains(&self, kind: MetricKind) -> bool {
        self.position(kind).is_some()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Metric> {
        self.metrics.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }
}

impl<'a> IntoIterator for &'a MetricSet {
    type Item = &'a Metric;
    type IntoIter = core::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn five() -> MetricSet {
        MetricSet::new([
            Metric::new(MetricKind::RampUp, 0.1),
            Metric::new(MetricKind::Correctness, 0.2),
            Metric::new(MetricKind::BusFactor, 0.5),
            Metric::new(MetricKind::Responsiveness, 0.5),
            Metric::new(MetricKind::License, 0.1),
        ])
        .unwrap()
    }

    #[test]
    fn test_keeps_order() {
        let set = five();
        let names: Vec<_> = set.iter().map(|m| m.name.to_string()).collect();
        assert_eq!(
            names,
            [
                "RAMP_UP_SCORE",
                "CORRECTNESS_SCORE",
                "BUS_FACTOR_SCORE",
                "RESPONSIVE_MAINTAINER_SCORE",
                "LICENSE_SCORE"
            ]
        );
        assert_eq!(set.weights(), [0.1, 0.2, 0.5, 0.5, 0.1]);
        assert_eq!(set.position(MetricKind::BusFactor), Some(2));
        assert!(!set.contains(MetricKind::Dependency));
    }

    #[test]
    fn test_rejects_empty() {
        let err = MetricSet::new(Vec::new()).unwrap_err();
        assert!(err.to_string().contains("at least one metric"), "{err}");
    }

    #[test]
    fn test_rejects_non_finite_weights() {
        for weight in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let result = MetricSet::new([Metric::new(MetricKind::License, weight)]);
            assert!(result.is_err(), "weight {weight} accepted");
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let err = MetricSet::new([Metric::new(MetricKind::License, 0.5), Metric::new(MetricKind::License, 0.5)]).unwrap_err();
        assert!(err.to_string().contains("LICENSE_SCORE"), "{err}");
    }

    #[test]
    fn test_same_kind_under_different_names() {
        let set = MetricSet::new([
            Metric::named(MetricKind::License, "A", 0.5),
            Metric::named(MetricKind::License, "B", 0.5),
        ])
        .unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_reweighted() {
        let set = five().reweighted(&[1.0, 0.0, -1.0, 2.0, 0.5]).unwrap();
        assert_eq!(set.weights(), [1.0, 0.0, -1.0, 2.0, 0.5]);
        assert_eq!(set.iter().next().unwrap().kind, MetricKind::RampUp);
    }

    #[test]
    fn test_reweighted_length_mismatch() {
        let err = five().reweighted(&[1.0, 2.0]).unwrap_err();
        assert!(err.to_string().contains("2 weights were supplied for 5 metrics"), "{err}");
    }

    #[test]
    fn test_reweighted_rejects_non_finite() {
        assert!(five().reweighted(&[1.0, 1.0, f64::NAN, 1.0, 1.0]).is_err());
    }

    #[test]
    fn test_standard() {
        let set = MetricSet::standard();
        assert_eq!(set.len(), 6);
        assert_eq!(set.weights(), [0.2, 0.2, 0.3, 0.1, 0.1, 0.2]);
    }
}
