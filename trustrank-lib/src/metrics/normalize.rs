/// Rescale one metric's raw scores across the evaluated cohort.
///
/// - No scores normalize to no scores.
/// - A single score is always `1.0`, the best in a cohort of one.
/// - Otherwise scores are min-max scaled so the maximum maps to `1.0` and the minimum to `0.0`.
///   When every score is identical the bounds are fixed at `min = 0`, `max = 1`, which leaves
///   each raw value unchanged.
#[must_use]
pub fn normalize(raw: &[f64]) -> Vec<f64> {
    match raw {
        [] => Vec::new(),
        [_] => vec![1.0],
        _ => {
            let max = raw.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let min = raw.iter().copied().fold(f64::INFINITY, f64::min);

            // max >= min always holds, so this only triggers for an identical cohort
            let (max, min) = if max <= min { (1.0, 0.0) } else { (max, min) };

            raw.iter().map(|score| (score - min) / (max - min)).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn test_single_is_always_one() {
        assert_eq!(normalize(&[42.0]), [1.0]);
        assert_eq!(normalize(&[-17.0]), [1.0]);
        assert_eq!(normalize(&[0.0]), [1.0]);
    }

    #[test]
    fn test_min_max_scaling() {
        let normalized = normalize(&[10.0, 20.0, 20.0]);
        assert_eq!(normalized, [0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_negative_scores() {
        let normalized = normalize(&[-3.0, -1.0, -2.0]);
        assert_eq!(normalized, [0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_range_and_extremes() {
        let raw = [3.5, -7.25, 120.0, 0.0, 64.0, 119.999, -7.0];
        let normalized = normalize(&raw);

        assert_eq!(normalized.len(), raw.len());
        assert!(normalized.iter().all(|score| (0.0..=1.0).contains(score)), "{normalized:?}");
        assert_eq!(normalized[2], 1.0);
        assert_eq!(normalized[1], 0.0);
    }

    #[test]
    fn test_identical_scores_keep_raw_values() {
        assert_eq!(normalize(&[5.0, 5.0, 5.0]), [5.0, 5.0, 5.0]);
        assert_eq!(normalize(&[0.0, 0.0]), [0.0, 0.0]);
        assert_eq!(normalize(&[-2.0, -2.0]), [-2.0, -2.0]);
        assert_eq!(normalize(&[1.0, 1.0]), [1.0, 1.0]);
    }

    #[test]
    fn test_order_is_preserved() {
        let normalized = normalize(&[4.0, 0.0, 2.0, 8.0]);
        assert_eq!(normalized, [0.5, 0.0, 0.25, 1.0]);
    }
}
