use super::ScoredRepository;
use core::borrow::Borrow;

/// Order repositories by overall score, best first.
///
/// The sort is stable, so repositories with equal scores keep their input order.
#[must_use]
pub fn rank<T: Borrow<ScoredRepository>>(mut scored: Vec<T>) -> Vec<T> {
    scored.sort_by(|a, b| b.borrow().overall_score.total_cmp(&a.borrow().overall_score));
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::RepositoryFacts;
    use std::sync::Arc;

    fn scored(name: &str, overall_score: f64) -> ScoredRepository {
        ScoredRepository {
            facts: Arc::new(RepositoryFacts::new(format!("https://github.com/o/{name}"), name)),
            sub_scores: vec![overall_score],
            overall_score,
        }
    }

    fn names(ranked: &[ScoredRepository]) -> Vec<&str> {
        ranked.iter().map(|s| s.facts.name.as_str()).collect()
    }

    #[test]
    fn test_descending() {
        let ranked = rank(vec![scored("a", 0.2), scored("b", 0.9), scored("c", 0.5)]);
        assert_eq!(names(&ranked), ["b", "c", "a"]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranked = rank(vec![
            scored("a", 0.5),
            scored("b", 1.0),
            scored("c", 0.5),
            scored("d", 1.0),
            scored("e", 0.5),
        ]);
        assert_eq!(names(&ranked), ["b", "d", "a", "c", "e"]);
    }

    #[test]
    fn test_every_permutation_is_sorted() {
        let scores = [0.3, -1.0, 2.5, 0.0];

        // all 24 orderings of four items, via Heap's algorithm
        let mut items: Vec<usize> = (0..scores.len()).collect();
        let mut counters = vec![0; items.len()];
        let mut permutations = vec![items.clone()];
        let mut i = 0;
        while i < items.len() {
            if counters[i] < i {
                if i % 2 == 0 {
                    items.swap(0, i);
                } else {
                    items.swap(counters[i], i);
                }
                permutations.push(items.clone());
                counters[i] += 1;
                i = 0;
            } else {
                counters[i] = 0;
                i += 1;
            }
        }
        assert_eq!(permutations.len(), 24);

        for permutation in permutations {
            let input: Vec<_> = permutation.iter().map(|&i| scored(&i.to_string(), scores[i])).collect();
            let ranked = rank(input);
            let ranked_scores: Vec<f64> = ranked.iter().map(|s| s.overall_score).collect();
            assert_eq!(ranked_scores, [2.5, 0.3, 0.0, -1.0]);
        }
    }

    #[test]
    fn test_rank_references() {
        let scored = [scored("a", 0.1), scored("b", 0.7)];
        let ranked = rank(scored.iter().collect());
        assert_eq!(ranked[0].facts.name, "b");
        assert_eq!(ranked[1].facts.name, "a");
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::<ScoredRepository>::new()).is_empty());
    }
}
