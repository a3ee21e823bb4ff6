//! Pairwise token similarity, consumed by the fuzzy and soft intersection
//! modes.

use unicode_segmentation::UnicodeSegmentation;

/// A pairwise similarity measure between two tokens.
///
/// Implementations return a value in `[0, 1]`, where 1 means identical.
/// A distance measure can be adapted via `1 - dist`.
pub trait PairwiseMetric {
    /// Similarity between two tokens, in `[0, 1]`.
    fn similarity(&self, a: &str, b: &str) -> f64;
}

/// Levenshtein similarity, normalized by the longer token's length.
///
/// This is the default metric for fuzzy intersections.
#[derive(Debug, Clone, Copy, Default)]
pub struct NormalizedLevenshtein;

impl NormalizedLevenshtein {
    /// Create a normalized Levenshtein metric.
    pub fn new() -> Self {
        Self
    }

    fn distance(a: &[&str], b: &[&str]) -> usize {
        if a.is_empty() {
            return b.len();
        }
        if b.is_empty() {
            return a.len();
        }

        // Single-row DP over the shorter-dimension table.
        let mut row: Vec<usize> = (0..=b.len()).collect();
        for (i, &ga) in a.iter().enumerate() {
            let mut previous = row[0];
            row[0] = i + 1;
            for (j, &gb) in b.iter().enumerate() {
                let substitution = previous + usize::from(ga != gb);
                previous = row[j + 1];
                row[j + 1] = substitution.min(previous + 1).min(row[j] + 1);
            }
        }
        row[b.len()]
    }
}

impl PairwiseMetric for NormalizedLevenshtein {
    fn similarity(&self, a: &str, b: &str) -> f64 {
        if a == b {
            return 1.0;
        }
        let ga: Vec<&str> = a.graphemes(true).collect();
        let gb: Vec<&str> = b.graphemes(true).collect();
        let longest = ga.len().max(gb.len());
        if longest == 0 {
            return 1.0;
        }
        1.0 - Self::distance(&ga, &gb) as f64 / longest as f64
    }
}

/// Adapter turning a plain function or closure into a [`PairwiseMetric`].
#[derive(Debug, Clone, Copy)]
pub struct MetricFn<F>(pub F);

impl<F> PairwiseMetric for MetricFn<F>
where
    F: Fn(&str, &str) -> f64,
{
    fn similarity(&self, a: &str, b: &str) -> f64 {
        (self.0)(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_tokens() {
        let metric = NormalizedLevenshtein::new();
        assert_eq!(metric.similarity("ab", "ab"), 1.0);
        assert_eq!(metric.similarity("", ""), 1.0);
    }

    #[test]
    fn test_single_substitution() {
        let metric = NormalizedLevenshtein::new();
        assert!((metric.similarity("cat", "hat") - 2.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_disjoint_tokens() {
        let metric = NormalizedLevenshtein::new();
        assert_eq!(metric.similarity("ab", "cd"), 0.0);
    }

    #[test]
    fn test_one_empty_token() {
        let metric = NormalizedLevenshtein::new();
        assert_eq!(metric.similarity("ab", ""), 0.0);
    }

    #[test]
    fn test_closure_as_metric() {
        let exact = MetricFn(|a: &str, b: &str| if a == b { 1.0 } else { 0.0 });
        assert_eq!(exact.similarity("x", "x"), 1.0);
        assert_eq!(exact.similarity("x", "y"), 0.0);
    }
}
