//! Positional q-gram overlap: token matches must also be close in
//! position.

use ahash::AHashMap;
use compact_str::CompactString;
use gramset_tokenizer::{QGrams, Result, Tokenizer};

use crate::measures::{degenerate_guard, Similarity};

/// Positional q-gram overlap similarity.
///
/// Walks the two ordered token sequences and greedily matches equal tokens
/// whose positions differ by at most `max_dist` (default 1), each position
/// consumed at most once:
///
/// ```text
/// sim = matches / min(|src sequence|, |tar sequence|)
/// ```
///
/// This is the one measure that consumes the ordered token sequence rather
/// than the multisets.
#[derive(Debug, Clone)]
pub struct PositionalQGramOverlap {
    tokenizer: QGrams,
    max_dist: usize,
}

impl Default for PositionalQGramOverlap {
    fn default() -> Self {
        Self::new()
    }
}

impl PositionalQGramOverlap {
    /// Create a positional overlap measure over default bigrams with a
    /// maximum positional distance of 1.
    pub fn new() -> Self {
        Self {
            tokenizer: QGrams::new(),
            max_dist: 1,
        }
    }

    /// Replace the q-gram tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: QGrams) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    /// Set the maximum positional distance for a match.
    pub fn max_dist(mut self, max_dist: usize) -> Self {
        self.max_dist = max_dist;
        self
    }
}

impl Similarity for PositionalQGramOverlap {
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64> {
        self.tokenizer.tokenize(src);
        let src_list = self.tokenizer.ordered_tokens().to_vec();
        self.tokenizer.tokenize(tar);
        let tar_list = self.tokenizer.ordered_tokens().to_vec();

        if let Some(identity) =
            degenerate_guard(src_list.len() as f64, tar_list.len() as f64)
        {
            return Ok(identity);
        }

        let mut tar_positions: AHashMap<&CompactString, Vec<usize>> = AHashMap::new();
        for (position, token) in tar_list.iter().enumerate() {
            tar_positions.entry(token).or_default().push(position);
        }

        let mut tar_matched = vec![false; tar_list.len()];
        let mut matches = 0usize;
        for (src_position, token) in src_list.iter().enumerate() {
            let Some(positions) = tar_positions.get(token) else {
                continue;
            };
            for &tar_position in positions {
                if tar_matched[tar_position] {
                    continue;
                }
                if src_position.abs_diff(tar_position) <= self.max_dist {
                    tar_matched[tar_position] = true;
                    matches += 1;
                    break;
                }
            }
        }

        Ok(matches as f64 / src_list.len().min(tar_list.len()) as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-12
    }

    #[test]
    fn test_empty_string_identities() {
        let tokenizer = QGrams::builder().start_stop("").build().unwrap();
        let mut cmp = PositionalQGramOverlap::new().with_tokenizer(tokenizer);
        assert_eq!(cmp.sim("", "").unwrap(), 1.0);
        assert_eq!(cmp.sim("cat", "").unwrap(), 0.0);
    }

    #[test]
    fn test_identical_strings() {
        let mut cmp = PositionalQGramOverlap::new();
        assert_eq!(cmp.sim("Niall", "Niall").unwrap(), 1.0);
    }

    #[test]
    fn test_aligned_tokens_match() {
        // cat/hat bigrams: position 2 (at) and 3 (t#) align exactly.
        let mut cmp = PositionalQGramOverlap::new();
        assert!(close(cmp.sim("cat", "hat").unwrap(), 0.5));
    }

    #[test]
    fn test_distant_tokens_do_not_match() {
        // The shared grams "xa" and "ab" sit four positions apart in the
        // two sequences: farther than max_dist 1.
        let tokenizer = QGrams::builder().start_stop("").build().unwrap();
        let mut cmp = PositionalQGramOverlap::new().with_tokenizer(tokenizer);
        assert_eq!(cmp.sim("xabyy", "ppppxab").unwrap(), 0.0);
    }

    #[test]
    fn test_larger_max_dist_recovers_matches() {
        let tokenizer = QGrams::builder().start_stop("").build().unwrap();
        let mut cmp = PositionalQGramOverlap::new()
            .with_tokenizer(tokenizer)
            .max_dist(4);
        assert!(cmp.sim("xabyy", "ppppxab").unwrap() > 0.0);
    }

    #[test]
    fn test_each_position_matches_once() {
        // Repeated grams cannot all match one tar occurrence.
        let mut cmp = PositionalQGramOverlap::new();
        let sim = cmp.sim("aaaa", "aa").unwrap();
        assert!(sim <= 1.0);
    }
}
