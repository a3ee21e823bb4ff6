//! Jaccard and weighted Jaccard similarity.

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::measures::{degenerate_guard, Similarity};

/// Weighted Jaccard similarity.
///
/// For two multisets X and Y and a weight w:
///
/// ```text
/// sim = w·|X ∩ Y| / (w·|X ∩ Y| + |X \ Y| + |Y \ X|)
/// ```
///
/// With w = 1 this is plain Jaccard similarity; with w = 2 it is Dice
/// similarity. The default weight is 3 (triple-weighted Jaccard).
#[derive(Debug, Clone)]
pub struct WeightedJaccard {
    engine: TokenDistance,
    weight: f64,
}

impl Default for WeightedJaccard {
    fn default() -> Self {
        Self::new()
    }
}

impl WeightedJaccard {
    /// Create a triple-weighted Jaccard measure over default bigrams.
    pub fn new() -> Self {
        Self::with_weight(3.0)
    }

    /// Create a weighted Jaccard measure with the given intersection
    /// weight.
    pub fn with_weight(weight: f64) -> Self {
        Self {
            engine: TokenDistance::new(),
            weight,
        }
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }
}

impl Similarity for WeightedJaccard {
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64> {
        self.engine.tokenize(src, tar);

        if let Some(identity) =
            degenerate_guard(self.engine.src_card()?, self.engine.tar_card()?)
        {
            return Ok(identity);
        }

        let a = self.engine.intersection_card()?;
        let b = self.engine.src_only_card()?;
        let c = self.engine.tar_only_card()?;

        let denominator = self.weight * a + b + c;
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(self.weight * a / denominator)
    }
}

/// Plain Jaccard similarity: `|X ∩ Y| / |X ∪ Y|`.
#[derive(Debug, Clone)]
pub struct Jaccard {
    inner: WeightedJaccard,
}

impl Default for Jaccard {
    fn default() -> Self {
        Self::new()
    }
}

impl Jaccard {
    /// Create a Jaccard measure over default bigrams.
    pub fn new() -> Self {
        Self {
            inner: WeightedJaccard::with_weight(1.0),
        }
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.inner = self.inner.with_engine(engine);
        self
    }
}

impl Similarity for Jaccard {
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64> {
        self.inner.sim(src, tar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intersection::IntersectionType;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-12
    }

    #[test]
    fn test_identical_strings() {
        let mut cmp = Jaccard::new();
        assert_eq!(cmp.sim("abc", "abc").unwrap(), 1.0);
        assert_eq!(cmp.dist("abc", "abc").unwrap(), 0.0);
    }

    #[test]
    fn test_empty_string_identities() {
        let mut cmp = WeightedJaccard::new();
        assert_eq!(cmp.sim("", "").unwrap(), 1.0);
        assert_eq!(cmp.sim("a", "").unwrap(), 0.0);
        assert_eq!(cmp.sim("", "a").unwrap(), 0.0);
    }

    #[test]
    fn test_plain_jaccard_value() {
        // cat/hat bigrams share 2 of 6: 2 / (2 + 2 + 2).
        let mut cmp = Jaccard::new();
        assert!(close(cmp.sim("cat", "hat").unwrap(), 1.0 / 3.0));
    }

    #[test]
    fn test_weight_one_reduces_to_jaccard() {
        let mut weighted = WeightedJaccard::with_weight(1.0);
        let mut plain = Jaccard::new();
        for (src, tar) in [
            ("cat", "hat"),
            ("Nigel", "Niall"),
            ("AATTATAT", "TATATATA"),
            ("aluminum", "Catalan"),
        ] {
            assert!(close(
                weighted.sim(src, tar).unwrap(),
                plain.sim(src, tar).unwrap()
            ));
        }
    }

    #[test]
    fn test_weight_two_is_dice() {
        // Dice of cat/hat: 2·2 / (2·2 + 2 + 2) = 0.5.
        let mut cmp = WeightedJaccard::with_weight(2.0);
        assert!(close(cmp.sim("cat", "hat").unwrap(), 0.5));
    }

    #[test]
    fn test_default_triple_weight() {
        // 3·2 / (3·2 + 2 + 2) = 0.6.
        let mut cmp = WeightedJaccard::new();
        assert!(close(cmp.sim("cat", "hat").unwrap(), 0.6));
    }

    #[test]
    fn test_symmetry() {
        let mut cmp = WeightedJaccard::new();
        assert!(close(
            cmp.sim("Nigel", "Niall").unwrap(),
            cmp.sim("Niall", "Nigel").unwrap()
        ));
    }

    #[test]
    fn test_fuzzy_engine_is_at_least_crisp() {
        let mut crisp = Jaccard::new();
        let fuzzy_engine = TokenDistance::builder()
            .intersection_type(IntersectionType::fuzzy())
            .build()
            .unwrap();
        let mut fuzzy = Jaccard::new().with_engine(fuzzy_engine);

        let crisp_sim = crisp.sim("Nigel", "Nigle").unwrap();
        let fuzzy_sim = fuzzy.sim("Nigel", "Nigle").unwrap();
        assert!(fuzzy_sim >= crisp_sim);
    }
}
