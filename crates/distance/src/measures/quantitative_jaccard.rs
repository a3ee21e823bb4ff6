//! Quantitative Jaccard similarity over raw token counts.

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::measures::{degenerate_guard, Similarity};

/// Quantitative Jaccard similarity.
///
/// For two multisets X and Y over an alphabet S:
///
/// ```text
/// sim = Σ XᵢYᵢ / (Σ Xᵢ² + Σ Yᵢ² − Σ XᵢYᵢ)
/// ```
///
/// Unlike the crisp cardinality form, this consumes the raw per-token
/// counts directly.
#[derive(Debug, Clone, Default)]
pub struct QuantitativeJaccard {
    engine: TokenDistance,
}

impl QuantitativeJaccard {
    /// Create a quantitative Jaccard measure over default bigrams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }
}

impl Similarity for QuantitativeJaccard {
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64> {
        self.engine.tokenize(src, tar);

        if let Some(identity) =
            degenerate_guard(self.engine.src_card()?, self.engine.tar_card()?)
        {
            return Ok(identity);
        }

        let src_tokens = self.engine.src_tokens()?;
        let tar_tokens = self.engine.tar_tokens()?;

        let mut product = 0.0;
        let mut src_squares = 0.0;
        let mut tar_squares = 0.0;
        for (token, count) in src_tokens.iter() {
            product += count * tar_tokens.get(token);
            src_squares += count * count;
        }
        for (_, count) in tar_tokens.iter() {
            tar_squares += count * count;
        }

        let denominator = src_squares + tar_squares - product;
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(product / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-12
    }

    #[test]
    fn test_identical_strings() {
        let mut cmp = QuantitativeJaccard::new();
        assert_eq!(cmp.sim("Niall", "Niall").unwrap(), 1.0);
    }

    #[test]
    fn test_empty_string_identities() {
        let mut cmp = QuantitativeJaccard::new();
        assert_eq!(cmp.sim("", "").unwrap(), 1.0);
        assert_eq!(cmp.sim("Niall", "").unwrap(), 0.0);
    }

    #[test]
    fn test_disjoint_strings() {
        // fg/hi bigram sets share nothing beyond boundary grams; use
        // padless unigrams so the overlap is truly zero.
        let engine = TokenDistance::builder()
            .qval(1)
            .start_stop("")
            .build()
            .unwrap();
        let mut cmp = QuantitativeJaccard::new().with_engine(engine);
        assert_eq!(cmp.sim("fg", "hi").unwrap(), 0.0);
    }

    #[test]
    fn test_known_value() {
        // cat/hat: shared bigrams at, t# each 1·1; squares 4 + 4.
        // 2 / (4 + 4 - 2) = 1/3.
        let mut cmp = QuantitativeJaccard::new();
        assert!(close(cmp.sim("cat", "hat").unwrap(), 1.0 / 3.0));
    }

    #[test]
    fn test_repeated_tokens_weigh_quadratically() {
        // AATTATAT: {AT:3, TA:2, $A:1, AA:1, TT:1, T#:1} against itself
        // must still normalize to 1.
        let mut cmp = QuantitativeJaccard::new();
        assert!(close(cmp.sim("AATTATAT", "AATTATAT").unwrap(), 1.0));
    }

    #[test]
    fn test_symmetry() {
        let mut cmp = QuantitativeJaccard::new();
        assert!(close(
            cmp.sim("Nigel", "Niall").unwrap(),
            cmp.sim("Niall", "Nigel").unwrap()
        ));
    }
}
