//! Kuhns VIII similarity.

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::measures::{degenerate_guard, Similarity};

/// Kuhns VIII similarity.
///
/// With δ(X, Y) = a − (2a + b + c)/n:
///
/// ```text
/// sim = δ(X, Y) / (a + (b + c)/2)
/// ```
///
/// Requires a resolvable population (`n`); by default the population is
/// inferred from the observed union.
#[derive(Debug, Clone, Default)]
pub struct KuhnsVIII {
    engine: TokenDistance,
}

impl KuhnsVIII {
    /// Create a Kuhns VIII measure over default bigrams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }
}

impl Similarity for KuhnsVIII {
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
        let n = self.engine.population_card()?;

        let denominator = a + 0.5 * (b + c);
        if n == 0.0 || denominator == 0.0 {
            return Ok(0.0);
        }

        let delta = a - (2.0 * a + b + c) / n;
        Ok(delta / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(x: f64, y: f64) -> bool {
        (x - y).abs() < 1e-9
    }

    #[test]
    fn test_empty_string_identities() {
        let mut cmp = KuhnsVIII::new();
        assert_eq!(cmp.sim("", "").unwrap(), 1.0);
        assert_eq!(cmp.sim("cat", "").unwrap(), 0.0);
        assert_eq!(cmp.sim("", "cat").unwrap(), 0.0);
    }

    #[test]
    fn test_known_value_with_explicit_alphabet() {
        // cat/hat with n = 676: a=2, b=2, c=2.
        // delta = 2 - 6/676; denom = 4.
        let engine = TokenDistance::builder().alphabet(676_u64).build().unwrap();
        let mut cmp = KuhnsVIII::new().with_engine(engine);

        let expected = (2.0 - 6.0 / 676.0) / 4.0;
        assert!(close(cmp.sim("cat", "hat").unwrap(), expected));
    }

    #[test]
    fn test_inferred_population() {
        // cat/hat inferred n = 6: delta = 2 - 1 = 1; sim = 0.25.
        let mut cmp = KuhnsVIII::new();
        assert!(close(cmp.sim("cat", "hat").unwrap(), 0.25));
    }

    #[test]
    fn test_symmetry() {
        let mut cmp = KuhnsVIII::new();
        assert!(close(
            cmp.sim("Nigel", "Niall").unwrap(),
            cmp.sim("Niall", "Nigel").unwrap()
        ));
    }

    #[test]
    fn test_large_population_approaches_half_weighted_jaccard() {
        // As n grows, delta -> a, so sim -> a / (a + (b+c)/2).
        let engine = TokenDistance::builder()
            .alphabet(1_000_000_000_000_u64)
            .build()
            .unwrap();
        let mut cmp = KuhnsVIII::new().with_engine(engine);
        assert!(close(cmp.sim("cat", "hat").unwrap(), 0.5));
    }
}
