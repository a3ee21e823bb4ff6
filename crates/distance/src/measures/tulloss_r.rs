//! Tulloss' R similarity.

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::measures::{degenerate_guard, Similarity};

/// Tulloss' R similarity.
///
/// ```text
/// sim = ln(1 + a/(a+b)) · ln(1 + a/(a+c)) / ln(2)²
/// ```
#[derive(Debug, Clone, Default)]
pub struct TullossR {
    engine: TokenDistance,
}

impl TullossR {
    /// Create a Tulloss R measure over default bigrams.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }
}

impl Similarity for TullossR {
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
        if a + b == 0.0 || a + c == 0.0 {
            return Ok(0.0);
        }

        let ln2 = std::f64::consts::LN_2;
        Ok((1.0 + a / (a + b)).ln() * (1.0 + a / (a + c)).ln() / (ln2 * ln2))
    }
}
