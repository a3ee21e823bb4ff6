//! Kuder & Richardson similarity (reliability coefficient KR-20 applied to
//! the 2x2 confusion table).

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::measures::{degenerate_guard, Similarity};

/// Kuder & Richardson similarity.
///
/// ```text
/// sim = 4(ad − bc) / ((a+b)(c+d) + (a+c)(b+d) + 2(ad − bc))
/// ```
///
/// Requires a resolvable population, since `d` enters the formula. With an
/// inferred population `d` is 0 and the measure degrades accordingly, so an
/// explicit alphabet is recommended.
#[derive(Debug, Clone)]
pub struct KuderRichardson {
    engine: TokenDistance,
}

impl Default for KuderRichardson {
    fn default() -> Self {
        Self::new()
    }
}

impl KuderRichardson {
    /// Create a Kuder & Richardson measure over default bigrams.
    pub fn new() -> Self {
        Self {
            engine: TokenDistance::new(),
        }
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }
}

impl Similarity for KuderRichardson {
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
        let d = self.engine.total_complement_card()?;

        let admbc = a * d - b * c;
        let denominator = (a + b) * (c + d) + (a + c) * (b + d) + 2.0 * admbc;
        if denominator == 0.0 {
            return Ok(0.0);
        }
        Ok(4.0 * admbc / denominator)
    }
}
