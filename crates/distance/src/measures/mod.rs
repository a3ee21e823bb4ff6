//! Similarity measures: thin arithmetic consumers of the cardinality
//! engine.
//!
//! Every measure reads the confusion-table cardinalities (a, b, c, d, n)
//! from a [`TokenDistance`](crate::TokenDistance) engine and combines them
//! into a scalar. Degenerate inputs are handled uniformly: two empty
//! strings are maximally similar (1.0) and exactly one empty string is
//! maximally dissimilar (0.0).

use gramset_tokenizer::Result;

mod jaccard;
pub use jaccard::{Jaccard, WeightedJaccard};

mod quantitative_jaccard;
pub use quantitative_jaccard::QuantitativeJaccard;

mod kuhns_viii;
pub use kuhns_viii::KuhnsVIII;

mod kuder_richardson;
pub use kuder_richardson::KuderRichardson;

mod tulloss_r;
pub use tulloss_r::TullossR;

mod generalized_fleiss;
pub use generalized_fleiss::{GeneralizedFleiss, Marginals};

mod positional_overlap;
pub use positional_overlap::PositionalQGramOverlap;

/// A normalized string similarity measure.
pub trait Similarity {
    /// Similarity of two strings, in `[0, 1]`.
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64>;

    /// Distance of two strings: `1 - sim`.
    fn dist(&mut self, src: &str, tar: &str) -> Result<f64> {
        Ok(1.0 - self.sim(src, tar)?)
    }
}

/// The shared degenerate-input guard: `Some(1.0)` when both sides are
/// empty, `Some(0.0)` when exactly one is, `None` otherwise.
pub(crate) fn degenerate_guard(src_card: f64, tar_card: f64) -> Option<f64> {
    match (src_card == 0.0, tar_card == 0.0) {
        (true, true) => Some(1.0),
        (true, false) | (false, true) => Some(0.0),
        (false, false) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degenerate_guard() {
        assert_eq!(degenerate_guard(0.0, 0.0), Some(1.0));
        assert_eq!(degenerate_guard(0.0, 3.0), Some(0.0));
        assert_eq!(degenerate_guard(3.0, 0.0), Some(0.0));
        assert_eq!(degenerate_guard(3.0, 3.0), None);
    }
}
