//! Gramset-distance - Token-multiset cardinality engine and similarity
//! measures
//!
//! This crate reduces a pair of strings to token multisets (via
//! `gramset-tokenizer`), derives the 2x2 confusion-table cardinalities
//! (a, b, c, d, n) under a selectable overlap semantic, and provides a
//! set of similarity measures built on those cardinalities.
//!
//! # Features
//!
//! - Crisp, fuzzy (threshold-gated), and soft (similarity-weighted)
//!   intersection semantics
//! - Alphabet/population configuration: explicit multiset, explicit size,
//!   or inferred from the observed union
//! - A registry of mean functions for measures that aggregate marginal
//!   products
//! - Confusion-table measures: Jaccard, weighted Jaccard, quantitative
//!   Jaccard, Kuhns VIII, Kuder & Richardson, Tulloss' R, generalized
//!   Fleiss, and positional q-gram overlap
//!
//! # Example
//!
//! ```rust
//! use gramset_distance::{Similarity, WeightedJaccard};
//!
//! let mut cmp = WeightedJaccard::with_weight(1.0);
//! let sim = cmp.sim("cat", "hat")?;
//! assert!((sim - 1.0 / 3.0).abs() < 1e-12);
//! # Ok::<(), gramset_distance::GramsetError>(())
//! ```

// Re-export the tokenizer layer
pub use gramset_tokenizer::{
    CharacterTokenizer, CountScaler, GramsetError, Multiset, QGrams, QGramsBuilder, Result,
    Tokenizer,
};

pub mod alphabet;
pub use alphabet::Alphabet;

pub mod metric;
pub use metric::{MetricFn, NormalizedLevenshtein, PairwiseMetric};

pub mod intersection;
pub use intersection::{IntersectionType, DEFAULT_FUZZY_THRESHOLD};

pub mod engine;
pub use engine::{TokenDistance, TokenDistanceBuilder};

pub mod means;
pub use means::MeanFn;

pub mod measures;
pub use measures::{
    GeneralizedFleiss, Jaccard, KuderRichardson, KuhnsVIII, Marginals,
    PositionalQGramOverlap, QuantitativeJaccard, Similarity, TullossR, WeightedJaccard,
};
