//! Gramset-tokenizer - String tokenizers producing token multisets
//!
//! This crate converts strings into ordered token sequences and multisets
//! (token -> count), the representation consumed by the cardinality engine
//! in `gramset-distance`.
//!
//! # Features
//!
//! - Q-gram tokenization with multiple simultaneous gram lengths, skip
//!   (gap) values, and boundary padding
//! - Character (grapheme cluster) tokenization
//! - Per-count scaling (identity, binarizing "set" mode, or a custom
//!   numeric transform)
//! - Multiset algebra (intersection, union, sum, saturating difference)
//!
//! # Example
//!
//! ```rust
//! use gramset_tokenizer::{QGrams, Tokenizer};
//!
//! let mut qg = QGrams::builder().qval(3).start_stop("").build()?;
//! qg.tokenize("AATTATAT");
//! assert_eq!(qg.counter().get("TAT"), 2.0);
//! # Ok::<(), gramset_tokenizer::GramsetError>(())
//! ```

pub mod error;
pub use error::{GramsetError, Result};

pub mod multiset;
pub use multiset::Multiset;

pub mod scaler;
pub use scaler::CountScaler;

pub mod qgrams;
pub use qgrams::{QGrams, QGramsBuilder, DEFAULT_START_STOP};

pub mod character;
pub use character::CharacterTokenizer;

use compact_str::CompactString;

/// A tokenizer: converts a string into an ordered token sequence and a
/// counted multiset.
///
/// Each `tokenize` call fully overwrites the previous result, so one
/// instance may be reused sequentially across many unrelated strings.
pub trait Tokenizer {
    /// Tokenize the input, replacing any previously stored result.
    fn tokenize(&mut self, input: &str);

    /// The multiset built from the last tokenized input.
    fn counter(&self) -> &Multiset;

    /// The ordered token sequence of the last tokenized input, left to
    /// right, duplicates included.
    fn ordered_tokens(&self) -> &[CompactString];

    /// Total token mass of the last tokenized input.
    fn total(&self) -> f64 {
        self.counter().total()
    }

    /// Number of distinct tokens in the last tokenized input.
    fn unique(&self) -> usize {
        self.counter().unique()
    }
}
