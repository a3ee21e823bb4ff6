//! Character tokenization: one token per grapheme cluster.

use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

use crate::multiset::Multiset;
use crate::scaler::CountScaler;
use crate::Tokenizer;

/// A character tokenizer.
///
/// Every grapheme cluster of the input becomes one token.
#[derive(Debug, Clone, Default)]
pub struct CharacterTokenizer {
    scaler: CountScaler,
    ordered: Vec<CompactString>,
    tokens: Multiset,
}

impl CharacterTokenizer {
    /// Create a character tokenizer with no count scaling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a character tokenizer with the given count scaler.
    pub fn with_scaler(scaler: CountScaler) -> Self {
        Self {
            scaler,
            ordered: Vec::new(),
            tokens: Multiset::new(),
        }
    }
}

impl Tokenizer for CharacterTokenizer {
    fn tokenize(&mut self, input: &str) {
        self.ordered = input.graphemes(true).map(CompactString::new).collect();
        self.tokens = Multiset::from_tokens(&self.ordered);
        self.tokens.scale(&self.scaler);
    }

    fn counter(&self) -> &Multiset {
        &self.tokens
    }

    fn ordered_tokens(&self) -> &[CompactString] {
        &self.ordered
    }
}
