//! Q-gram tokenization.
//!
//! A q-gram is a substring of q character units extracted by a sliding
//! window, optionally strided (skip) and boundary-padded (start/stop
//! symbols). Character units are Unicode grapheme clusters.

use compact_str::CompactString;
use unicode_segmentation::UnicodeSegmentation;

use crate::error::{GramsetError, Result};
use crate::multiset::Multiset;
use crate::scaler::CountScaler;
use crate::Tokenizer;

/// Default start/stop padding symbols: `$` pads the front, `#` the back.
pub const DEFAULT_START_STOP: &str = "$#";

/// Q-gram tokenizer.
///
/// Supports multiple simultaneous q-gram lengths and skip values; every
/// configured `(q, skip)` combination contributes its tokens to one shared
/// ordered sequence and multiset.
///
/// # Example
///
/// ```
/// use gramset_tokenizer::{QGrams, Tokenizer};
///
/// let mut qg = QGrams::new();
/// qg.tokenize("AATTATAT");
/// assert_eq!(qg.counter().get("AT"), 3.0);
/// assert_eq!(qg.counter().get("$A"), 1.0);
/// ```
#[derive(Debug, Clone)]
pub struct QGrams {
    qvals: Vec<usize>,
    skips: Vec<usize>,
    start_stop: String,
    scaler: CountScaler,
    ordered: Vec<CompactString>,
    tokens: Multiset,
    padded: String,
}

impl Default for QGrams {
    fn default() -> Self {
        Self::new()
    }
}

impl QGrams {
    /// Create a q-gram tokenizer with the default configuration
    /// (q = 2, start/stop `"$#"`, no skip, identity scaler).
    pub fn new() -> Self {
        Self {
            qvals: vec![2],
            skips: vec![0],
            start_stop: DEFAULT_START_STOP.to_string(),
            scaler: CountScaler::Identity,
            ordered: Vec::new(),
            tokens: Multiset::new(),
            padded: String::new(),
        }
    }

    /// Create a q-gram tokenizer builder.
    pub fn builder() -> QGramsBuilder {
        QGramsBuilder::new()
    }

    /// The padded form of the last tokenized string: the longest padded
    /// variant across all configured `(q, skip)` combinations.
    pub fn padded_string(&self) -> &str {
        &self.padded
    }

    /// The configured q-gram lengths.
    pub fn qvals(&self) -> &[usize] {
        &self.qvals
    }

    fn tokenize_combination(&mut self, graphemes: &[&str], q: usize, skip: usize) {
        if q < 1 {
            return;
        }

        // Pad with q-1 copies of the first start/stop symbol in front and
        // q-1 copies of the last in back. A single-symbol start_stop pads
        // both ends with the same symbol.
        let mut padded: Vec<&str> = Vec::with_capacity(graphemes.len() + 2 * (q - 1));
        if !self.start_stop.is_empty() && q > 1 {
            let mut symbols = self.start_stop.graphemes(true);
            let start = symbols.next().unwrap_or_default();
            let stop = symbols.next_back().unwrap_or(start);
            for _ in 0..q - 1 {
                padded.push(start);
            }
            padded.extend_from_slice(graphemes);
            for _ in 0..q - 1 {
                padded.push(stop);
            }
        } else {
            padded.extend_from_slice(graphemes);
        }

        if padded.len() < q {
            return;
        }

        // Retain the longest padded variant for introspection.
        if padded.len() > self.padded.graphemes(true).count() {
            self.padded = padded.concat();
        }

        let stride = skip + 1;
        for i in 0..=padded.len() - q {
            let mut gram = CompactString::default();
            let mut index = i;
            let mut taken = 0;
            // The window spans q units spaced stride apart, clamped at the
            // string end, so trailing grams may be short when skip > 0.
            while taken < q && index < padded.len() {
                gram.push_str(padded[index]);
                index += stride;
                taken += 1;
            }
            self.ordered.push(gram);
        }
    }
}

impl Tokenizer for QGrams {
    fn tokenize(&mut self, input: &str) {
        let graphemes: Vec<&str> = input.graphemes(true).collect();

        self.ordered.clear();
        self.padded = input.to_string();

        let qvals = self.qvals.clone();
        let skips = self.skips.clone();
        for &q in &qvals {
            for &skip in &skips {
                self.tokenize_combination(&graphemes, q, skip);
            }
        }

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

/// Builder for [`QGrams`].
#[derive(Debug, Clone)]
pub struct QGramsBuilder {
    qvals: Vec<usize>,
    skips: Vec<usize>,
    start_stop: String,
    scaler: CountScaler,
}

impl Default for QGramsBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl QGramsBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            qvals: vec![2],
            skips: vec![0],
            start_stop: DEFAULT_START_STOP.to_string(),
            scaler: CountScaler::Identity,
        }
    }

    /// Set a single q-gram length.
    pub fn qval(mut self, q: usize) -> Self {
        self.qvals = vec![q];
        self
    }

    /// Set multiple simultaneous q-gram lengths; all contribute to one
    /// shared multiset.
    pub fn qvals<I: IntoIterator<Item = usize>>(mut self, qvals: I) -> Self {
        self.qvals = qvals.into_iter().collect();
        self
    }

    /// Set a single skip (gap) size. A skip of 0 yields contiguous grams.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skips = vec![skip];
        self
    }

    /// Set multiple simultaneous skip sizes.
    pub fn skips<I: IntoIterator<Item = usize>>(mut self, skips: I) -> Self {
        self.skips = skips.into_iter().collect();
        self
    }

    /// Set the start/stop padding symbols. The first character pads the
    /// front of the string, the last pads the back; an empty string
    /// disables padding.
    pub fn start_stop(mut self, start_stop: &str) -> Self {
        self.start_stop = start_stop.to_string();
        self
    }

    /// Set the count scaler.
    pub fn scaler(mut self, scaler: CountScaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// Build the tokenizer, validating the configuration.
    pub fn build(self) -> Result<QGrams> {
        if self.qvals.is_empty() {
            return Err(GramsetError::InvalidConfig(
                "at least one q-gram length is required".to_string(),
            ));
        }
        if self.qvals.contains(&0) {
            return Err(GramsetError::InvalidConfig(
                "q-gram length of 0 is not supported; use a word tokenizer instead".to_string(),
            ));
        }
        if self.skips.is_empty() {
            return Err(GramsetError::InvalidConfig(
                "at least one skip value is required".to_string(),
            ));
        }

        // A single-character gram needs no boundary markers.
        let start_stop = if self.qvals == [1] {
            String::new()
        } else {
            self.start_stop
        };

        Ok(QGrams {
            qvals: self.qvals,
            skips: self.skips,
            start_stop,
            scaler: self.scaler,
            ordered: Vec::new(),
            tokens: Multiset::new(),
            padded: String::new(),
        })
    }
}
