//! The cardinality engine: tokenizes a string pair and exposes the
//! confusion-table cardinalities (a, b, c, d, n) every token-based
//! similarity measure consumes.

use compact_str::CompactString;
use gramset_tokenizer::{
    CountScaler, GramsetError, Multiset, QGrams, Result, Tokenizer,
};

use crate::alphabet::Alphabet;
use crate::intersection::IntersectionType;

/// State derived from the last tokenized pair.
#[derive(Debug, Clone)]
struct PairState {
    src_tokens: Multiset,
    tar_tokens: Multiset,
    src_ordered: Vec<CompactString>,
    tar_ordered: Vec<CompactString>,
    intersection_card: f64,
}

/// Token-distance cardinality engine.
///
/// Holds a tokenizer, an alphabet, and an intersection semantic as
/// immutable configuration; `tokenize` stores the multisets for one string
/// pair and the accessors read the confusion-table cardinalities of that
/// pair:
///
/// - `a` = [`intersection_card`](Self::intersection_card)
/// - `b` = [`src_only_card`](Self::src_only_card)
/// - `c` = [`tar_only_card`](Self::tar_only_card)
/// - `d` = [`total_complement_card`](Self::total_complement_card)
/// - `n` = [`population_card`](Self::population_card)
///
/// Every `tokenize` call fully overwrites the previous pair, so one engine
/// may be reused sequentially across many comparisons.
#[derive(Debug, Clone)]
pub struct TokenDistance<T: Tokenizer = QGrams> {
    tokenizer: T,
    alphabet: Alphabet,
    intersection: IntersectionType,
    state: Option<PairState>,
}

impl TokenDistance<QGrams> {
    /// Create an engine with the default q-gram tokenizer (q = 2, `"$#"`
    /// padding), an inferred alphabet, and crisp intersection.
    pub fn new() -> Self {
        Self::with_tokenizer(QGrams::new())
    }

    /// Create an engine builder.
    pub fn builder() -> TokenDistanceBuilder {
        TokenDistanceBuilder::new()
    }
}

impl Default for TokenDistance<QGrams> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tokenizer> TokenDistance<T> {
    /// Create an engine around an arbitrary tokenizer, with an inferred
    /// alphabet and crisp intersection.
    pub fn with_tokenizer(tokenizer: T) -> Self {
        Self {
            tokenizer,
            alphabet: Alphabet::Inferred,
            intersection: IntersectionType::Crisp,
            state: None,
        }
    }

    /// Replace the alphabet configuration.
    pub fn alphabet(mut self, alphabet: impl Into<Alphabet>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Replace the intersection semantic.
    pub fn intersection_type(mut self, intersection: IntersectionType) -> Self {
        self.intersection = intersection;
        self
    }

    /// Tokenize a source/target string pair, overwriting any previously
    /// stored pair.
    pub fn tokenize(&mut self, src: &str, tar: &str) -> &mut Self {
        self.tokenizer.tokenize(src);
        let src_tokens = self.tokenizer.counter().clone();
        let src_ordered = self.tokenizer.ordered_tokens().to_vec();

        self.tokenizer.tokenize(tar);
        let tar_tokens = self.tokenizer.counter().clone();
        let tar_ordered = self.tokenizer.ordered_tokens().to_vec();

        self.store(src_tokens, tar_tokens, src_ordered, tar_ordered)
    }

    /// Store a pre-tokenized source/target multiset pair, bypassing the
    /// tokenizer.
    pub fn tokenize_counters(&mut self, src: Multiset, tar: Multiset) -> &mut Self {
        self.store(src, tar, Vec::new(), Vec::new())
    }

    fn store(
        &mut self,
        src_tokens: Multiset,
        tar_tokens: Multiset,
        src_ordered: Vec<CompactString>,
        tar_ordered: Vec<CompactString>,
    ) -> &mut Self {
        let intersection_card = self.intersection.intersection_card(&src_tokens, &tar_tokens);
        self.state = Some(PairState {
            src_tokens,
            tar_tokens,
            src_ordered,
            tar_ordered,
            intersection_card,
        });
        self
    }

    fn state(&self) -> Result<&PairState> {
        self.state.as_ref().ok_or(GramsetError::NotTokenized)
    }

    /// The source token multiset of the last pair.
    pub fn src_tokens(&self) -> Result<&Multiset> {
        Ok(&self.state()?.src_tokens)
    }

    /// The target token multiset of the last pair.
    pub fn tar_tokens(&self) -> Result<&Multiset> {
        Ok(&self.state()?.tar_tokens)
    }

    /// The ordered source token sequence of the last pair (empty when the
    /// pair was supplied as pre-built counters).
    pub fn src_ordered(&self) -> Result<&[CompactString]> {
        Ok(&self.state()?.src_ordered)
    }

    /// The ordered target token sequence of the last pair.
    pub fn tar_ordered(&self) -> Result<&[CompactString]> {
        Ok(&self.state()?.tar_ordered)
    }

    /// `a`: the intersection cardinality under the configured semantic.
    pub fn intersection_card(&self) -> Result<f64> {
        Ok(self.state()?.intersection_card)
    }

    /// `b`: mass present in the source only.
    pub fn src_only_card(&self) -> Result<f64> {
        let state = self.state()?;
        Ok((state.src_tokens.total() - state.intersection_card).max(0.0))
    }

    /// `c`: mass present in the target only.
    pub fn tar_only_card(&self) -> Result<f64> {
        let state = self.state()?;
        Ok((state.tar_tokens.total() - state.intersection_card).max(0.0))
    }

    /// `|src|`: total source token mass.
    pub fn src_card(&self) -> Result<f64> {
        Ok(self.state()?.src_tokens.total())
    }

    /// `|tar|`: total target token mass.
    pub fn tar_card(&self) -> Result<f64> {
        Ok(self.state()?.tar_tokens.total())
    }

    /// `a + b + c`: mass present in either multiset, under the configured
    /// semantic.
    pub fn union_card(&self) -> Result<f64> {
        let state = self.state()?;
        Ok(
            (state.src_tokens.total() + state.tar_tokens.total() - state.intersection_card)
                .max(0.0),
        )
    }

    /// The multiset sum of both sides (every token with its combined
    /// count). Consumed by quantitative measures.
    pub fn total(&self) -> Result<Multiset> {
        let state = self.state()?;
        Ok(state.src_tokens.sum(&state.tar_tokens))
    }

    /// `n`: the population size from the configured alphabet.
    pub fn population_card(&self) -> Result<f64> {
        let state = self.state()?;
        let union = state.src_tokens.union(&state.tar_tokens);
        self.alphabet
            .population(&union)
            .ok_or(GramsetError::UnresolvablePopulation)
    }

    /// `d`: mass in the population but in neither multiset, clamped at 0.
    pub fn total_complement_card(&self) -> Result<f64> {
        let n = self.population_card()?;
        Ok((n - self.union_card()?).max(0.0))
    }
}

/// Builder for a [`TokenDistance`] over the q-gram tokenizer.
#[derive(Debug, Clone)]
pub struct TokenDistanceBuilder {
    qvals: Vec<usize>,
    skips: Vec<usize>,
    start_stop: String,
    scaler: CountScaler,
    alphabet: Alphabet,
    intersection: IntersectionType,
}

impl Default for TokenDistanceBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TokenDistanceBuilder {
    /// Create a builder with the default configuration.
    pub fn new() -> Self {
        Self {
            qvals: vec![2],
            skips: vec![0],
            start_stop: gramset_tokenizer::DEFAULT_START_STOP.to_string(),
            scaler: CountScaler::Identity,
            alphabet: Alphabet::Inferred,
            intersection: IntersectionType::Crisp,
        }
    }

    /// Set a single q-gram length.
    pub fn qval(mut self, q: usize) -> Self {
        self.qvals = vec![q];
        self
    }

    /// Set multiple simultaneous q-gram lengths.
    pub fn qvals<I: IntoIterator<Item = usize>>(mut self, qvals: I) -> Self {
        self.qvals = qvals.into_iter().collect();
        self
    }

    /// Set a single skip (gap) size.
    pub fn skip(mut self, skip: usize) -> Self {
        self.skips = vec![skip];
        self
    }

    /// Set the start/stop padding symbols.
    pub fn start_stop(mut self, start_stop: &str) -> Self {
        self.start_stop = start_stop.to_string();
        self
    }

    /// Set the count scaler.
    pub fn scaler(mut self, scaler: CountScaler) -> Self {
        self.scaler = scaler;
        self
    }

    /// Set the alphabet.
    pub fn alphabet(mut self, alphabet: impl Into<Alphabet>) -> Self {
        self.alphabet = alphabet.into();
        self
    }

    /// Set the intersection semantic.
    pub fn intersection_type(mut self, intersection: IntersectionType) -> Self {
        self.intersection = intersection;
        self
    }

    /// Build the engine, validating the tokenizer configuration.
    pub fn build(self) -> Result<TokenDistance<QGrams>> {
        let tokenizer = QGrams::builder()
            .qvals(self.qvals)
            .skips(self.skips)
            .start_stop(&self.start_stop)
            .scaler(self.scaler)
            .build()?;
        Ok(TokenDistance {
            tokenizer,
            alphabet: self.alphabet,
            intersection: self.intersection,
            state: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gramset_tokenizer::CharacterTokenizer;

    #[test]
    fn test_crisp_cardinalities() {
        let mut engine = TokenDistance::new();
        engine.tokenize("cat", "hat");

        // $c ca at t# vs $h ha at t#
        assert_eq!(engine.intersection_card().unwrap(), 2.0);
        assert_eq!(engine.src_only_card().unwrap(), 2.0);
        assert_eq!(engine.tar_only_card().unwrap(), 2.0);
        assert_eq!(engine.union_card().unwrap(), 6.0);
    }

    #[test]
    fn test_mass_conservation() {
        let mut engine = TokenDistance::new();
        engine.tokenize("Nigel", "Niall");

        let a = engine.intersection_card().unwrap();
        let b = engine.src_only_card().unwrap();
        let c = engine.tar_only_card().unwrap();
        assert_eq!(a + b, engine.src_card().unwrap());
        assert_eq!(a + c, engine.tar_card().unwrap());
    }

    #[test]
    fn test_intersection_is_commutative() {
        let mut forward = TokenDistance::new();
        let mut backward = TokenDistance::new();
        forward.tokenize("Nigel", "Niall");
        backward.tokenize("Niall", "Nigel");

        assert_eq!(
            forward.intersection_card().unwrap(),
            backward.intersection_card().unwrap()
        );
    }

    #[test]
    fn test_empty_pair_has_zero_marginals() {
        let mut engine = TokenDistance::builder()
            .start_stop("")
            .build()
            .unwrap();
        engine.tokenize("", "");

        assert_eq!(engine.intersection_card().unwrap(), 0.0);
        assert_eq!(engine.src_only_card().unwrap(), 0.0);
        assert_eq!(engine.tar_only_card().unwrap(), 0.0);
        assert_eq!(engine.population_card().unwrap(), 0.0);
    }

    #[test]
    fn test_inferred_population_is_union() {
        let mut engine = TokenDistance::new();
        engine.tokenize("cat", "hat");

        assert_eq!(engine.population_card().unwrap(), 6.0);
        assert_eq!(engine.total_complement_card().unwrap(), 0.0);
    }

    #[test]
    fn test_explicit_population_yields_complement() {
        let mut engine = TokenDistance::builder()
            .alphabet(100_u64)
            .build()
            .unwrap();
        engine.tokenize("cat", "hat");

        assert_eq!(engine.population_card().unwrap(), 100.0);
        assert_eq!(engine.total_complement_card().unwrap(), 94.0);
    }

    #[test]
    fn test_unresolvable_population_errors() {
        let mut engine = TokenDistance::new().alphabet(Alphabet::None);
        engine.tokenize("cat", "hat");

        assert!(matches!(
            engine.population_card(),
            Err(GramsetError::UnresolvablePopulation)
        ));
        assert!(engine.intersection_card().is_ok());
    }

    #[test]
    fn test_accessors_before_tokenize_error() {
        let engine = TokenDistance::new();
        assert!(matches!(
            engine.intersection_card(),
            Err(GramsetError::NotTokenized)
        ));
    }

    #[test]
    fn test_tokenize_overwrites_previous_pair() {
        let mut engine = TokenDistance::new();
        engine.tokenize("cat", "hat");
        engine.tokenize("cat", "cat");

        assert_eq!(engine.intersection_card().unwrap(), 4.0);
        assert_eq!(engine.src_only_card().unwrap(), 0.0);
    }

    #[test]
    fn test_pretokenized_counters() {
        let mut src = Multiset::new();
        src.add("ab", 2.0);
        src.add("bc", 1.0);
        let mut tar = Multiset::new();
        tar.add("ab", 1.0);

        let mut engine = TokenDistance::new();
        engine.tokenize_counters(src, tar);

        assert_eq!(engine.intersection_card().unwrap(), 1.0);
        assert_eq!(engine.src_only_card().unwrap(), 2.0);
        assert_eq!(engine.tar_only_card().unwrap(), 0.0);
    }

    #[test]
    fn test_fuzzy_marginals_derive_from_totals() {
        let mut engine = TokenDistance::builder()
            .intersection_type(IntersectionType::fuzzy())
            .build()
            .unwrap();
        engine.tokenize("cat", "cat");

        let a = engine.intersection_card().unwrap();
        assert_eq!(a, 4.0);
        assert_eq!(engine.src_only_card().unwrap(), 0.0);
    }

    #[test]
    fn test_character_tokenizer_engine() {
        let mut engine = TokenDistance::with_tokenizer(CharacterTokenizer::new());
        engine.tokenize("abca", "abd");

        // a b c a vs a b d
        assert_eq!(engine.intersection_card().unwrap(), 2.0);
        assert_eq!(engine.src_only_card().unwrap(), 2.0);
        assert_eq!(engine.tar_only_card().unwrap(), 1.0);
    }

    #[test]
    fn test_total_sums_both_sides() {
        let mut engine = TokenDistance::new();
        engine.tokenize("cat", "hat");

        let total = engine.total().unwrap();
        assert_eq!(total.get("at"), 2.0);
        assert_eq!(total.get("$c"), 1.0);
        assert_eq!(total.total(), 8.0);
    }

    #[test]
    fn test_scaled_counts_flow_through() {
        let mut engine = TokenDistance::builder()
            .scaler(CountScaler::Set)
            .build()
            .unwrap();
        engine.tokenize("AATTATAT", "AATTATAT");

        // Six distinct bigrams, each clamped to 1.
        assert_eq!(engine.intersection_card().unwrap(), 6.0);
    }
}
