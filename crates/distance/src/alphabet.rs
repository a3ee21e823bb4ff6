//! Population (alphabet) configuration for confusion-table cardinalities.

use gramset_tokenizer::Multiset;

/// The universe of possible tokens, used to compute the population size `n`
/// and from it the total-complement cardinality `d`.
#[derive(Debug, Clone, Default)]
pub enum Alphabet {
    /// Infer the population as the union of the two observed token
    /// multisets.
    #[default]
    Inferred,
    /// An explicit population size.
    Size(f64),
    /// An explicit multiset of all possible tokens; the population size is
    /// its total mass.
    Counter(Multiset),
    /// No population semantics: any measure that needs `d` or `n` fails
    /// with a configuration error.
    None,
}

impl Alphabet {
    /// Resolve the population size given the union of the observed token
    /// multisets. `None` (the variant) resolves to nothing.
    pub fn population(&self, observed_union: &Multiset) -> Option<f64> {
        match self {
            Alphabet::Inferred => Some(observed_union.total()),
            Alphabet::Size(n) => Some(*n),
            Alphabet::Counter(counter) => Some(counter.total()),
            Alphabet::None => None,
        }
    }
}

impl From<f64> for Alphabet {
    fn from(size: f64) -> Self {
        Alphabet::Size(size)
    }
}

impl From<u64> for Alphabet {
    fn from(size: u64) -> Self {
        Alphabet::Size(size as f64)
    }
}

impl From<Multiset> for Alphabet {
    fn from(counter: Multiset) -> Self {
        Alphabet::Counter(counter)
    }
}
