//! Token multiset (bag) with floating-point counts.
//!
//! Counts are `f64` rather than integers because a scaler may map raw
//! occurrence counts to fractional weights (e.g. square root or log).

use ahash::AHashMap;
use compact_str::CompactString;

use crate::scaler::CountScaler;

/// A multiset of tokens: token -> count.
///
/// Absent keys imply a count of zero; stored counts are always positive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Multiset {
    counts: AHashMap<CompactString, f64>,
}

impl Multiset {
    /// Create an empty multiset.
    pub fn new() -> Self {
        Self {
            counts: AHashMap::new(),
        }
    }

    /// Build a multiset by counting an ordered token sequence.
    pub fn from_tokens(tokens: &[CompactString]) -> Self {
        let mut counts: AHashMap<CompactString, f64> = AHashMap::new();
        for token in tokens {
            *counts.entry(token.clone()).or_insert(0.0) += 1.0;
        }
        Self { counts }
    }

    /// Get the count for a token (0.0 if absent).
    pub fn get(&self, token: &str) -> f64 {
        self.counts.get(token).copied().unwrap_or(0.0)
    }

    /// Add `amount` to a token's count. Non-positive results remove the key.
    pub fn add(&mut self, token: &str, amount: f64) {
        let count = self.counts.entry(CompactString::new(token)).or_insert(0.0);
        *count += amount;
        if *count <= 0.0 {
            self.counts.remove(token);
        }
    }

    /// Total mass: the sum of all counts.
    pub fn total(&self) -> f64 {
        self.counts.values().sum()
    }

    /// Number of distinct tokens.
    pub fn unique(&self) -> usize {
        self.counts.len()
    }

    /// Whether the multiset holds no tokens.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterate over (token, count) pairs. Order is unspecified.
    pub fn iter(&self) -> impl Iterator<Item = (&CompactString, f64)> {
        self.counts.iter().map(|(k, &v)| (k, v))
    }

    /// Tokens in sorted order. Used where deterministic iteration matters.
    pub fn sorted_tokens(&self) -> Vec<CompactString> {
        let mut tokens: Vec<CompactString> = self.counts.keys().cloned().collect();
        tokens.sort_unstable();
        tokens
    }

    /// Multiset intersection: per-token minimum of counts.
    pub fn intersection(&self, other: &Multiset) -> Multiset {
        let mut counts = AHashMap::new();
        for (token, &count) in &self.counts {
            let min = count.min(other.get(token));
            if min > 0.0 {
                counts.insert(token.clone(), min);
            }
        }
        Multiset { counts }
    }

    /// Multiset sum: per-token addition of counts.
    pub fn sum(&self, other: &Multiset) -> Multiset {
        let mut counts = self.counts.clone();
        for (token, &count) in &other.counts {
            *counts.entry(token.clone()).or_insert(0.0) += count;
        }
        Multiset { counts }
    }

    /// Multiset union: per-token maximum of counts.
    pub fn union(&self, other: &Multiset) -> Multiset {
        let mut counts = self.counts.clone();
        for (token, &count) in &other.counts {
            let entry = counts.entry(token.clone()).or_insert(0.0);
            if count > *entry {
                *entry = count;
            }
        }
        Multiset { counts }
    }

    /// Saturating difference: per-token `max(self - other, 0)`.
    pub fn difference(&self, other: &Multiset) -> Multiset {
        let mut counts = AHashMap::new();
        for (token, &count) in &self.counts {
            let diff = count - other.get(token);
            if diff > 0.0 {
                counts.insert(token.clone(), diff);
            }
        }
        Multiset { counts }
    }

    /// Apply a scaler to every count in place.
    pub fn scale(&mut self, scaler: &CountScaler) {
        if matches!(scaler, CountScaler::Identity) {
            return;
        }
        for count in self.counts.values_mut() {
            *count = scaler.scale(*count);
        }
        self.counts.retain(|_, count| *count > 0.0);
    }
}

impl FromIterator<(CompactString, f64)> for Multiset {
    fn from_iter<I: IntoIterator<Item = (CompactString, f64)>>(iter: I) -> Self {
        let mut set = Multiset::new();
        for (token, count) in iter {
            set.add(&token, count);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(pairs: &[(&str, f64)]) -> Multiset {
        let mut set = Multiset::new();
        for (token, count) in pairs {
            set.add(token, *count);
        }
        set
    }

    #[test]
    fn test_from_tokens_counts_duplicates() {
        let tokens: Vec<CompactString> =
            ["a", "b", "a", "a"].iter().map(|s| CompactString::new(s)).collect();
        let set = Multiset::from_tokens(&tokens);

        assert_eq!(set.get("a"), 3.0);
        assert_eq!(set.get("b"), 1.0);
        assert_eq!(set.get("c"), 0.0);
        assert_eq!(set.total(), 4.0);
        assert_eq!(set.unique(), 2);
    }

    #[test]
    fn test_intersection_takes_minimum() {
        let x = bag(&[("a", 3.0), ("b", 1.0)]);
        let y = bag(&[("a", 1.0), ("c", 2.0)]);

        let both = x.intersection(&y);
        assert_eq!(both.get("a"), 1.0);
        assert_eq!(both.get("b"), 0.0);
        assert_eq!(both.get("c"), 0.0);
    }

    #[test]
    fn test_union_takes_maximum() {
        let x = bag(&[("a", 3.0), ("b", 1.0)]);
        let y = bag(&[("a", 1.0), ("c", 2.0)]);

        let either = x.union(&y);
        assert_eq!(either.get("a"), 3.0);
        assert_eq!(either.get("b"), 1.0);
        assert_eq!(either.get("c"), 2.0);
        assert_eq!(either.total(), 6.0);
    }

    #[test]
    fn test_difference_saturates_at_zero() {
        let x = bag(&[("a", 3.0), ("b", 1.0)]);
        let y = bag(&[("a", 1.0), ("b", 5.0)]);

        let only_x = x.difference(&y);
        assert_eq!(only_x.get("a"), 2.0);
        assert_eq!(only_x.get("b"), 0.0);
        assert_eq!(only_x.unique(), 1);
    }

    #[test]
    fn test_sum_adds_counts() {
        let x = bag(&[("a", 2.0)]);
        let y = bag(&[("a", 1.0), ("b", 1.0)]);

        let combined = x.sum(&y);
        assert_eq!(combined.get("a"), 3.0);
        assert_eq!(combined.get("b"), 1.0);
    }

    #[test]
    fn test_scale_set_clamps_to_one() {
        let mut set = bag(&[("a", 3.0), ("b", 1.0)]);
        set.scale(&CountScaler::Set);

        assert_eq!(set.get("a"), 1.0);
        assert_eq!(set.get("b"), 1.0);
        assert_eq!(set.total(), 2.0);
    }
}
