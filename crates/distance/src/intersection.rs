//! Intersection semantics: crisp, fuzzy, and soft token overlap.
//!
//! Each semantic is an independent pure function over two multisets; the
//! fuzzy and soft variants additionally consume an injected pairwise
//! metric.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use ahash::AHashMap;
use compact_str::CompactString;
use dary_heap::OctonaryHeap;
use gramset_tokenizer::Multiset;

use crate::metric::{NormalizedLevenshtein, PairwiseMetric};

/// Default similarity threshold for the fuzzy intersection.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Shared handle to an injected pairwise metric.
pub type MetricHandle = Arc<dyn PairwiseMetric + Send + Sync>;

/// How token overlap contributes to the intersection cardinality.
#[derive(Clone, Default)]
pub enum IntersectionType {
    /// Exact token equality; counts combine via per-token minimum.
    #[default]
    Crisp,
    /// A src/tar token pair contributes fully when its similarity meets or
    /// exceeds the threshold; each occurrence is consumed at most once.
    Fuzzy {
        /// Pairwise similarity measure between tokens.
        metric: MetricHandle,
        /// Minimum similarity for a pair to count as a member.
        threshold: f64,
    },
    /// Every src/tar token pair contributes fractionally, proportional to
    /// its similarity; each occurrence is consumed at most once.
    Soft {
        /// Pairwise similarity measure between tokens.
        metric: MetricHandle,
    },
}

impl IntersectionType {
    /// Fuzzy intersection with the default metric (normalized Levenshtein)
    /// and threshold (0.8).
    pub fn fuzzy() -> Self {
        IntersectionType::Fuzzy {
            metric: Arc::new(NormalizedLevenshtein::new()),
            threshold: DEFAULT_FUZZY_THRESHOLD,
        }
    }

    /// Soft intersection with the default metric (normalized Levenshtein).
    pub fn soft() -> Self {
        IntersectionType::Soft {
            metric: Arc::new(NormalizedLevenshtein::new()),
        }
    }

    /// Compute the intersection cardinality of two multisets under this
    /// semantic.
    pub fn intersection_card(&self, src: &Multiset, tar: &Multiset) -> f64 {
        match self {
            IntersectionType::Crisp => crisp_intersection_card(src, tar),
            IntersectionType::Fuzzy { metric, threshold } => {
                greedy_overlap(src, tar, metric.as_ref(), *threshold, false)
            }
            IntersectionType::Soft { metric } => {
                greedy_overlap(src, tar, metric.as_ref(), f64::MIN_POSITIVE, true)
            }
        }
    }
}

impl fmt::Debug for IntersectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntersectionType::Crisp => write!(f, "IntersectionType::Crisp"),
            IntersectionType::Fuzzy { threshold, .. } => f
                .debug_struct("IntersectionType::Fuzzy")
                .field("threshold", threshold)
                .finish_non_exhaustive(),
            IntersectionType::Soft { .. } => {
                f.debug_struct("IntersectionType::Soft").finish_non_exhaustive()
            }
        }
    }
}

/// Crisp intersection: sum over tokens of `min(src count, tar count)`.
pub fn crisp_intersection_card(src: &Multiset, tar: &Multiset) -> f64 {
    src.intersection(tar).total()
}

/// Candidate src/tar token pairing, ordered so the heap pops the most
/// similar pair first; ties break toward the lexicographically smallest
/// `(src, tar)` pair, which keeps the greedy matching deterministic.
struct Candidate {
    similarity: f64,
    src: CompactString,
    tar: CompactString,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.similarity
            .total_cmp(&other.similarity)
            .then_with(|| other.src.cmp(&self.src))
            .then_with(|| other.tar.cmp(&self.tar))
    }
}

/// Greedy maximum-overlap matching between two multisets.
///
/// Pairs at or above `min_similarity` are matched in descending similarity
/// order; each match consumes `min(remaining src count, remaining tar
/// count)` from both sides. Crediting is the consumed amount as-is for the
/// fuzzy semantic, or weighted by the pair's similarity for the soft
/// semantic. The aggregate never exceeds `min(|src|, |tar|)`.
fn greedy_overlap(
    src: &Multiset,
    tar: &Multiset,
    metric: &dyn PairwiseMetric,
    min_similarity: f64,
    weighted: bool,
) -> f64 {
    let src_sorted = src.sorted_tokens();
    let tar_sorted = tar.sorted_tokens();

    let mut heap = OctonaryHeap::with_capacity(src_sorted.len() * tar_sorted.len());
    for src_token in &src_sorted {
        for tar_token in &tar_sorted {
            let similarity = metric.similarity(src_token, tar_token).clamp(0.0, 1.0);
            if similarity >= min_similarity {
                heap.push(Candidate {
                    similarity,
                    src: src_token.clone(),
                    tar: tar_token.clone(),
                });
            }
        }
    }

    let mut remaining_src: AHashMap<CompactString, f64> =
        src.iter().map(|(token, count)| (token.clone(), count)).collect();
    let mut remaining_tar: AHashMap<CompactString, f64> =
        tar.iter().map(|(token, count)| (token.clone(), count)).collect();

    let mut overlap = 0.0;
    while let Some(candidate) = heap.pop() {
        let available_src = remaining_src.get(&candidate.src).copied().unwrap_or(0.0);
        let available_tar = remaining_tar.get(&candidate.tar).copied().unwrap_or(0.0);
        let consumed = available_src.min(available_tar);
        if consumed <= 0.0 {
            continue;
        }

        remaining_src.insert(candidate.src, available_src - consumed);
        remaining_tar.insert(candidate.tar, available_tar - consumed);
        overlap += if weighted {
            consumed * candidate.similarity
        } else {
            consumed
        };
    }

    overlap.min(src.total().min(tar.total()))
}
