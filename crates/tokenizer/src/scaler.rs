//! Per-count scaling applied after a multiset is counted.

use std::fmt;
use std::sync::Arc;

/// Scaling applied to each token count after counting.
#[derive(Clone, Default)]
pub enum CountScaler {
    /// Counts are left as-is.
    #[default]
    Identity,
    /// Every positive count is clamped to 1 ("set" semantics).
    Set,
    /// An arbitrary numeric transform applied to each count.
    ///
    /// Useful transforms include `f64::sqrt`, `f64::ln_1p`, and `f64::exp`.
    Custom(Arc<dyn Fn(f64) -> f64 + Send + Sync>),
}

impl CountScaler {
    /// Create a custom scaler from a function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        CountScaler::Custom(Arc::new(f))
    }

    /// Apply the scaler to a single count.
    pub fn scale(&self, count: f64) -> f64 {
        match self {
            CountScaler::Identity => count,
            CountScaler::Set => {
                if count > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            CountScaler::Custom(f) => f(count),
        }
    }
}

impl fmt::Debug for CountScaler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountScaler::Identity => write!(f, "CountScaler::Identity"),
            CountScaler::Set => write!(f, "CountScaler::Set"),
            CountScaler::Custom(_) => write!(f, "CountScaler::Custom(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_passes_through() {
        assert_eq!(CountScaler::Identity.scale(3.0), 3.0);
    }

    #[test]
    fn test_set_clamps_positive_counts() {
        assert_eq!(CountScaler::Set.scale(5.0), 1.0);
        assert_eq!(CountScaler::Set.scale(0.0), 0.0);
    }

    #[test]
    fn test_custom_applies_function() {
        let sqrt = CountScaler::custom(f64::sqrt);
        assert_eq!(sqrt.scale(4.0), 2.0);
    }
}
