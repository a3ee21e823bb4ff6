//! Generalized Fleiss similarity, parameterized by a mean function and a
//! choice of marginal products.

use gramset_tokenizer::Result;

use crate::engine::TokenDistance;
use crate::means::MeanFn;
use crate::measures::{degenerate_guard, Similarity};

/// Which pair of marginal products feeds the mean-function denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Marginals {
    /// `(a+b)(c+d)` and `(a+c)(c+d)`.
    #[default]
    A,
    /// `(a+b)(a+c)` and `(c+d)(b+d)`.
    B,
    /// `(a+b)(b+d)` and `(a+c)(c+d)`.
    C,
}

/// Generalized Fleiss similarity.
///
/// ```text
/// sim = (ad − bc) / mean(marginal products)
/// ```
///
/// The mean is any [`MeanFn`]; with the arithmetic mean and marginals
/// variant `A` this coincides with Maxwell & Pilliner, with the geometric
/// mean Pearson's phi, and with the harmonic mean Fleiss.
///
/// In `proportional` mode every cardinality is divided by the population
/// size before the formula is evaluated; the engine itself always reports
/// raw counts.
#[derive(Debug, Clone)]
pub struct GeneralizedFleiss {
    engine: TokenDistance,
    mean_fn: MeanFn,
    marginals: Marginals,
    proportional: bool,
}

impl Default for GeneralizedFleiss {
    fn default() -> Self {
        Self::new()
    }
}

impl GeneralizedFleiss {
    /// Create a Generalized Fleiss measure with the arithmetic mean and
    /// marginals variant `A`.
    pub fn new() -> Self {
        Self {
            engine: TokenDistance::new(),
            mean_fn: MeanFn::Arithmetic,
            marginals: Marginals::A,
            proportional: false,
        }
    }

    /// Replace the underlying cardinality engine.
    pub fn with_engine(mut self, engine: TokenDistance) -> Self {
        self.engine = engine;
        self
    }

    /// Set the mean function combining the marginal products.
    pub fn mean_fn(mut self, mean_fn: MeanFn) -> Self {
        self.mean_fn = mean_fn;
        self
    }

    /// Set the marginal-products variant.
    pub fn marginals(mut self, marginals: Marginals) -> Self {
        self.marginals = marginals;
        self
    }

    /// Divide all cardinalities by the population size before evaluating.
    pub fn proportional(mut self, proportional: bool) -> Self {
        self.proportional = proportional;
        self
    }
}

impl Similarity for GeneralizedFleiss {
    fn sim(&mut self, src: &str, tar: &str) -> Result<f64> {
        self.engine.tokenize(src, tar);

        if let Some(identity) =
            degenerate_guard(self.engine.src_card()?, self.engine.tar_card()?)
        {
            return Ok(identity);
        }

        let mut a = self.engine.intersection_card()?;
        let mut b = self.engine.src_only_card()?;
        let mut c = self.engine.tar_only_card()?;
        let mut d = self.engine.total_complement_card()?;

        if self.proportional {
            let n = self.engine.population_card()?;
            if n == 0.0 {
                return Ok(0.0);
            }
            a /= n;
            b /= n;
            c /= n;
            d /= n;
        }

        let products = match self.marginals {
            Marginals::A => [(a + b) * (c + d), (a + c) * (c + d)],
            Marginals::B => [(a + b) * (a + c), (c + d) * (b + d)],
            Marginals::C => [(a + b) * (b + d), (a + c) * (c + d)],
        };

        let mean = self.mean_fn.apply(&products)?;
        if mean == 0.0 {
            return Ok(0.0);
        }
        Ok((a * d - b * c) / mean)
    }
}
