//! Mean functions used by measures that combine marginal products into one
//! denominator.
//!
//! The registry is a closed sum type: every named mean is a variant, and
//! arbitrary aggregators plug in through [`MeanFn::Custom`]. The engine
//! never calls these itself; only individual measures do.

use std::f64::consts::{E, PI};
use std::fmt;
use std::sync::Arc;

use gramset_tokenizer::{GramsetError, Result};

const CONVERGENCE: f64 = 1e-12;

/// A scalar aggregation function over a sequence of numbers.
#[derive(Clone, Default)]
pub enum MeanFn {
    /// Arithmetic mean.
    #[default]
    Arithmetic,
    /// Geometric mean.
    Geometric,
    /// Harmonic mean.
    Harmonic,
    /// Contraharmonic mean.
    Contraharmonic,
    /// Quadratic mean (root mean square).
    Quadratic,
    /// Heronian mean.
    Heronian,
    /// Hölder (power) mean with the given exponent.
    Hoelder(f64),
    /// Lehmer mean with the given exponent.
    Lehmer(f64),
    /// Seiffert's mean (two values).
    Seiffert,
    /// Identric mean (two values).
    Identric,
    /// Logarithmic mean (two values).
    Logarithmic,
    /// Arithmetic-geometric mean.
    ArithmeticGeometric,
    /// Geometric-harmonic mean.
    GeometricHarmonic,
    /// Arithmetic-geometric-harmonic mean.
    ArithmeticGeometricHarmonic,
    /// An arbitrary aggregation function.
    Custom(Arc<dyn Fn(&[f64]) -> f64 + Send + Sync>),
}

impl MeanFn {
    /// Look a mean function up by name.
    ///
    /// Recognized names: `arithmetic`, `geometric`, `harmonic`,
    /// `contraharmonic`, `quadratic`, `heronian`, `hoelder`, `lehmer`,
    /// `seiffert`, `identric`, `logarithmic`, `ag`, `gh`, and `agh`.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "arithmetic" => Ok(MeanFn::Arithmetic),
            "geometric" => Ok(MeanFn::Geometric),
            "harmonic" => Ok(MeanFn::Harmonic),
            "contraharmonic" => Ok(MeanFn::Contraharmonic),
            "quadratic" => Ok(MeanFn::Quadratic),
            "heronian" => Ok(MeanFn::Heronian),
            "hoelder" => Ok(MeanFn::Hoelder(2.0)),
            "lehmer" => Ok(MeanFn::Lehmer(2.0)),
            "seiffert" => Ok(MeanFn::Seiffert),
            "identric" => Ok(MeanFn::Identric),
            "logarithmic" => Ok(MeanFn::Logarithmic),
            "ag" => Ok(MeanFn::ArithmeticGeometric),
            "gh" => Ok(MeanFn::GeometricHarmonic),
            "agh" => Ok(MeanFn::ArithmeticGeometricHarmonic),
            other => Err(GramsetError::UnknownMean(other.to_string())),
        }
    }

    /// Create a custom mean from a function.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        MeanFn::Custom(Arc::new(f))
    }

    /// Apply the mean to a sequence of numbers.
    ///
    /// The two-value means (Seiffert, identric, logarithmic) require
    /// exactly two values and fail otherwise.
    pub fn apply(&self, values: &[f64]) -> Result<f64> {
        if values.is_empty() {
            return Err(GramsetError::InvalidConfig(
                "cannot take the mean of an empty sequence".to_string(),
            ));
        }
        match self {
            MeanFn::Arithmetic => Ok(amean(values)),
            MeanFn::Geometric => Ok(gmean(values)),
            MeanFn::Harmonic => Ok(hmean(values)),
            MeanFn::Contraharmonic => Ok(cmean(values)),
            MeanFn::Quadratic => Ok(qmean(values)),
            MeanFn::Heronian => Ok(heronian_mean(values)),
            MeanFn::Hoelder(exponent) => Ok(hoelder_mean(values, *exponent)),
            MeanFn::Lehmer(exponent) => Ok(lehmer_mean(values, *exponent)),
            MeanFn::Seiffert => two_value(values).map(|(x, y)| seiffert_mean(x, y)),
            MeanFn::Identric => two_value(values).map(|(x, y)| imean(x, y)),
            MeanFn::Logarithmic => two_value(values).map(|(x, y)| lmean(x, y)),
            MeanFn::ArithmeticGeometric => Ok(agmean(values)),
            MeanFn::GeometricHarmonic => Ok(ghmean(values)),
            MeanFn::ArithmeticGeometricHarmonic => Ok(aghmean(values)),
            MeanFn::Custom(f) => Ok(f(values)),
        }
    }
}

impl fmt::Debug for MeanFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeanFn::Arithmetic => write!(f, "MeanFn::Arithmetic"),
            MeanFn::Geometric => write!(f, "MeanFn::Geometric"),
            MeanFn::Harmonic => write!(f, "MeanFn::Harmonic"),
            MeanFn::Contraharmonic => write!(f, "MeanFn::Contraharmonic"),
            MeanFn::Quadratic => write!(f, "MeanFn::Quadratic"),
            MeanFn::Heronian => write!(f, "MeanFn::Heronian"),
            MeanFn::Hoelder(p) => write!(f, "MeanFn::Hoelder({p})"),
            MeanFn::Lehmer(p) => write!(f, "MeanFn::Lehmer({p})"),
            MeanFn::Seiffert => write!(f, "MeanFn::Seiffert"),
            MeanFn::Identric => write!(f, "MeanFn::Identric"),
            MeanFn::Logarithmic => write!(f, "MeanFn::Logarithmic"),
            MeanFn::ArithmeticGeometric => write!(f, "MeanFn::ArithmeticGeometric"),
            MeanFn::GeometricHarmonic => write!(f, "MeanFn::GeometricHarmonic"),
            MeanFn::ArithmeticGeometricHarmonic => {
                write!(f, "MeanFn::ArithmeticGeometricHarmonic")
            }
            MeanFn::Custom(_) => write!(f, "MeanFn::Custom(..)"),
        }
    }
}

fn two_value(values: &[f64]) -> Result<(f64, f64)> {
    match values {
        [x, y] => Ok((*x, *y)),
        _ => Err(GramsetError::InvalidConfig(format!(
            "this mean is defined for exactly 2 values, got {}",
            values.len()
        ))),
    }
}

fn amean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn gmean(values: &[f64]) -> f64 {
    values
        .iter()
        .product::<f64>()
        .powf(1.0 / values.len() as f64)
}

fn hmean(values: &[f64]) -> f64 {
    if values.iter().any(|&x| x == 0.0) {
        return 0.0;
    }
    values.len() as f64 / values.iter().map(|x| 1.0 / x).sum::<f64>()
}

fn cmean(values: &[f64]) -> f64 {
    let sum: f64 = values.iter().sum();
    if sum == 0.0 {
        return 0.0;
    }
    values.iter().map(|x| x * x).sum::<f64>() / sum
}

fn qmean(values: &[f64]) -> f64 {
    (values.iter().map(|x| x * x).sum::<f64>() / values.len() as f64).sqrt()
}

fn heronian_mean(values: &[f64]) -> f64 {
    let n = values.len();
    let mut sum = 0.0;
    for i in 0..n {
        for j in i..n {
            sum += (values[i] * values[j]).sqrt();
        }
    }
    sum / (n * (n + 1) / 2) as f64
}

fn hoelder_mean(values: &[f64], exponent: f64) -> f64 {
    if exponent == 0.0 {
        return gmean(values);
    }
    (values.iter().map(|x| x.powf(exponent)).sum::<f64>() / values.len() as f64)
        .powf(1.0 / exponent)
}

fn lehmer_mean(values: &[f64], exponent: f64) -> f64 {
    let denominator: f64 = values.iter().map(|x| x.powf(exponent - 1.0)).sum();
    if denominator == 0.0 {
        return 0.0;
    }
    values.iter().map(|x| x.powf(exponent)).sum::<f64>() / denominator
}

fn seiffert_mean(x: f64, y: f64) -> f64 {
    if x == y {
        return x;
    }
    if x == 0.0 || y == 0.0 {
        return 0.0;
    }
    (x - y) / (4.0 * (x / y).sqrt().atan() - PI)
}

fn imean(x: f64, y: f64) -> f64 {
    if x == y {
        return x;
    }
    if x <= 0.0 || y <= 0.0 {
        return 0.0;
    }
    (1.0 / E) * (x.powf(x) / y.powf(y)).powf(1.0 / (x - y))
}

fn lmean(x: f64, y: f64) -> f64 {
    if x == y {
        return x;
    }
    if x <= 0.0 || y <= 0.0 {
        return 0.0;
    }
    (x - y) / (x.ln() - y.ln())
}

fn agmean(values: &[f64]) -> f64 {
    let mut a = amean(values);
    let mut g = gmean(values);
    while (a - g).abs() > CONVERGENCE {
        let next_a = (a + g) / 2.0;
        g = (a * g).sqrt();
        a = next_a;
    }
    a
}

fn ghmean(values: &[f64]) -> f64 {
    let mut g = gmean(values);
    let mut h = hmean(values);
    if h == 0.0 {
        return 0.0;
    }
    while (g - h).abs() > CONVERGENCE {
        let next_g = (g * h).sqrt();
        h = 2.0 / (1.0 / g + 1.0 / h);
        g = next_g;
    }
    g
}

fn aghmean(values: &[f64]) -> f64 {
    let mut a = amean(values);
    let mut g = gmean(values);
    let mut h = hmean(values);
    if h == 0.0 {
        return 0.0;
    }
    while (a - h).abs() > CONVERGENCE {
        let next_a = (a + g + h) / 3.0;
        let next_g = (a * g * h).cbrt();
        h = 3.0 / (1.0 / a + 1.0 / g + 1.0 / h);
        a = next_a;
        g = next_g;
    }
    a
}
