//! Negative-binomial observation model for incidence counts.
//!
//! Counts `y_k` are modeled as NB with mean `m_k` and dispersion `phi`,
//! so `Var(y_k) = m_k + m_k² / phi`. As `phi → ∞` the model approaches
//! Poisson.
use crate::compartmental::errors::{CompartmentError, CompartmentResult};
use ndarray::ArrayView1;
use statrs::function::gamma::ln_gamma;

/// Negative-binomial count model parameterized by mean and dispersion.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NegBinomialObs {
    pub phi: f64,
}

impl NegBinomialObs {
    pub fn new(phi: f64) -> CompartmentResult<Self> {
        if !phi.is_finite() || phi <= 0.0 {
            return Err(CompartmentError::InvalidDispersion { value: phi });
        }
        Ok(NegBinomialObs { phi })
    }

    /// Log-pmf of count `y` at mean `mean`.
    ///
    /// `lnΓ(y+φ) − lnΓ(φ) − lnΓ(y+1) + φ·ln(φ/(φ+m)) + y·ln(m/(φ+m))`
    ///
    /// Evaluated in the (mean, φ) form. The (r, p) form of
    /// `statrs::distribution::NegativeBinomial` needs `ln(1 − p)` with
    /// `p = φ/(φ+m)`, which rounds to `ln 0` once `m` is floored far
    /// below `φ`.
    ///
    /// Inputs are assumed validated; see [`loglik`](Self::loglik).
    pub fn log_pmf(&self, y: f64, mean: f64) -> f64 {
        let phi = self.phi;
        ln_gamma(y + phi) - ln_gamma(phi) - ln_gamma(y + 1.0) - phi * (mean / phi).ln_1p()
            + y * (mean / (phi + mean)).ln()
    }

    /// Sum of log-pmfs over paired observed and expected counts.
    ///
    /// Errors
    /// ------
    /// - `LengthMismatch` when the series differ in length.
    /// - `InvalidCount` for a negative, fractional, or non-finite count.
    /// - `NonPositiveMean` for an expected count that is `≤ 0` or non-finite.
    pub fn loglik(&self, counts: ArrayView1<f64>, means: ArrayView1<f64>) -> CompartmentResult<f64> {
        if counts.len() != means.len() {
            return Err(CompartmentError::LengthMismatch {
                counts: counts.len(),
                means: means.len(),
            });
        }
        counts.iter().zip(means.iter()).enumerate().try_fold(0.0, |acc, (index, (&y, &m))| {
            validate_count(index, y)?;
            if !m.is_finite() || m <= 0.0 {
                return Err(CompartmentError::NonPositiveMean { index, value: m });
            }
            Ok(acc + self.log_pmf(y, m))
        })
    }
}

pub(crate) fn validate_count(index: usize, value: f64) -> CompartmentResult<()> {
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 {
        return Err(CompartmentError::InvalidCount { index, value });
    }
    Ok(())
}
