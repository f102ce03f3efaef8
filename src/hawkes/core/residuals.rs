//! Time-rescaling residuals and their Kolmogorov–Smirnov check.
//!
//! Purpose
//! -------
//! Under a correctly specified intensity, the compensator increments
//! `τ_i = Λ(t_i) − Λ(t_{i−1})` (with `t_0 = 0`) are i.i.d. Exp(1). This
//! module computes those increments and a one-sample KS test against the
//! unit exponential, the standard goodness-of-fit diagnostic for a fitted
//! Hawkes model.
//!
//! Key behaviors
//! -------------
//! - [`rescaled_times`] runs in O(N) using the same excitation recursion as
//!   the likelihood.
//! - [`KsOutcome::ks_exponential`] returns the statistic `D_n` and an
//!   asymptotic p-value from the Kolmogorov distribution with the
//!   small-sample correction `(√n + 0.12 + 0.11/√n) · D_n`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Residuals are non-negative whenever `mu ≥ 0` and `alpha ≥ 0`.
//! - The KS test needs at least one residual.
use crate::hawkes::{
    core::{data::EventSequence, params::HawkesParams},
    errors::{HawkesError, HawkesResult},
};
use ndarray::Array1;
use statrs::distribution::{ContinuousCDF, Exp};

/// Compensator increments between consecutive events.
pub fn rescaled_times(params: &HawkesParams, events: &EventSequence) -> HawkesResult<Array1<f64>> {
    params.validate()?;
    let times = events.as_slice();
    let ratio = params.alpha / params.delta;
    let mut out = Array1::<f64>::zeros(times.len());
    let mut a = 0.0;
    let mut prev_comp = 0.0;
    for (i, &t) in times.iter().enumerate() {
        if i > 0 {
            a = (-params.delta * (t - times[i - 1])).exp() * (a + 1.0);
        }
        // Λ(t_i) = mu·t_i + (alpha/delta)·Σ_{j<i}(1 − exp(−delta·(t_i − t_j)))
        let comp = params.mu * t + ratio * (i as f64 - a);
        out[i] = comp - prev_comp;
        prev_comp = comp;
    }
    Ok(out)
}

/// KsOutcome — one-sample Kolmogorov–Smirnov test against Exp(1).
///
/// Fields
/// ------
/// - `statistic`: `f64`
///   `D_n = sup_x |F_n(x) − F(x)|`.
/// - `p_value`: `f64`
///   Asymptotic upper-tail probability, in `[0, 1]`.
/// - `n`: `usize`
///   Number of residuals tested.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct KsOutcome {
    statistic: f64,
    p_value: f64,
    n: usize,
}

impl KsOutcome {
    /// Test `residuals` against the unit-rate exponential.
    ///
    /// Errors
    /// ------
    /// - `TooFewEvents` when `residuals` is empty.
    /// - `NonFiniteEvent` when a residual is NaN/±inf.
    pub fn ks_exponential(residuals: &[f64]) -> HawkesResult<Self> {
        let n = residuals.len();
        if n == 0 {
            return Err(HawkesError::TooFewEvents { needed: 1, actual: 0 });
        }
        if let Some((index, &value)) = residuals.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(HawkesError::NonFiniteEvent { index, value });
        }
        let reference = Exp::new(1.0)?;
        let mut sorted = residuals.to_vec();
        sorted.sort_by(f64::total_cmp);

        let n_f = n as f64;
        let statistic = sorted.iter().enumerate().fold(0.0_f64, |d, (i, &x)| {
            let cdf = reference.cdf(x);
            let above = (i as f64 + 1.0) / n_f - cdf;
            let below = cdf - i as f64 / n_f;
            d.max(above).max(below)
        });

        let sqrt_n = n_f.sqrt();
        let lambda = (sqrt_n + 0.12 + 0.11 / sqrt_n) * statistic;
        Ok(KsOutcome { statistic, p_value: kolmogorov_q(lambda), n })
    }

    pub fn statistic(&self) -> f64 {
        self.statistic
    }

    pub fn p_value(&self) -> f64 {
        self.p_value
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

// ---- Helper methods ----

/// Kolmogorov survival function `Q(λ) = 2 Σ_{k≥1} (−1)^{k−1} exp(−2k²λ²)`.
fn kolmogorov_q(lambda: f64) -> f64 {
    // The alternating series converges too slowly near zero, where Q ≈ 1.
    if lambda < 0.2 {
        return 1.0;
    }
    let a2 = -2.0 * lambda * lambda;
    let mut sum = 0.0;
    let mut sign = 1.0;
    for k in 1..=100 {
        let kf = k as f64;
        let term = sign * (a2 * kf * kf).exp();
        sum += term;
        if term.abs() < 1e-16 * sum.abs().max(1e-300) {
            break;
        }
        sign = -sign;
    }
    (2.0 * sum).clamp(0.0, 1.0)
}
