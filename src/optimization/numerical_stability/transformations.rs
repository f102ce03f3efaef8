//! Numerical stability utilities.
//!
//! Provides safe implementations of common nonlinear transforms
//! that are prone to overflow/underflow in naïve form.
//! The functions here use explicit cutoffs (`|x| > 20.0`) to keep `f64`
//! arithmetic in a well-conditioned regime.
//!
//! # Provided items
//! - [`EIGEN_EPS`]: eigenvalue floor for pseudoinverse-based covariances.
//! - [`safe_softplus(x)`]: stable version of `ln(1 + exp(x))`,
//!   mapping ℝ → (0, ∞) without overflow.
//! - [`safe_softplus_inv(x)`]: inverse of softplus, mapping
//!   (0, ∞) → ℝ without catastrophic cancellation.
//! - [`safe_logistic(x)`]: `1 / (1 + exp(-x))`, the derivative of softplus.
//! - [`positive_softplus(x)`] / [`positive_softplus_deriv(x)`]: softplus
//!   floored at [`PARAM_FLOOR`] and its matching derivative, for mapping θ
//!   to rates that must stay strictly positive at every trial point.

/// Eigenvalues at or below this magnitude are treated as zero when forming
/// pseudoinverse directions of an observed information matrix.
pub const EIGEN_EPS: f64 = 1e-10;

/// Smallest value [`positive_softplus`] returns. Keeps `1/rate` and
/// `1/rate²` terms finite in likelihood gradients.
pub const PARAM_FLOOR: f64 = 1e-10;

/// Numerically stable softplus: `softplus(x) = ln(1 + exp(x))`.
///
/// - For sufficiently large `x`, `softplus(x) ≈ x`.
/// - Otherwise, it falls back to `ln1p(exp(x))`.
pub fn safe_softplus(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp().ln_1p() }
}

/// Stable inverse of softplus on `(0, ∞)`: solves for `t` in
/// `softplus(t) = x`, returning `t = ln(exp(x) - 1)`.
///
/// - For sufficiently large `x`, `ln(exp(x) - 1) ≈ x`.
/// - Otherwise, it uses `ln(expm1(x))`.
///
/// # Parameters
/// - `x`: a positive real (the softplus output), must be finite and `> 0`.
pub fn safe_softplus_inv(x: f64) -> f64 {
    if x > 20.0 { x } else { x.exp_m1().ln() }
}

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Evaluates `exp` only on non-positive arguments so neither branch
/// overflows. This is `d softplus(x) / dx`.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// `max(softplus(x), PARAM_FLOOR)`.
pub fn positive_softplus(x: f64) -> f64 {
    safe_softplus(x).max(PARAM_FLOOR)
}

/// Derivative of [`positive_softplus`]: `σ(x)` above the floor, `0` on it.
pub fn positive_softplus_deriv(x: f64) -> f64 {
    if safe_softplus(x) > PARAM_FLOOR { safe_logistic(x) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Stable transforms agree with naïve formulas on a safe grid.
    fn transforms_match_naive_formulas() {
        for &x in &[-10.0, -1.0, 0.0, 0.5, 3.0, 15.0] {
            let naive_sp = (1.0 + f64::exp(x)).ln();
            let naive_logit = 1.0 / (1.0 + f64::exp(-x));
            assert_relative_eq!(safe_softplus(x), naive_sp, max_relative = 1e-12);
            assert_relative_eq!(safe_logistic(x), naive_logit, max_relative = 1e-12);
            assert_relative_eq!(safe_softplus_inv(safe_softplus(x)), x, epsilon = 1e-9);
        }
    }

    #[test]
    // Purpose
    // -------
    // Tails stay finite where the naïve forms overflow.
    fn tails_are_finite() {
        assert_eq!(safe_softplus(800.0), 800.0);
        assert!(safe_logistic(-800.0) >= 0.0);
        assert_relative_eq!(safe_logistic(800.0), 1.0);
    }

    #[test]
    // Purpose
    // -------
    // Far-negative inputs stop at the floor instead of underflowing to 0.
    //
    // Given
    // -----
    // - x = -800, where `safe_softplus` is exactly 0, and x = 0.
    //
    // Expect
    // ------
    // - `positive_softplus(-800) = PARAM_FLOOR` with zero derivative.
    // - Unchanged softplus and logistic values at x = 0.
    fn positive_softplus_is_floored() {
        assert_eq!(safe_softplus(-800.0), 0.0);
        assert_eq!(positive_softplus(-800.0), PARAM_FLOOR);
        assert_eq!(positive_softplus_deriv(-800.0), 0.0);
        assert_relative_eq!(positive_softplus(0.0), 2.0_f64.ln());
        assert_relative_eq!(positive_softplus_deriv(0.0), 0.5);
    }
}
