//! Hawkes parameters `(mu, alpha, delta)` and the unconstrained θ mapping.
//!
//! Purpose
//! -------
//! Hold the three scalars of an exponential-kernel Hawkes process and map
//! them to and from the unconstrained optimizer space used by
//! [`HawkesModel`](crate::hawkes::models::HawkesModel).
//!
//! Conventions
//! -----------
//! - `mu`: background intensity. Unconstrained in sign for likelihood
//!   evaluation; a negative `mu` surfaces later as
//!   `HawkesError::NonPositiveIntensity` if the intensity dips below zero.
//! - `alpha`: excitation magnitude, `alpha >= 0`.
//! - `delta`: decay rate, `delta > 0`.
//! - θ-layout is `θ = (θ_mu, θ_alpha, θ_delta)` with every coordinate mapped
//!   through `softplus` floored at `PARAM_FLOOR`, so every θ the optimizer
//!   proposes gives a strictly positive intensity.
use crate::{
    hawkes::errors::{HawkesError, HawkesResult},
    optimization::numerical_stability::transformations::{
        positive_softplus, positive_softplus_deriv, safe_softplus_inv,
    },
};
use ndarray::{Array1, ArrayView1, array};

/// Number of free parameters in θ-space.
pub const N_PARAMS: usize = 3;

/// Parameter names in θ / gradient order.
pub const PARAM_NAMES: [&str; N_PARAMS] = ["mu", "alpha", "delta"];

/// `HawkesParams` — validated model-space parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HawkesParams {
    pub mu: f64,
    pub alpha: f64,
    pub delta: f64,
}

impl HawkesParams {
    /// Construct parameters for likelihood evaluation.
    ///
    /// Errors
    /// ------
    /// - `NonFiniteParam` when any value is NaN/±inf.
    /// - `NonPositiveDecay` when `delta <= 0`.
    /// - `NegativeExcitation` when `alpha < 0`.
    pub fn new(mu: f64, alpha: f64, delta: f64) -> HawkesResult<Self> {
        let params = HawkesParams { mu, alpha, delta };
        params.validate()?;
        Ok(params)
    }

    /// Re-run the domain checks of [`HawkesParams::new`].
    ///
    /// Fields are public, so evaluators call this on every entry rather
    /// than trusting the constructor.
    pub fn validate(&self) -> HawkesResult<()> {
        for (name, value) in PARAM_NAMES.into_iter().zip([self.mu, self.alpha, self.delta]) {
            if !value.is_finite() {
                return Err(HawkesError::NonFiniteParam { name, value });
            }
        }
        if self.delta <= 0.0 {
            return Err(HawkesError::NonPositiveDecay { value: self.delta });
        }
        if self.alpha < 0.0 {
            return Err(HawkesError::NegativeExcitation { value: self.alpha });
        }
        Ok(())
    }

    /// Stricter check used by simulation: additionally requires `mu > 0`.
    pub fn validate_positive_background(&self) -> HawkesResult<()> {
        self.validate()?;
        if self.mu <= 0.0 {
            return Err(HawkesError::NonPositiveBackground { value: self.mu });
        }
        Ok(())
    }

    /// Branching ratio `alpha / delta`: expected number of direct offspring
    /// per event. Values `>= 1` mean the process is explosive.
    pub fn branching_ratio(&self) -> f64 {
        self.alpha / self.delta
    }

    /// Long-run mean intensity `mu / (1 - alpha/delta)` for a subcritical
    /// process; `None` when the branching ratio is `>= 1`.
    pub fn stationary_rate(&self) -> Option<f64> {
        let n = self.branching_ratio();
        if n < 1.0 { Some(self.mu / (1.0 - n)) } else { None }
    }

    /// Map θ to model space: every coordinate goes through `softplus`,
    /// floored at `PARAM_FLOOR`.
    pub fn from_theta(theta: ArrayView1<f64>) -> HawkesResult<Self> {
        if theta.len() != N_PARAMS {
            return Err(HawkesError::ThetaLengthMismatch {
                expected: N_PARAMS,
                actual: theta.len(),
            });
        }
        Self::new(
            positive_softplus(theta[0]),
            positive_softplus(theta[1]),
            positive_softplus(theta[2]),
        )
    }

    /// Inverse of [`HawkesParams::from_theta`]; requires strictly positive
    /// `mu`, `alpha`, and `delta`.
    pub fn to_theta(&self) -> HawkesResult<Array1<f64>> {
        self.validate_positive_background()?;
        if self.alpha <= 0.0 {
            return Err(HawkesError::NegativeExcitation { value: self.alpha });
        }
        Ok(array![
            safe_softplus_inv(self.mu),
            safe_softplus_inv(self.alpha),
            safe_softplus_inv(self.delta)
        ])
    }

    /// Diagonal Jacobian `d(mu, alpha, delta) / dθ` at `theta`.
    pub fn theta_jacobian_diag(theta: ArrayView1<f64>) -> Array1<f64> {
        theta.mapv(positive_softplus_deriv)
    }

    pub fn as_array(&self) -> Array1<f64> {
        array![self.mu, self.alpha, self.delta]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    // Purpose
    // -------
    // Domain checks: delta must be > 0, alpha >= 0, all finite; mu may be
    // negative for evaluation.
    fn new_enforces_domain() {
        assert_eq!(
            HawkesParams::new(0.5, 0.4, 0.0).unwrap_err(),
            HawkesError::NonPositiveDecay { value: 0.0 }
        );
        assert_eq!(
            HawkesParams::new(0.5, -0.1, 1.0).unwrap_err(),
            HawkesError::NegativeExcitation { value: -0.1 }
        );
        assert!(matches!(
            HawkesParams::new(f64::NAN, 0.1, 1.0).unwrap_err(),
            HawkesError::NonFiniteParam { name: "mu", .. }
        ));
        assert!(HawkesParams::new(-0.5, 0.1, 1.0).is_ok());
        assert!(HawkesParams::new(-0.5, 0.1, 1.0).unwrap().validate_positive_background().is_err());
    }

    #[test]
    // Purpose
    // -------
    // θ ↔ parameter mapping round-trips for strictly positive parameters.
    fn theta_round_trip() {
        // Arrange
        let params = HawkesParams::new(0.7, 0.3, 1.9).unwrap();

        // Act
        let theta = params.to_theta().unwrap();
        let back = HawkesParams::from_theta(theta.view()).unwrap();

        // Assert
        assert_relative_eq!(back.mu, params.mu, max_relative = 1e-12);
        assert_relative_eq!(back.alpha, params.alpha, max_relative = 1e-12);
        assert_relative_eq!(back.delta, params.delta, max_relative = 1e-12);
    }

    #[test]
    // Purpose
    // -------
    // Branching ratio and stationary rate follow the cluster representation.
    fn branching_ratio_and_stationary_rate() {
        let sub = HawkesParams::new(1.0, 0.5, 1.0).unwrap();
        assert_relative_eq!(sub.branching_ratio(), 0.5);
        assert_relative_eq!(sub.stationary_rate().unwrap(), 2.0);

        let sup = HawkesParams::new(1.0, 2.0, 1.0).unwrap();
        assert_eq!(sup.stationary_rate(), None);
    }

    #[test]
    // Purpose
    // -------
    // Wrong θ length is reported, not panicked on.
    fn from_theta_rejects_wrong_length() {
        let err = HawkesParams::from_theta(array![0.0, 1.0].view()).unwrap_err();
        assert_eq!(err, HawkesError::ThetaLengthMismatch { expected: 3, actual: 2 });
    }

    #[test]
    // Purpose
    // -------
    // A far-negative θ, as produced by a long line-search step, still maps
    // to a valid parameter set with a flat Jacobian.
    //
    // Given
    // -----
    // - θ = (−1000, −1000, 0.5).
    //
    // Expect
    // ------
    // - mu = alpha = PARAM_FLOOR, delta = softplus(0.5).
    // - Jacobian entries (0, 0, σ(0.5)).
    fn far_negative_theta_is_floored() {
        // Arrange
        use crate::optimization::numerical_stability::transformations::{
            PARAM_FLOOR, safe_logistic, safe_softplus,
        };
        let theta = array![-1000.0, -1000.0, 0.5];

        // Act
        let params = HawkesParams::from_theta(theta.view()).unwrap();
        let jac = HawkesParams::theta_jacobian_diag(theta.view());

        // Assert
        assert_eq!(params.mu, PARAM_FLOOR);
        assert_eq!(params.alpha, PARAM_FLOOR);
        assert_relative_eq!(params.delta, safe_softplus(0.5));
        assert_eq!(jac[0], 0.0);
        assert_eq!(jac[1], 0.0);
        assert_relative_eq!(jac[2], safe_logistic(0.5));
    }
}
