//! Hawkes model: θ-space log-likelihood, analytic gradient, and fitting.
//!
//! This module wires the exponential-kernel evaluators in
//! [`crate::hawkes::core`] to the `LogLikelihood` trait so the shared
//! L-BFGS optimizer can estimate `(mu, alpha, delta)`.
//!
//! Key ideas:
//! - Parameters live in unconstrained space: `mu = softplus(θ₀)`,
//!   `alpha = softplus(θ₁)`, `delta = softplus(θ₂)`, each floored at
//!   `PARAM_FLOOR` so a long line-search step cannot zero the intensity.
//! - The gradient is the model-space gradient from one recursive sweep,
//!   multiplied elementwise by the derivative of the floored softplus.
//! - Standard errors come from the finite-difference Hessian of the θ-space
//!   gradient and are mapped back with the delta method.
use crate::{
    hawkes::{
        core::{
            data::HawkesData,
            loglik::{loglik, loglik_and_grad},
            options::HawkesOptions,
            params::{HawkesParams, N_PARAMS},
        },
        errors::HawkesError,
    },
    inference::hessian::{calc_standard_errors, delta_method_se},
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{
            Grad, LogLikelihood, OptimOutcome, Theta, maximize, validation::validate_theta,
        },
    },
};
use ndarray::Array1;

/// Univariate exponential-kernel Hawkes model fitted by maximum likelihood.
///
/// After [`fit`](Self::fit), `results` holds the optimizer outcome and
/// `fitted_params` the model-space estimate.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HawkesModel {
    pub options: HawkesOptions,
    pub results: Option<OptimOutcome>,
    pub fitted_params: Option<HawkesParams>,
}

impl HawkesModel {
    pub fn new(options: HawkesOptions) -> HawkesModel {
        HawkesModel { options, results: None, fitted_params: None }
    }

    /// Starting point for [`fit`](Self::fit): `mu = N / max_t`,
    /// `alpha = 0.5`, `delta = 1.0`.
    ///
    /// With no events (or a non-positive horizon) `mu` starts at `1.0`.
    pub fn default_theta0(data: &HawkesData) -> OptResult<Theta> {
        let mu0 = data.empirical_rate().filter(|r| *r > 0.0).unwrap_or(1.0);
        Ok(HawkesParams::new(mu0, 0.5, 1.0)?.to_theta()?)
    }

    /// Fit by maximum likelihood from `theta0` and cache the results.
    ///
    /// ## Steps
    /// 1. Validate `theta0` through [`LogLikelihood::check`].
    /// 2. Run L-BFGS per `options.mle_opts` with the analytic gradient.
    /// 3. Store the outcome in `self.results` and the softplus image of
    ///    `theta_hat` in `self.fitted_params`.
    pub fn fit(&mut self, theta0: Theta, data: &HawkesData) -> OptResult<()> {
        let outcome = maximize(self, theta0, data, &self.options.mle_opts)?;
        let params = HawkesParams::from_theta(outcome.theta_hat.view())?;
        self.results = Some(outcome);
        self.fitted_params = Some(params);
        Ok(())
    }

    /// Fitted model-space parameters.
    pub fn params(&self) -> OptResult<&HawkesParams> {
        self.fitted_params.as_ref().ok_or(OptError::ModelNotFitted)
    }

    /// Classical standard errors of `(mu, alpha, delta)` at the fit.
    ///
    /// θ-space SEs from the observed information are scaled by
    /// `logistic(θ̂)`.
    ///
    /// ## Errors
    /// - `ModelNotFitted` before [`fit`](Self::fit).
    /// - Hessian validation errors when the gradient cannot be evaluated
    ///   around `θ̂`.
    pub fn standard_errors(&self, data: &HawkesData) -> OptResult<Array1<f64>> {
        let theta_hat = &self.results.as_ref().ok_or(OptError::ModelNotFitted)?.theta_hat;
        let neg_grad = |theta: &Theta| -> Grad {
            match self.grad(theta, data) {
                Ok(g) => -g,
                Err(_) => Array1::from_elem(theta.len(), f64::NAN),
            }
        };
        let se_theta = calc_standard_errors(&neg_grad, theta_hat)?;
        Ok(delta_method_se(&se_theta, &HawkesParams::theta_jacobian_diag(theta_hat.view())))
    }
}

impl LogLikelihood for HawkesModel {
    type Data = HawkesData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<f64> {
        let params = HawkesParams::from_theta(theta.view())?;
        Ok(loglik(&params, data)?)
    }

    /// Rejects θ of the wrong length or with non-finite entries, and a
    /// non-positive horizon.
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta, N_PARAMS)?;
        if data.max_t <= 0.0 {
            return Err(HawkesError::InvalidHorizon { value: data.max_t }.into());
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &Self::Data) -> OptResult<Grad> {
        let params = HawkesParams::from_theta(theta.view())?;
        let (_, grad) = loglik_and_grad(&params, data)?;
        Ok(grad * HawkesParams::theta_jacobian_diag(theta.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hawkes::core::{options::SimOptions, simulate::simulate};
    use crate::optimization::loglik_optimizer::{LineSearcher, MLEOptions, Tolerances};
    use approx::assert_relative_eq;
    use finitediff::FiniteDiff;
    use ndarray::array;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - θ-space value and analytic gradient vs. finite differences.
    // - `check` validation.
    // - Parameter recovery and standard errors on simulated data.
    //
    // They intentionally DO NOT cover:
    // - Model-space evaluators (see `core::loglik`).
    // -------------------------------------------------------------------------

    fn fit_options() -> HawkesOptions {
        let tols = Tolerances::new(Some(1e-4), Some(1e-10), Some(300)).unwrap();
        HawkesOptions::new(MLEOptions { tols, ..MLEOptions::default() })
    }

    #[test]
    // Purpose
    // -------
    // The θ-space value equals the model-space log-likelihood at
    // `softplus(θ)`.
    fn value_matches_model_space_loglik() {
        let data = HawkesData::from_vec(vec![1.0, 2.0, 5.0], 6.0).unwrap();
        let theta = HawkesParams::new(0.5, 0.4, 0.5).unwrap().to_theta().unwrap();
        let model = HawkesModel::default();
        assert_relative_eq!(
            model.value(&theta, &data).unwrap(),
            -6.172577798044169,
            max_relative = 1e-10
        );
    }

    #[test]
    // Purpose
    // -------
    // Chain-rule gradient agrees with central differences of `value`.
    //
    // Given
    // -----
    // - Events [1, 2, 5] on [0, 6] and an arbitrary θ.
    //
    // Expect
    // ------
    // - Agreement to 1e-6 in every coordinate.
    fn theta_gradient_matches_finite_differences() {
        // Arrange
        let data = HawkesData::from_vec(vec![1.0, 2.0, 5.0], 6.0).unwrap();
        let model = HawkesModel::default();
        let theta = array![-0.3, 0.2, 0.7];

        // Act
        let analytic = model.grad(&theta, &data).unwrap();
        let numeric = theta.central_diff(&|t: &Array1<f64>| model.value(t, &data).unwrap());

        // Assert
        for (a, n) in analytic.iter().zip(numeric.iter()) {
            assert_relative_eq!(*a, *n, epsilon = 1e-6);
        }
    }

    #[test]
    fn check_rejects_bad_theta_and_horizon() {
        let model = HawkesModel::default();
        let data = HawkesData::from_vec(vec![1.0], 2.0).unwrap();
        assert_eq!(
            model.check(&array![0.0, 0.0], &data).unwrap_err(),
            OptError::ThetaLengthMismatch { expected: 3, actual: 2 }
        );
        assert!(matches!(
            model.check(&array![0.0, f64::NAN, 0.0], &data).unwrap_err(),
            OptError::InvalidThetaInput { index: 1, .. }
        ));
        assert!(model.check(&array![0.0, f64::INFINITY, 0.0], &data).is_err());
        let zero_horizon = HawkesData::from_vec(vec![], 0.0).unwrap();
        assert!(model.check(&array![0.0, 0.0, 0.0], &zero_horizon).is_err());
    }

    #[test]
    fn accessors_require_fit() {
        let model = HawkesModel::default();
        let data = HawkesData::from_vec(vec![1.0], 2.0).unwrap();
        assert_eq!(model.params().unwrap_err(), OptError::ModelNotFitted);
        assert_eq!(model.standard_errors(&data).unwrap_err(), OptError::ModelNotFitted);
    }

    #[test]
    // Purpose
    // -------
    // Maximum likelihood on a simulated path recovers the generating
    // parameters, and SEs are finite and positive.
    //
    // Given
    // -----
    // - mu = 0.5, alpha = 0.8, delta = 1.6 (branching ratio 0.5), T = 2000.
    //
    // Expect
    // ------
    // - |mu_hat − 0.5| < 0.15 and |n_hat − 0.5| < 0.15.
    // - The fit improves on the default starting point.
    // - Every SE is finite, positive, and below 1.
    fn fit_recovers_simulated_parameters() {
        // Arrange
        let truth = HawkesParams::new(0.5, 0.8, 1.6).unwrap();
        let data = simulate(&truth, 2000.0, &SimOptions::new(11)).unwrap();
        let mut model = HawkesModel::new(fit_options());
        let theta0 = HawkesModel::default_theta0(&data).unwrap();
        let ll0 = model.value(&theta0, &data).unwrap();

        // Act
        model.fit(theta0, &data).unwrap();
        let se = model.standard_errors(&data).unwrap();

        // Assert
        let fitted = model.params().unwrap();
        assert!((fitted.mu - 0.5).abs() < 0.15, "mu_hat = {}", fitted.mu);
        assert!(
            (fitted.branching_ratio() - 0.5).abs() < 0.15,
            "n_hat = {}",
            fitted.branching_ratio()
        );
        assert!(model.results.as_ref().unwrap().value >= ll0);
        assert_eq!(se.len(), 3);
        assert!(se.iter().all(|s| s.is_finite() && *s > 0.0 && *s < 1.0), "se = {se}");
    }

    #[test]
    // Purpose
    // -------
    // θ far enough out that plain softplus underflows to 0 still evaluates:
    // value and gradient are finite, so a long trial step is rejected by the
    // line search rather than ending the run.
    fn far_negative_theta_evaluates() {
        let data = HawkesData::from_vec(vec![1.0, 2.0, 5.0], 6.0).unwrap();
        let model = HawkesModel::default();
        for theta in [array![-1000.0, 0.0, 0.0], array![-1000.0, -1000.0, -1000.0]] {
            let value = model.value(&theta, &data).unwrap();
            let grad = model.grad(&theta, &data).unwrap();
            assert!(value.is_finite(), "{value}");
            assert!(grad.iter().all(|g| g.is_finite()), "{grad}");
        }
    }

    #[test]
    // Purpose
    // -------
    // The Hager–Zhang line search, whose bracket starts at a step of 1e5,
    // runs to convergence from the default start instead of stopping there.
    //
    // Given
    // -----
    // - The simulated path of `fit_recovers_simulated_parameters`.
    //
    // Expect
    // ------
    // - `converged`, more than one iteration, and the same optimum as
    //   More–Thuente to 1e-6 relative.
    fn hager_zhang_fit_leaves_starting_point() {
        // Arrange
        let truth = HawkesParams::new(0.5, 0.8, 1.6).unwrap();
        let data = simulate(&truth, 2000.0, &SimOptions::new(11)).unwrap();
        let theta0 = HawkesModel::default_theta0(&data).unwrap();
        let tols = Tolerances::new(Some(1e-4), Some(1e-10), Some(300)).unwrap();
        let hz_opts = MLEOptions::new(tols, LineSearcher::HagerZhang, false, None).unwrap();
        let mut hz = HawkesModel::new(HawkesOptions::new(hz_opts));
        let mut mt = HawkesModel::new(fit_options());

        // Act
        hz.fit(theta0.clone(), &data).unwrap();
        mt.fit(theta0, &data).unwrap();

        // Assert
        let hz_out = hz.results.as_ref().unwrap();
        let mt_out = mt.results.as_ref().unwrap();
        assert!(hz_out.converged, "{}", hz_out.status);
        assert!(hz_out.iterations > 1, "iterations = {}", hz_out.iterations);
        assert_relative_eq!(hz_out.value, mt_out.value, max_relative = 1e-6);
    }
}
