//! inference::hessian — observed information, covariance, and standard
//! errors at a maximum-likelihood estimate.
//!
//! Purpose
//! -------
//! Turn the gradient of a negative log-likelihood into the observed
//! information matrix `J(θ̂)` by finite differences, and invert it through a
//! truncated symmetric eigendecomposition to obtain covariances and
//! classical standard errors in θ-space.
//!
//! Key behaviors
//! -------------
//! - [`observed_information`] differentiates the supplied gradient with
//!   [`compute_hessian`] (central, then forward differences).
//! - [`pseudo_inverse_cov`] forms `J⁺ = Σ_{λ_k > EIGEN_EPS} q_k q_kᵀ / λ_k`.
//!   Directions with non-positive or negligible curvature contribute zero
//!   variance instead of failing.
//! - [`delta_method_se`] maps θ-space SEs to model space through a diagonal
//!   Jacobian, as produced by softplus reparameterizations.
//!
//! Conventions
//! -----------
//! - The gradient passed in is for the **negative** log-likelihood on the
//!   same scale as the fitted objective (sum over events, not average).
//! - No explicit matrix inverse is formed.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{Grad, Theta, finite_diff::compute_hessian, types::Hessian},
    numerical_stability::transformations::EIGEN_EPS,
};
use nalgebra::DMatrix;
use ndarray::{Array1, Array2};

/// Observed information `J(θ̂)`: the Hessian of the negative log-likelihood.
pub fn observed_information<F: Fn(&Theta) -> Grad>(
    neg_grad: &F, theta_hat: &Theta,
) -> OptResult<Hessian> {
    compute_hessian(neg_grad, theta_hat)
}

/// Eigenvalue-truncated pseudo-inverse of a symmetric information matrix.
pub fn pseudo_inverse_cov(obs_info: &Hessian) -> Array2<f64> {
    let n = obs_info.nrows();
    let eigen = to_dmatrix(obs_info).symmetric_eigen();
    let q = &eigen.eigenvectors;
    let mut cov = Array2::<f64>::zeros((n, n));
    for (k, &lambda) in eigen.eigenvalues.iter().enumerate() {
        if lambda <= EIGEN_EPS {
            continue;
        }
        for i in 0..n {
            for j in 0..n {
                cov[[i, j]] += q[(i, k)] * q[(j, k)] / lambda;
            }
        }
    }
    cov
}

/// Classical standard errors `sqrt(diag(J⁺))` at `theta_hat`.
///
/// Errors
/// ------
/// - `HessianDimMismatch` / `InvalidHessian` when both finite-difference
///   Hessians fail validation.
pub fn calc_standard_errors<F: Fn(&Theta) -> Grad>(
    neg_grad: &F, theta_hat: &Theta,
) -> OptResult<Array1<f64>> {
    let obs_info = observed_information(neg_grad, theta_hat)?;
    Ok(pseudo_inverse_cov(&obs_info).diag().mapv(f64::sqrt))
}

/// Delta method for an elementwise reparameterization: `SE_p = |J_ii|·SE_θ`.
pub fn delta_method_se(se_theta: &Array1<f64>, jacobian_diag: &Array1<f64>) -> Array1<f64> {
    se_theta * &jacobian_diag.mapv(f64::abs)
}

fn to_dmatrix(m: &Array2<f64>) -> DMatrix<f64> {
    DMatrix::from_fn(m.nrows(), m.ncols(), |i, j| m[[i, j]])
}
