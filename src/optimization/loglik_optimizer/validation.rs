//! Shape and finiteness checks shared by the optimizer, its configuration
//! types, and the model layers.
//!
//! Every check returns the first offending index so error messages point at
//! a single coordinate.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{Grad, Theta, types::Hessian},
};

/// Gradient-norm tolerance: finite and `> 0` when present.
pub fn verify_tol_grad(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolGrad { tol, reason }),
        None => Ok(()),
    }
}

/// Cost-change tolerance: finite and `> 0` when present.
pub fn verify_tol_cost(tol: Option<f64>) -> OptResult<()> {
    match tol.and_then(|t| tolerance_problem(t).map(|reason| (t, reason))) {
        Some((tol, reason)) => Err(OptError::InvalidTolCost { tol, reason }),
        None => Ok(()),
    }
}

fn tolerance_problem(tol: f64) -> Option<&'static str> {
    if !tol.is_finite() {
        Some("Tolerance must be finite.")
    } else if tol <= 0.0 {
        Some("Tolerance must be positive.")
    } else {
        None
    }
}

/// Unconstrained parameter vector of length `dim` with finite entries.
pub fn validate_theta(theta: &Theta, dim: usize) -> OptResult<()> {
    if theta.len() != dim {
        return Err(OptError::ThetaLengthMismatch { expected: dim, actual: theta.len() });
    }
    match first_non_finite(theta.iter()) {
        Some((index, value)) => Err(OptError::InvalidThetaInput { index, value }),
        None => Ok(()),
    }
}

pub fn validate_grad(grad: &Grad, dim: usize) -> OptResult<()> {
    if grad.len() != dim {
        return Err(OptError::GradientDimMismatch { expected: dim, found: grad.len() });
    }
    match first_non_finite(grad.iter()) {
        Some((index, value)) => Err(OptError::InvalidGradient {
            index,
            value,
            reason: "Gradient elements must be finite.",
        }),
        None => Ok(()),
    }
}

/// The solver's best parameters: present and finite.
pub fn validate_theta_hat(theta_hat: Option<Theta>) -> OptResult<Theta> {
    let theta_hat = theta_hat.ok_or(OptError::MissingThetaHat)?;
    if let Some((index, value)) = first_non_finite(theta_hat.iter()) {
        return Err(OptError::InvalidThetaHat {
            index,
            value,
            reason: "Parameter estimates must be finite.",
        });
    }
    Ok(theta_hat)
}

pub fn validate_value(value: f64) -> OptResult<()> {
    if !value.is_finite() {
        return Err(OptError::NonFiniteCost { value });
    }
    Ok(())
}

/// Square `dim × dim` with finite entries.
pub fn validate_hessian(hessian: &Hessian, dim: usize) -> OptResult<()> {
    if hessian.nrows() != dim || hessian.ncols() != dim {
        return Err(OptError::HessianDimMismatch {
            expected: dim,
            found: (hessian.nrows(), hessian.ncols()),
        });
    }
    match hessian.indexed_iter().find(|(_, v)| !v.is_finite()) {
        Some(((row, col), &value)) => Err(OptError::InvalidHessian { row, col, value }),
        None => Ok(()),
    }
}

fn first_non_finite<'a>(values: impl Iterator<Item = &'a f64>) -> Option<(usize, f64)> {
    values.enumerate().find(|(_, v)| !v.is_finite()).map(|(i, &v)| (i, v))
}
