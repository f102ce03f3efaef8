//! Finite-difference derivatives for models without an analytic gradient,
//! and the observed-information Hessian used by `inference`.
//!
//! `finitediff` closures must return a plain `f64`, so fallible objectives
//! are wrapped: the first error is parked in a `RefCell` and the closure
//! returns `NaN`. After the sweep the parked error, if any, wins over the
//! numeric result.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Grad, Theta,
        types::Hessian,
        validation::{validate_grad, validate_hessian},
    },
};
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// Gradient of a fallible scalar objective at `theta`.
///
/// Central differences are tried first. If an evaluation failed or the
/// result is not finite, the gradient is recomputed with forward
/// differences, whose failure is returned to the caller.
///
/// # Errors
/// - The first error raised by `func` during the forward sweep.
/// - `InvalidGradient` when the forward result still has non-finite entries.
pub fn fd_gradient<G>(theta: &Theta, func: G) -> OptResult<Grad>
where
    G: Fn(&Theta) -> OptResult<f64>,
{
    let parked: RefCell<Option<OptError>> = RefCell::new(None);
    let wrapped = |t: &Theta| -> f64 {
        match func(t) {
            Ok(v) => v,
            Err(e) => {
                parked.borrow_mut().get_or_insert(e);
                f64::NAN
            }
        }
    };

    let central = theta.central_diff(&wrapped);
    if parked.borrow().is_none() && validate_grad(&central, theta.len()).is_ok() {
        return Ok(central);
    }

    parked.replace(None);
    let forward = theta.forward_diff(&wrapped);
    if let Some(err) = parked.take() {
        return Err(err);
    }
    validate_grad(&forward, theta.len())?;
    Ok(forward)
}

/// Jacobian of a gradient map at `theta`, symmetrized.
///
/// Central first, forward on failure; only the forward validation error is
/// reported.
pub fn compute_hessian<F: Fn(&Theta) -> Grad>(f: &F, theta: &Theta) -> OptResult<Hessian> {
    let dim = theta.len();
    let mut hess = theta.central_hessian(f);
    if validate_hessian(&hess, dim).is_err() {
        hess = theta.forward_hessian(f);
        validate_hessian(&hess, dim)?;
    }
    symmetrize(&mut hess);
    Ok(hess)
}

fn symmetrize(hess: &mut Hessian) {
    for i in 0..hess.nrows() {
        for j in 0..i {
            let avg = 0.5 * (hess[[i, j]] + hess[[j, i]]);
            hess[[i, j]] = avg;
            hess[[j, i]] = avg;
        }
    }
}
