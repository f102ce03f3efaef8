//! Entry point: maximize a [`LogLikelihood`] with L-BFGS.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        OptimOutcome, Theta,
        adapter::ArgMinAdapter,
        builders::{build_optimizer_hager_zhang, build_optimizer_more_thuente},
        run::run_lbfgs,
        traits::{LineSearcher, LogLikelihood, MLEOptions},
    },
};

/// Maximize `ℓ(θ)` from `theta0`.
///
/// `f.check` runs once on `theta0`; the solver then minimizes `−ℓ` with the
/// line search named in `opts`.
///
/// # Errors
/// - Anything `f.check` rejects.
/// - Model errors raised at `theta0`, returned unchanged.
/// - argmin failures, mapped to the matching `OptError` variant.
///
/// A model error at a later trial point is not an `Err`: L-BFGS stops,
/// the outcome keeps the best θ so far, and `converged` is `false`.
///
/// # Example
/// ```no_run
/// use ndarray::array;
/// use outbreak_models::optimization::{
///     errors::OptResult,
///     loglik_optimizer::{LogLikelihood, MLEOptions, Theta, maximize},
/// };
///
/// struct Bowl;
/// impl LogLikelihood for Bowl {
///     type Data = ();
///     fn value(&self, theta: &Theta, _: &()) -> OptResult<f64> {
///         Ok(-theta.dot(theta))
///     }
///     fn check(&self, _: &Theta, _: &()) -> OptResult<()> {
///         Ok(())
///     }
/// }
///
/// let out = maximize(&Bowl, array![0.4, -1.2], &(), &MLEOptions::default())?;
/// assert!(out.theta_hat.iter().all(|t| t.abs() < 1e-3));
/// # Ok::<(), outbreak_models::optimization::errors::OptError>(())
/// ```
pub fn maximize<F: LogLikelihood>(
    f: &F, theta0: Theta, data: &F::Data, opts: &MLEOptions,
) -> OptResult<OptimOutcome> {
    f.check(&theta0, data)?;
    let problem = ArgMinAdapter::new(f, data);
    match opts.line_searcher {
        LineSearcher::MoreThuente => {
            run_lbfgs(theta0, opts, problem, build_optimizer_more_thuente(opts)?)
        }
        LineSearcher::HagerZhang => {
            run_lbfgs(theta0, opts, problem, build_optimizer_hager_zhang(opts)?)
        }
    }
}
