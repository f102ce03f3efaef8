//! Executor wiring shared by both L-BFGS variants.
use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        Grad, LogLikelihood, MLEOptions, OptimOutcome, Theta, adapter::ArgMinAdapter,
    },
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, IterState, Solver, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run `solver` on `problem` from `theta0` and normalize the final state.
///
/// `opts.tols.max_iter` caps the executor. With the `obs_slog` feature and
/// `opts.verbose`, the starting log-likelihood is printed and a terminal
/// observer reports every iteration.
///
/// The reported `value` is `ℓ(θ̂)`, i.e. the negated best cost.
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MLEOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<OptimOutcome>
where
    F: LogLikelihood,
    S: Solver<ArgMinAdapter<'a, F>, IterState<Theta, Grad, (), (), (), f64>> + Send + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }

    let mut executor = Executor::new(problem, solver).configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        executor = executor.add_observer(
            argmin_observer_slog::SlogLogger::term_noblock(),
            argmin::core::observers::ObserverMode::Always,
        );
    }
    if let Some(max_iter) = opts.tols.max_iter {
        executor = executor.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut state = executor.run()?.state().clone();
    let iterations = state.get_iter();
    let fn_evals = state.get_func_counts().clone();
    let termination = state.get_termination_status().clone();
    let grad = state.take_gradient();
    OptimOutcome::new(
        state.take_best_param(),
        -state.get_best_cost(),
        termination,
        iterations,
        fn_evals,
        grad,
    )
}

#[cfg(feature = "obs_slog")]
fn log_initial_state<F: LogLikelihood>(
    theta0: &Theta, problem: &ArgMinAdapter<'_, F>,
) -> OptResult<()> {
    let ll0 = -problem.cost(theta0)?;
    let grad_norm = problem.gradient(theta0).ok().map(|g| g.l2_norm());
    eprintln!(
        "start: loglik = {:.6}{}",
        ll0,
        grad_norm.map(|n| format!(", |grad| = {n:.6}")).unwrap_or_default()
    );
    Ok(())
}
