//! L-BFGS construction from [`MLEOptions`].
//!
//! Builders apply the history length and the gradient / cost tolerances.
//! The starting point and the iteration cap belong to the executor and are
//! set in [`run_lbfgs`](super::run::run_lbfgs).
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    loglik_optimizer::{
        traits::MLEOptions,
        types::{
            Cost, DEFAULT_LBFGS_MEM, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente,
            MoreThuenteLS, Theta,
        },
    },
};

pub fn build_optimizer_hager_zhang(opts: &MLEOptions) -> OptResult<LbfgsHagerZhang> {
    configure_lbfgs(LBFGS::new(HagerZhangLS::new(), history_len(opts)), opts)
}

pub fn build_optimizer_more_thuente(opts: &MLEOptions) -> OptResult<LbfgsMoreThuente> {
    configure_lbfgs(LBFGS::new(MoreThuenteLS::new(), history_len(opts)), opts)
}

/// Attach the optional tolerances to an L-BFGS instance.
///
/// # Errors
/// argmin's own rejection of a tolerance, converted to `OptError`.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MLEOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}

fn history_len(opts: &MLEOptions) -> usize {
    opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM)
}
