//! Public surface of the optimizer: the model trait, configuration, and the
//! normalized outcome.
//!
//! Sign convention: models return `ℓ(θ)` and `∇ℓ(θ)`; the solver minimizes
//! `c(θ) = −ℓ(θ)` and the adapter flips signs on the way in.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        Cost, FnEvalMap, Grad, Theta,
        validation::{validate_theta_hat, validate_value, verify_tol_cost, verify_tol_grad},
    },
};
use argmin::core::{TerminationReason, TerminationStatus};
use argmin_math::ArgminL2Norm;
use std::str::FromStr;

/// A log-likelihood over an unconstrained parameter vector.
///
/// Required:
/// - `value(θ, data)`: `ℓ(θ)`. Domain failures are `OptError` values. A
///   failure at the starting point is returned as that error; a failure at
///   a later trial point ends the run with `converged = false` and the
///   error text in `status`. Models should map θ so that every finite θ
///   evaluates.
/// - `check(θ, data)`: validation run once on the starting point.
///
/// Optional:
/// - `grad(θ, data)`: analytic `∇ℓ(θ)`. The default returns
///   `GradientNotImplemented`, which switches the adapter to finite
///   differences of the cost.
pub trait LogLikelihood {
    type Data: 'static;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost>;
    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()>;

    fn grad(&self, _theta: &Theta, _data: &Self::Data) -> OptResult<Grad> {
        Err(OptError::GradientNotImplemented)
    }
}

/// Line search used inside L-BFGS. Parsed case-insensitively from
/// `"MoreThuente"` / `"HagerZhang"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineSearcher {
    MoreThuente,
    HagerZhang,
}

impl FromStr for LineSearcher {
    type Err = OptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "morethuente" => Ok(LineSearcher::MoreThuente),
            "hagerzhang" => Ok(LineSearcher::HagerZhang),
            _ => Err(OptError::InvalidLineSearch {
                name: s.to_string(),
                reason: "Valid options are case insensitive 'MoreThuente' or 'HagerZhang'.",
            }),
        }
    }
}

/// Optimizer configuration.
///
/// Fields
/// ------
/// - `tols`: stopping rules.
/// - `line_searcher`: L-BFGS line search.
/// - `verbose`: with the `obs_slog` feature, log the starting point and
///   attach a terminal observer.
/// - `lbfgs_mem`: history length; `None` uses [`DEFAULT_LBFGS_MEM`](super::DEFAULT_LBFGS_MEM).
///
/// Default: `tol_grad = 1e-6`, no cost tolerance, `max_iter = 300`,
/// More–Thuente, quiet, default memory.
#[derive(Debug, Clone, PartialEq)]
pub struct MLEOptions {
    pub tols: Tolerances,
    pub line_searcher: LineSearcher,
    pub verbose: bool,
    pub lbfgs_mem: Option<usize>,
}

impl MLEOptions {
    /// Errors
    /// ------
    /// - `InvalidLBFGSMem` when `lbfgs_mem == Some(0)`.
    pub fn new(
        tols: Tolerances, line_searcher: LineSearcher, verbose: bool, lbfgs_mem: Option<usize>,
    ) -> OptResult<Self> {
        if lbfgs_mem == Some(0) {
            return Err(OptError::InvalidLBFGSMem {
                mem: 0,
                reason: "L-BFGS memory must be greater than zero.",
            });
        }
        Ok(Self { tols, line_searcher, verbose, lbfgs_mem })
    }
}

impl Default for MLEOptions {
    fn default() -> Self {
        Self {
            tols: Tolerances { tol_grad: Some(1e-6), tol_cost: None, max_iter: Some(300) },
            line_searcher: LineSearcher::MoreThuente,
            verbose: false,
            lbfgs_mem: None,
        }
    }
}

/// Stopping rules. At least one must be set.
///
/// - `tol_grad`: stop when `‖∇c‖ < tol_grad`.
/// - `tol_cost`: stop when the change in cost is below `tol_cost`.
/// - `max_iter`: iteration cap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerances {
    pub tol_grad: Option<f64>,
    pub tol_cost: Option<f64>,
    pub max_iter: Option<usize>,
}

impl Tolerances {
    /// Errors
    /// ------
    /// - `NoTolerancesProvided` when all three are `None`.
    /// - `InvalidTolGrad` / `InvalidTolCost` for non-finite or `≤ 0` values.
    /// - `InvalidMaxIter` for `max_iter == Some(0)`.
    pub fn new(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
            return Err(OptError::NoTolerancesProvided);
        }
        verify_tol_grad(tol_grad)?;
        verify_tol_cost(tol_cost)?;
        if max_iter == Some(0) {
            return Err(OptError::InvalidMaxIter {
                max_iter: 0,
                reason: "Maximum iterations must be greater than zero.",
            });
        }
        Ok(Self { tol_grad, tol_cost, max_iter })
    }

    /// Like [`Tolerances::new`], but `tol_grad` and `max_iter` fall back to
    /// the [`MLEOptions::default`] values when `None`.
    pub fn with_defaults(
        tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    ) -> OptResult<Self> {
        let defaults = MLEOptions::default().tols;
        Self::new(tol_grad.or(defaults.tol_grad), tol_cost, max_iter.or(defaults.max_iter))
    }
}

/// Result of [`maximize`](super::maximize).
///
/// - `theta_hat`: best θ found.
/// - `value`: `ℓ(θ̂)`, the log-likelihood rather than the cost.
/// - `converged` / `status`: `false` when the solver stopped without a
///   termination reason (`"Not terminated"`), exited on an error raised
///   inside an iteration (`SolverExit`), or was interrupted.
/// - `fn_evals`: argmin counters.
/// - `grad_norm`: `‖∇c(θ̂)‖` when the solver kept a gradient.
#[derive(Debug, Clone, PartialEq)]
pub struct OptimOutcome {
    pub theta_hat: Theta,
    pub value: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub fn_evals: FnEvalMap,
    pub grad_norm: Option<f64>,
}

impl OptimOutcome {
    /// Normalize raw solver state; `theta_hat` must be present and finite,
    /// `value` finite.
    pub fn new(
        theta_hat: Option<Theta>, value: f64, termination: TerminationStatus, iterations: u64,
        fn_evals: FnEvalMap, grad: Option<Grad>,
    ) -> OptResult<Self> {
        let theta_hat = validate_theta_hat(theta_hat)?;
        validate_value(value)?;
        let (converged, status) = match termination {
            TerminationStatus::NotTerminated => (false, "Not terminated".to_string()),
            TerminationStatus::Terminated(reason) => {
                let ok = !matches!(
                    reason,
                    TerminationReason::SolverExit(_) | TerminationReason::Interrupt
                );
                (ok, format!("{reason:?}"))
            }
        };
        Ok(Self {
            theta_hat,
            value,
            converged,
            status,
            iterations: iterations as usize,
            fn_evals,
            grad_norm: grad.map(|g| g.l2_norm()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use argmin::core::TerminationReason;
    use ndarray::array;

    #[test]
    fn line_searcher_parses_case_insensitively() {
        assert_eq!("HAGERZHANG".parse::<LineSearcher>().unwrap(), LineSearcher::HagerZhang);
        assert_eq!("moreThuente".parse::<LineSearcher>().unwrap(), LineSearcher::MoreThuente);
        assert!(matches!(
            "bisection".parse::<LineSearcher>(),
            Err(OptError::InvalidLineSearch { .. })
        ));
    }

    #[test]
    // Purpose
    // -------
    // Constructors enforce at least one stopping rule and positive values.
    fn constructors_validate_configuration() {
        assert_eq!(Tolerances::new(None, None, None).unwrap_err(), OptError::NoTolerancesProvided);
        assert!(matches!(
            Tolerances::new(None, None, Some(0)),
            Err(OptError::InvalidMaxIter { max_iter: 0, .. })
        ));
        assert!(Tolerances::new(Some(-1.0), None, None).is_err());

        let tols = Tolerances::new(None, Some(1e-8), None).unwrap();
        assert!(matches!(
            MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(0)),
            Err(OptError::InvalidLBFGSMem { mem: 0, .. })
        ));
        assert_eq!(MLEOptions::default().tols.max_iter, Some(300));
    }

    #[test]
    // Purpose
    // -------
    // Outcomes record termination and the gradient norm.
    fn outcome_maps_termination_status() {
        let done = OptimOutcome::new(
            Some(array![1.0, 2.0]),
            -3.5,
            TerminationStatus::Terminated(TerminationReason::SolverConverged),
            12,
            FnEvalMap::new(),
            Some(array![3.0, 4.0]),
        )
        .unwrap();
        assert!(done.converged);
        assert_eq!(done.status, "SolverConverged");
        assert_eq!(done.grad_norm, Some(5.0));

        let open = OptimOutcome::new(
            Some(array![1.0]),
            0.0,
            TerminationStatus::NotTerminated,
            0,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(!open.converged);
        assert!(open.grad_norm.is_none());
        assert!(
            OptimOutcome::new(None, 0.0, TerminationStatus::NotTerminated, 0, FnEvalMap::new(), None)
                .is_err()
        );
    }

    #[test]
    // Purpose
    // -------
    // A run that ended on an error inside the line search is not reported
    // as converged.
    //
    // Given
    // -----
    // - `Terminated(SolverExit(..))` as argmin's L-BFGS reports it.
    //
    // Expect
    // ------
    // - `converged == false` and the exit message kept in `status`.
    fn solver_exit_is_not_convergence() {
        let reason = TerminationReason::SolverExit("Line search terminated with: 'x'".to_string());
        let out = OptimOutcome::new(
            Some(array![0.0]),
            -1.0,
            TerminationStatus::Terminated(reason),
            1,
            FnEvalMap::new(),
            None,
        )
        .unwrap();
        assert!(!out.converged);
        assert!(out.status.contains("Line search terminated"), "{}", out.status);
    }

    #[test]
    // Purpose
    // -------
    // Partially specified tolerances keep the defaults for the unset fields.
    fn with_defaults_fills_unset_fields() {
        let tols = Tolerances::with_defaults(Some(1e-3), None, None).unwrap();
        assert_eq!(tols.tol_grad, Some(1e-3));
        assert_eq!(tols.tol_cost, None);
        assert_eq!(tols.max_iter, Some(300));

        let tols = Tolerances::with_defaults(None, Some(1e-9), Some(20)).unwrap();
        assert_eq!(tols.tol_grad, Some(1e-6));
        assert_eq!(tols.tol_cost, Some(1e-9));
        assert_eq!(tols.max_iter, Some(20));

        assert!(Tolerances::with_defaults(Some(-1.0), None, None).is_err());
    }
}
