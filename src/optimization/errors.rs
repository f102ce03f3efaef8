//! Errors raised by the log-likelihood optimizer and the model layers that
//! feed it.
//!
//! [`OptError`] is the single error surface of the optimizer. Model errors
//! ([`HawkesError`], [`CompartmentError`]) convert into it with `?`, and
//! `argmin` errors are unpacked back into the matching variant on the way
//! out of the solver.
#[cfg(feature = "python-bindings")]
use pyo3::{PyErr, exceptions::PyValueError};

use argmin::core::{ArgminError, Error};

use crate::{compartmental::errors::CompartmentError, hawkes::errors::HawkesError};

/// Crate-wide result alias for optimizer operations.
pub type OptResult<T> = Result<T, OptError>;

#[derive(Debug, Clone, PartialEq)]
pub enum OptError {
    // ---- Gradient ----
    /// Signals that finite differences should be used.
    GradientNotImplemented,

    GradientDimMismatch {
        expected: usize,
        found: usize,
    },

    InvalidGradient {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    // ---- MLEOptions ----
    InvalidTolGrad {
        tol: f64,
        reason: &'static str,
    },
    InvalidTolCost {
        tol: f64,
        reason: &'static str,
    },
    InvalidMaxIter {
        max_iter: usize,
        reason: &'static str,
    },
    NoTolerancesProvided,

    InvalidLineSearch {
        name: String,
        reason: &'static str,
    },

    InvalidLBFGSMem {
        mem: usize,
        reason: &'static str,
    },

    // ---- Cost function ----
    NonFiniteCost {
        value: f64,
    },

    // ---- Optimizer outcome ----
    InvalidThetaHat {
        index: usize,
        value: f64,
        reason: &'static str,
    },

    MissingThetaHat,

    // ---- Argmin ----
    InvalidParameter {
        text: String,
    },
    NotImplemented {
        text: String,
    },
    NotInitialized {
        text: String,
    },
    ConditionViolated {
        text: String,
    },
    CheckPointNotFound {
        text: String,
    },
    PotentialBug {
        text: String,
    },
    ImpossibleError {
        text: String,
    },
    BackendError {
        text: String,
    },

    // ---- Finite Diffs ----
    HessianDimMismatch {
        expected: usize,
        found: (usize, usize),
    },

    InvalidHessian {
        row: usize,
        col: usize,
        value: f64,
    },

    // ---- Model parameters ----
    ThetaLengthMismatch {
        expected: usize,
        actual: usize,
    },

    InvalidThetaInput {
        index: usize,
        value: f64,
    },

    /// A model-space parameter left its domain (e.g. `delta ≤ 0`).
    InvalidModelParam {
        name: &'static str,
        value: f64,
    },

    // ---- Likelihood evaluation ----
    /// Intensity at an event was `≤ 0`.
    NonPositiveIntensity {
        index: usize,
        value: f64,
    },

    /// Data rejected by the model layer; the text carries the model's message.
    InvalidModelData {
        text: String,
    },

    ModelNotFitted,

    // ---- Fallback ----
    UnknownError,
}

impl std::error::Error for OptError {}

impl std::fmt::Display for OptError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Gradient ----
            OptError::GradientNotImplemented => {
                write!(f, "Model provides no analytic gradient")
            }
            OptError::GradientDimMismatch { expected, found } => {
                write!(f, "Gradient has length {found}, expected {expected}")
            }
            OptError::InvalidGradient { index, value, reason } => {
                write!(f, "Gradient entry {index} = {value}: {reason}")
            }

            // ---- MLEOptions ----
            OptError::InvalidTolGrad { tol, reason } => {
                write!(f, "tol_grad = {tol}: {reason}")
            }
            OptError::InvalidTolCost { tol, reason } => {
                write!(f, "tol_cost = {tol}: {reason}")
            }
            OptError::InvalidMaxIter { max_iter, reason } => {
                write!(f, "max_iter = {max_iter}: {reason}")
            }
            OptError::NoTolerancesProvided => {
                write!(f, "At least one of tol_grad, tol_cost, max_iter is required")
            }
            OptError::InvalidLineSearch { name, reason } => {
                write!(f, "Unknown line search '{name}': {reason}")
            }
            OptError::InvalidLBFGSMem { mem, reason } => {
                write!(f, "lbfgs_mem = {mem}: {reason}")
            }

            // ---- Cost function ----
            OptError::NonFiniteCost { value } => {
                write!(f, "Log-likelihood evaluated to {value}")
            }

            // ---- Optimizer outcome ----
            OptError::InvalidThetaHat { index, value, reason } => {
                write!(f, "Estimate {index} = {value}: {reason}")
            }
            OptError::MissingThetaHat => {
                write!(f, "Solver returned no best parameter")
            }

            // ---- Argmin ----
            OptError::InvalidParameter { text } => write!(f, "Invalid parameter: {text}"),
            OptError::NotImplemented { text } => write!(f, "Not implemented: {text}"),
            OptError::NotInitialized { text } => write!(f, "Not initialized: {text}"),
            OptError::ConditionViolated { text } => write!(f, "Condition violated: {text}"),
            OptError::CheckPointNotFound { text } => write!(f, "Checkpoint not found: {text}"),
            OptError::PotentialBug { text } => write!(f, "Potential bug: {text}"),
            OptError::ImpossibleError { text } => write!(f, "Impossible error: {text}"),
            OptError::BackendError { text } => write!(f, "Backend error: {text}"),

            // ---- Finite Diffs ----
            OptError::HessianDimMismatch { expected, found } => {
                write!(
                    f,
                    "Hessian dimension mismatch: expected ({expected}, {expected}), found {found:?}"
                )
            }
            OptError::InvalidHessian { row, col, value } => {
                write!(f, "Hessian entry ({row}, {col}) = {value} is not finite")
            }

            // ---- Model parameters ----
            OptError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta has length {actual}, expected {expected}")
            }
            OptError::InvalidThetaInput { index, value } => {
                write!(f, "Theta entry {index} = {value} is not finite")
            }
            OptError::InvalidModelParam { name, value } => {
                write!(f, "Model parameter {name} outside its domain: {value}")
            }

            // ---- Likelihood evaluation ----
            OptError::NonPositiveIntensity { index, value } => {
                write!(f, "Non-positive intensity {value} at event {index}")
            }
            OptError::InvalidModelData { text } => write!(f, "Invalid model data: {text}"),
            OptError::ModelNotFitted => write!(f, "Model has not been fitted yet."),

            // ---- Fallback ----
            OptError::UnknownError => write!(f, "Unrecognized solver error"),
        }
    }
}

impl From<Error> for OptError {
    fn from(original_err: Error) -> Self {
        // Model errors raised inside `cost`/`gradient` travel through argmin
        // as `OptError`; recover them unchanged.
        let original_err = match original_err.downcast::<OptError>() {
            Ok(opt_err) => return opt_err,
            Err(err) => err,
        };
        match original_err.downcast() {
            Ok(argmin_err) => match argmin_err {
                ArgminError::InvalidParameter { text } => OptError::InvalidParameter { text },
                ArgminError::NotImplemented { text } => OptError::NotImplemented { text },
                ArgminError::NotInitialized { text } => OptError::NotInitialized { text },
                ArgminError::ConditionViolated { text } => OptError::ConditionViolated { text },
                ArgminError::CheckpointNotFound { text } => OptError::CheckPointNotFound { text },
                ArgminError::PotentialBug { text } => OptError::PotentialBug { text },
                ArgminError::ImpossibleError { text } => OptError::ImpossibleError { text },
                _ => OptError::UnknownError,
            },
            Err(err) => OptError::BackendError { text: err.to_string() },
        }
    }
}

impl From<HawkesError> for OptError {
    fn from(err: HawkesError) -> Self {
        match err {
            HawkesError::ThetaLengthMismatch { expected, actual } => {
                OptError::ThetaLengthMismatch { expected, actual }
            }
            HawkesError::NonPositiveDecay { value } => {
                OptError::InvalidModelParam { name: "delta", value }
            }
            HawkesError::NegativeExcitation { value } => {
                OptError::InvalidModelParam { name: "alpha", value }
            }
            HawkesError::NonPositiveBackground { value } => {
                OptError::InvalidModelParam { name: "mu", value }
            }
            HawkesError::NonFiniteParam { name, value } => {
                OptError::InvalidModelParam { name, value }
            }
            HawkesError::NonPositiveIntensity { index, value } => {
                OptError::NonPositiveIntensity { index, value }
            }
            HawkesError::NonFiniteLogLik { value } => OptError::NonFiniteCost { value },
            other => OptError::InvalidModelData { text: other.to_string() },
        }
    }
}

impl From<CompartmentError> for OptError {
    fn from(err: CompartmentError) -> Self {
        match err {
            CompartmentError::InvalidRate { name, value } => {
                OptError::InvalidModelParam { name, value }
            }
            CompartmentError::InvalidDispersion { value } => {
                OptError::InvalidModelParam { name: "phi", value }
            }
            other => OptError::InvalidModelData { text: other.to_string() },
        }
    }
}

/// Convert an [`OptError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<OptError> for PyErr {
    fn from(err: OptError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
