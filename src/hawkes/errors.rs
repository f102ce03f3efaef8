//! Errors for Hawkes-process models (event data validation, parameter
//! domain checks, likelihood evaluation, simulation, and fitting).
//!
//! This module defines [`HawkesError`], the single error type used across the
//! Hawkes stack. It implements `Display`/`Error` and, behind the
//! `python-bindings` feature, converts to `PyErr` for PyO3.
//!
//! ## Conventions
//! - **Indices are 0-based** and refer to positions in the event sequence as
//!   supplied (the evaluator never re-sorts).
//! - Domain errors (`NonPositiveDecay`, `NonPositiveIntensity`, ...) are
//!   recoverable: a sampler or optimizer is expected to reject the proposal
//!   that produced them and continue.
//! - Fitting errors are reported as `OptError` by the model layer.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};
use statrs::StatsError;

/// Result alias for Hawkes operations that may produce [`HawkesError`].
pub type HawkesResult<T> = Result<T, HawkesError>;

/// Unified error type for Hawkes-process modeling.
#[derive(Debug, Clone, PartialEq)]
pub enum HawkesError {
    // ---- Event data validation ----
    /// A timestamp is NaN/±inf.
    NonFiniteEvent { index: usize, value: f64 },

    /// Timestamps must be non-decreasing for the recursive evaluator.
    UnsortedEvents { index: usize, prev: f64, value: f64 },

    /// Observation horizon must be finite.
    InvalidHorizon { value: f64 },

    // ---- Parameter domain ----
    /// Decay rate must be strictly positive.
    NonPositiveDecay { value: f64 },

    /// Excitation magnitude must be non-negative.
    NegativeExcitation { value: f64 },

    /// Background rate must be strictly positive (simulation / fitting only).
    NonPositiveBackground { value: f64 },

    /// A parameter is NaN/±inf.
    NonFiniteParam { name: &'static str, value: f64 },

    /// Unconstrained θ has the wrong length.
    ThetaLengthMismatch { expected: usize, actual: usize },

    // ---- Likelihood evaluation ----
    /// `mu + excitation ≤ 0` at an event; the logarithm is undefined.
    NonPositiveIntensity { index: usize, value: f64 },

    /// Likelihood evaluation produced a non-finite value.
    NonFiniteLogLik { value: f64 },

    // ---- Residual diagnostics ----
    /// At least this many events are needed for the requested diagnostic.
    TooFewEvents { needed: usize, actual: usize },

    // ---- statrs distribution errors ----
    /// Reference distribution rejected its parameters.
    InvalidExpParam,
}

impl std::error::Error for HawkesError {}

impl std::fmt::Display for HawkesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Event data validation ----
            HawkesError::NonFiniteEvent { index, value } => {
                write!(f, "Event time at index {index} is non-finite: {value}")
            }
            HawkesError::UnsortedEvents { index, prev, value } => {
                write!(
                    f,
                    "Event times must be non-decreasing; index {index} has {value} after {prev}"
                )
            }
            HawkesError::InvalidHorizon { value } => {
                write!(f, "Observation horizon must be finite; got: {value}")
            }

            // ---- Parameter domain ----
            HawkesError::NonPositiveDecay { value } => {
                write!(f, "Decay rate delta must be > 0; got: {value}")
            }
            HawkesError::NegativeExcitation { value } => {
                write!(f, "Excitation magnitude alpha must be >= 0; got: {value}")
            }
            HawkesError::NonPositiveBackground { value } => {
                write!(f, "Background rate mu must be > 0; got: {value}")
            }
            HawkesError::NonFiniteParam { name, value } => {
                write!(f, "Parameter {name} must be finite; got: {value}")
            }
            HawkesError::ThetaLengthMismatch { expected, actual } => {
                write!(f, "Theta length mismatch: expected {expected}, got {actual}")
            }

            // ---- Likelihood evaluation ----
            HawkesError::NonPositiveIntensity { index, value } => {
                write!(
                    f,
                    "Conditional intensity at event {index} is non-positive ({value}); log undefined"
                )
            }
            HawkesError::NonFiniteLogLik { value } => {
                write!(f, "Log-likelihood evaluated to a non-finite value: {value}")
            }

            // ---- Residual diagnostics ----
            HawkesError::TooFewEvents { needed, actual } => {
                write!(f, "At least {needed} events are required; got {actual}")
            }

            // ---- statrs distribution errors ----
            HawkesError::InvalidExpParam => {
                write!(f, "Invalid rate for the reference exponential distribution.")
            }
        }
    }
}

/// Convert a [`HawkesError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl std::convert::From<HawkesError> for PyErr {
    fn from(err: HawkesError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

impl From<StatsError> for HawkesError {
    fn from(_: StatsError) -> HawkesError {
        HawkesError::InvalidExpParam
    }
}

impl HawkesError {
    /// `true` for errors a sampler should treat as a rejected proposal
    /// rather than a configuration mistake.
    pub fn is_domain_error(&self) -> bool {
        matches!(
            self,
            HawkesError::NonPositiveDecay { .. }
                | HawkesError::NegativeExcitation { .. }
                | HawkesError::NonFiniteParam { .. }
                | HawkesError::NonPositiveIntensity { .. }
                | HawkesError::NonFiniteLogLik { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    // Purpose
    // -------
    // Domain errors are flagged as recoverable; data errors are not.
    fn is_domain_error_separates_rejections_from_bad_input() {
        assert!(HawkesError::NonPositiveDecay { value: 0.0 }.is_domain_error());
        assert!(HawkesError::NonPositiveIntensity { index: 2, value: -0.1 }.is_domain_error());
        assert!(!HawkesError::UnsortedEvents { index: 1, prev: 2.0, value: 1.0 }.is_domain_error());
        assert!(!HawkesError::InvalidHorizon { value: f64::NAN }.is_domain_error());
    }

    #[test]
    // Purpose
    // -------
    // `Display` carries the offending index and value.
    fn display_includes_index_and_value() {
        let msg = HawkesError::NonPositiveIntensity { index: 3, value: -0.5 }.to_string();
        assert!(msg.contains("event 3"));
        assert!(msg.contains("-0.5"));
    }

    #[test]
    // Purpose
    // -------
    // A rejected statrs parameter maps to the reference-distribution error.
    fn stats_error_maps_to_invalid_exp_param() {
        let err = statrs::distribution::Exp::new(-1.0).map_err(HawkesError::from).unwrap_err();
        assert_eq!(err, HawkesError::InvalidExpParam);
    }
}
