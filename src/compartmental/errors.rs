//! Errors for compartmental epidemic models (rate validation, integration,
//! and the count observation model).
//!
//! ## Conventions
//! - `step` indices count completed RK4 steps, so `step = 1` is the first
//!   state produced after `y0`.
//! - `index` in observation errors is the 0-based position in the count
//!   series.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*};

/// Result alias for compartmental operations.
pub type CompartmentResult<T> = Result<T, CompartmentError>;

#[derive(Debug, Clone, PartialEq)]
pub enum CompartmentError {
    // ---- Model configuration ----
    /// Transition rates must be finite and strictly positive.
    InvalidRate { name: &'static str, value: f64 },

    /// Population must be finite and strictly positive.
    InvalidPopulation { value: f64 },

    // ---- Integration ----
    /// State vector length does not match the model dimension.
    StateLengthMismatch { expected: usize, actual: usize },

    /// Step size must be finite and strictly positive.
    InvalidStepSize { value: f64 },

    /// A compartment became negative or non-finite.
    InvalidState { step: usize, index: usize, value: f64 },

    // ---- Observation model ----
    /// Negative-binomial dispersion must be finite and strictly positive.
    InvalidDispersion { value: f64 },

    /// Expected counts must be finite and strictly positive.
    NonPositiveMean { index: usize, value: f64 },

    /// Observed counts must be finite non-negative integers.
    InvalidCount { index: usize, value: f64 },

    /// Observed and expected series differ in length.
    LengthMismatch { counts: usize, means: usize },
}

impl std::error::Error for CompartmentError {}

impl std::fmt::Display for CompartmentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Model configuration ----
            CompartmentError::InvalidRate { name, value } => {
                write!(f, "Rate {name} must be finite and > 0; got: {value}")
            }
            CompartmentError::InvalidPopulation { value } => {
                write!(f, "Population must be finite and > 0; got: {value}")
            }

            // ---- Integration ----
            CompartmentError::StateLengthMismatch { expected, actual } => {
                write!(f, "State length mismatch: expected {expected}, got {actual}")
            }
            CompartmentError::InvalidStepSize { value } => {
                write!(f, "Step size must be finite and > 0; got: {value}")
            }
            CompartmentError::InvalidState { step, index, value } => {
                write!(
                    f,
                    "Compartment {index} is negative or non-finite at step {step}: {value}"
                )
            }

            // ---- Observation model ----
            CompartmentError::InvalidDispersion { value } => {
                write!(f, "Dispersion phi must be finite and > 0; got: {value}")
            }
            CompartmentError::NonPositiveMean { index, value } => {
                write!(f, "Expected count at index {index} must be finite and > 0; got: {value}")
            }
            CompartmentError::InvalidCount { index, value } => {
                write!(
                    f,
                    "Observed count at index {index} must be a non-negative integer; got: {value}"
                )
            }
            CompartmentError::LengthMismatch { counts, means } => {
                write!(f, "Length mismatch: {counts} counts vs {means} expected values")
            }
        }
    }
}

#[cfg(feature = "python-bindings")]
impl std::convert::From<CompartmentError> for PyErr {
    fn from(err: CompartmentError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
