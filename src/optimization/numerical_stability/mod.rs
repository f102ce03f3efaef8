//! numerical_stability — numerically robust scalar transforms.
//!
//! Purpose
//! -------
//! Collect the stable scalar transforms used to map unconstrained optimizer
//! coordinates into strictly positive model parameters, plus the shared
//! eigenvalue floor used by covariance routines.
//!
//! Key behaviors
//! -------------
//! - `safe_softplus` / `safe_softplus_inv` map ℝ ↔ (0, ∞) without
//!   overflow; `safe_logistic` is the derivative of softplus and is used in
//!   chain-rule gradients and delta-method Jacobians.
//! - `positive_softplus` floors the image at `PARAM_FLOOR` so model rates
//!   never underflow to zero on a long line-search step.
//! - `EIGEN_EPS` is the common threshold below which eigenvalues of an
//!   observed information matrix are treated as zero.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no logging, no I/O, no global state.
//! - Domain validation (finiteness, positivity) is enforced by the model
//!   layers, not here.
//!
//! Testing notes
//! -------------
//! - Unit tests in [`transformations`] check agreement with naïve formulas
//!   on safe grids and finite behavior in the tails.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{
    EIGEN_EPS, PARAM_FLOOR, positive_softplus, positive_softplus_deriv, safe_logistic,
    safe_softplus, safe_softplus_inv,
};

pub mod prelude {
    pub use super::transformations::{
        EIGEN_EPS, PARAM_FLOOR, positive_softplus, positive_softplus_deriv, safe_logistic,
        safe_softplus, safe_softplus_inv,
    };
}
