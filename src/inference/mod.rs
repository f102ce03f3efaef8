//! inference — post-estimation uncertainty for fitted models.
//!
//! Purpose
//! -------
//! Compute the observed information at a maximum-likelihood estimate and
//! turn it into covariances and classical standard errors, first in the
//! unconstrained θ-space used by the optimizer and then in model space by
//! the delta method.
//!
//! Key behaviors
//! -------------
//! - [`observed_information`] builds `J(θ̂)` from the gradient of the
//!   negative log-likelihood by finite differences.
//! - [`pseudo_inverse_cov`] inverts `J(θ̂)` through a truncated symmetric
//!   eigendecomposition so weakly identified directions do not fail.
//! - [`calc_standard_errors`] and [`delta_method_se`] produce the SEs that
//!   model layers report.
//!
//! Conventions
//! -----------
//! - Pure functions; no logging or I/O.
//! - Errors are reported as
//!   [`OptError`](crate::optimization::errors::OptError).

pub mod hessian;

// ---- Re-exports (primary surface) -----------------------------------------

pub use self::hessian::{
    calc_standard_errors, delta_method_se, observed_information, pseudo_inverse_cov,
};

pub mod prelude {
    pub use super::hessian::{calc_standard_errors, delta_method_se, pseudo_inverse_cov};
}
