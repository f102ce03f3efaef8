//! hawkes — self-exciting point processes with an exponential kernel.
//!
//! Purpose
//! -------
//! Evaluate, simulate, fit, and diagnose the univariate Hawkes process
//! `λ(t) = mu + alpha · Σ_{t_j < t} exp(−delta·(t − t_j))` on `[0, max_t]`.
//!
//! Key behaviors
//! -------------
//! - [`core`] holds event containers, parameters, the O(N) recursive
//!   log-likelihood and gradient, the O(N²) pairwise oracle, intensity
//!   evaluation, residual diagnostics, and Ogata simulation.
//! - [`models`] exposes [`HawkesModel`], which plugs the evaluators into the
//!   L-BFGS optimizer in softplus θ-space and reports standard errors.
//! - [`errors`] defines [`HawkesError`]; domain failures are values, never
//!   panics, so a sampler can reject the proposal and move on.
//!
//! Conventions
//! -----------
//! - Parameter order is `(mu, alpha, delta)` in every vector.
//! - Time is a plain `f64` on the caller's scale; no unit conversion.

pub mod core;
pub mod errors;
pub mod models;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::core::{
    EventSequence, HawkesData, HawkesOptions, HawkesParams, KsOutcome, LogLikTerms, SimOptions,
    loglik, loglik_and_grad, loglik_grad, loglik_pairwise, rescaled_times, simulate,
};
pub use self::errors::{HawkesError, HawkesResult};
pub use self::models::HawkesModel;

pub mod prelude {
    pub use super::core::prelude::*;
    pub use super::errors::{HawkesError, HawkesResult};
    pub use super::models::HawkesModel;
}
