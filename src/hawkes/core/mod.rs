//! core — Hawkes event data, parameters, likelihood evaluators, and
//! diagnostics.
//!
//! Purpose
//! -------
//! Collect the building blocks for the univariate exponential-kernel Hawkes
//! process: validated event containers, the `(mu, alpha, delta)` parameter
//! type, the O(N) recursive log-likelihood with its analytic gradient, the
//! O(N²) pairwise oracle, intensity/compensator evaluation, time-rescaling
//! residuals, and Ogata thinning.
//!
//! Key behaviors
//! -------------
//! - [`loglik`] / [`loglik_and_grad`] are the evaluators a sampler or
//!   optimizer calls repeatedly; they never mutate their inputs and never
//!   retain state between calls.
//! - [`loglik_pairwise`] materializes the full difference matrix and exists
//!   to cross-check the recursion.
//! - [`rescaled_times`] and [`KsOutcome`] assess a fitted model;
//!   [`simulate`] produces synthetic data for calibration.
//!
//! Invariants & assumptions
//! ------------------------
//! - Event sequences are finite and non-decreasing by construction.
//! - Parameters are validated on every evaluation: `delta > 0`,
//!   `alpha ≥ 0`, all finite. `mu` may be any finite value for evaluation;
//!   an intensity `≤ 0` at an event is reported, not masked.
//!
//! Conventions
//! -----------
//! - Parameter vectors are ordered `(mu, alpha, delta)` everywhere.
//! - Indices in errors are 0-based positions in the event sequence.
//! - No I/O or logging happens in this module.

pub mod data;
pub mod intensity;
pub mod loglik;
pub mod options;
pub mod pairwise;
pub mod params;
pub mod residuals;
pub mod simulate;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::data::{EventSequence, HawkesData};
pub use self::intensity::{compensator_at, event_intensities, intensity_at, intensity_path};
pub use self::loglik::{LogLikTerms, loglik, loglik_and_grad, loglik_grad, loglik_terms};
pub use self::options::{HawkesOptions, SimOptions};
pub use self::pairwise::{loglik_pairwise, pairwise_differences};
pub use self::params::{HawkesParams, N_PARAMS, PARAM_NAMES};
pub use self::residuals::{KsOutcome, rescaled_times};
pub use self::simulate::simulate;

pub mod prelude {
    pub use super::data::{EventSequence, HawkesData};
    pub use super::loglik::{loglik, loglik_and_grad, loglik_grad};
    pub use super::options::{HawkesOptions, SimOptions};
    pub use super::params::HawkesParams;
    pub use super::residuals::{KsOutcome, rescaled_times};
    pub use super::simulate::simulate;
}
