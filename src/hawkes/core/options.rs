//! Hawkes options — configuration for estimation and simulation.
//!
//! Purpose
//! -------
//! Keep estimation-time and simulation-time knobs out of the evaluators so
//! call sites pass one explicit, validated value instead of ad-hoc flags.
//!
//! Key behaviors
//! -------------
//! - [`HawkesOptions`] carries the maximum-likelihood optimizer settings
//!   used by [`HawkesModel::fit`](crate::hawkes::models::hawkes::HawkesModel::fit).
//! - [`SimOptions`] carries the RNG seed for Ogata thinning.
//!
//! Invariants & assumptions
//! ------------------------
//! - Components are validated by their own constructors (`MLEOptions::new`,
//!   `Tolerances::new`); these carriers add no cross-field checks.
//! - The same seed and parameters always reproduce the same event sequence.
use crate::optimization::loglik_optimizer::MLEOptions;

/// Estimation-time configuration for Hawkes models.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HawkesOptions {
    /// Maximum-likelihood optimizer options (L-BFGS + line search).
    pub mle_opts: MLEOptions,
}

impl HawkesOptions {
    pub fn new(mle_opts: MLEOptions) -> HawkesOptions {
        HawkesOptions { mle_opts }
    }
}

/// Simulation-time configuration.
///
/// Fields
/// ------
/// - `seed`: `u64`
///   Seed for the PCG generator. Default is `42`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimOptions {
    pub seed: u64,
}

impl SimOptions {
    pub fn new(seed: u64) -> SimOptions {
        SimOptions { seed }
    }
}

impl Default for SimOptions {
    fn default() -> Self {
        SimOptions { seed: 42 }
    }
}
