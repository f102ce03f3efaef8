//! Ogata thinning for the exponential-kernel Hawkes process.
//!
//! Purpose
//! -------
//! Draw synthetic event sequences on `[0, max_t]` for a given parameter
//! set, for testing estimators and for goodness-of-fit calibration.
//!
//! Key behaviors
//! -------------
//! - Between events the intensity only decays, so the intensity right after
//!   the current time is a valid upper bound until the next acceptance.
//!   Candidates are drawn from a homogeneous process at that bound and
//!   accepted with probability `λ(t) / λ̄`.
//! - Excitation is tracked recursively, so each candidate costs O(1).
//! - Output is a validated [`HawkesData`] with the requested horizon.
//!
//! Invariants & assumptions
//! ------------------------
//! - Requires `mu > 0`, `alpha ≥ 0`, `delta > 0`, and a finite, non-negative
//!   horizon. A supercritical branching ratio is allowed but may produce a
//!   very large sample on long horizons.
use crate::hawkes::{
    core::{data::HawkesData, options::SimOptions, params::HawkesParams},
    errors::{HawkesError, HawkesResult},
};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Simulate event times on `[0, max_t]` by Ogata thinning.
///
/// Errors
/// ------
/// - Parameter errors from [`HawkesParams::validate_positive_background`].
/// - `InvalidHorizon` when `max_t` is negative or non-finite.
pub fn simulate(params: &HawkesParams, max_t: f64, opts: &SimOptions) -> HawkesResult<HawkesData> {
    params.validate_positive_background()?;
    if !max_t.is_finite() || max_t < 0.0 {
        return Err(HawkesError::InvalidHorizon { value: max_t });
    }
    let mut rng = Pcg64::seed_from_u64(opts.seed);
    let mut times = Vec::new();
    let mut t = 0.0;
    // Σ_{t_j ≤ t} exp(−delta·(t − t_j)) at the current time.
    let mut excitation = 0.0;
    loop {
        let upper = params.mu + params.alpha * excitation;
        let u: f64 = rng.gen();
        let wait = -(1.0 - u).ln() / upper;
        t += wait;
        if t > max_t {
            break;
        }
        excitation *= (-params.delta * wait).exp();
        let lambda = params.mu + params.alpha * excitation;
        let accept: f64 = rng.gen();
        if accept * upper <= lambda {
            times.push(t);
            excitation += 1.0;
        }
    }
    HawkesData::from_vec(times, max_t)
}
