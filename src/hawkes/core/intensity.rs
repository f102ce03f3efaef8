//! Conditional intensity and compensator evaluation.
//!
//! Purpose
//! -------
//! Evaluate `λ(t)` and `Λ(t) = ∫₀ᵗ λ(s) ds` for a fitted or proposed
//! parameter set, either at a single time or along a sorted grid. These
//! feed residual diagnostics and reporting of the intensity path.
//!
//! Conventions
//! -----------
//! - `λ(t)` uses events strictly before `t`; at an event time the jump of
//!   that event is not yet included (left limit), matching the likelihood.
//! - Grid evaluation merges the grid with the event sequence in one pass,
//!   so cost is O(N + M) rather than O(N·M).
use crate::hawkes::{
    core::{data::EventSequence, params::HawkesParams},
    errors::{HawkesError, HawkesResult},
};
use ndarray::Array1;

/// `λ(t) = mu + alpha · Σ_{t_j < t} exp(−delta · (t − t_j))`.
pub fn intensity_at(params: &HawkesParams, events: &EventSequence, t: f64) -> HawkesResult<f64> {
    params.validate()?;
    let excitation: f64 = events
        .as_slice()
        .iter()
        .take_while(|&&tj| tj < t)
        .map(|&tj| (-params.delta * (t - tj)).exp())
        .sum();
    Ok(params.mu + params.alpha * excitation)
}

/// `Λ(t) = mu·t + (alpha/delta) · Σ_{t_j < t} (1 − exp(−delta · (t − t_j)))`.
pub fn compensator_at(
    params: &HawkesParams, events: &EventSequence, t: f64,
) -> HawkesResult<f64> {
    params.validate()?;
    let mass: f64 = events
        .as_slice()
        .iter()
        .take_while(|&&tj| tj < t)
        .map(|&tj| -(-params.delta * (t - tj)).exp_m1())
        .sum();
    Ok(params.mu * t + params.alpha / params.delta * mass)
}

/// Left-limit intensities `λ(t_i)` at every event, in one O(N) sweep.
///
/// Errors with `NonPositiveIntensity` if any intensity is `≤ 0`.
pub fn event_intensities(
    params: &HawkesParams, events: &EventSequence,
) -> HawkesResult<Array1<f64>> {
    params.validate()?;
    let times = events.as_slice();
    let mut out = Array1::<f64>::zeros(times.len());
    let mut a = 0.0;
    for (i, &t) in times.iter().enumerate() {
        if i > 0 {
            a = (-params.delta * (t - times[i - 1])).exp() * (a + 1.0);
        }
        let lambda = params.mu + params.alpha * a;
        if lambda <= 0.0 {
            return Err(HawkesError::NonPositiveIntensity { index: i, value: lambda });
        }
        out[i] = lambda;
    }
    Ok(out)
}

/// Intensity along a non-decreasing `grid`.
///
/// Errors with `UnsortedEvents` (reused for the grid) if `grid` decreases.
pub fn intensity_path(
    params: &HawkesParams, events: &EventSequence, grid: &[f64],
) -> HawkesResult<Array1<f64>> {
    params.validate()?;
    let times = events.as_slice();
    let mut out = Array1::<f64>::zeros(grid.len());
    // `state` is Σ exp(−delta·(anchor − t_j)) over the events absorbed so far.
    let mut state = 0.0;
    let mut anchor = f64::NEG_INFINITY;
    let mut prev = f64::NEG_INFINITY;
    let mut next = 0;
    for (k, &t) in grid.iter().enumerate() {
        if t < prev {
            return Err(HawkesError::UnsortedEvents { index: k, prev, value: t });
        }
        prev = t;
        while next < times.len() && times[next] < t {
            let tj = times[next];
            state = state * (-params.delta * (tj - anchor)).exp() + 1.0;
            anchor = tj;
            next += 1;
        }
        let excitation = state * (-params.delta * (t - anchor)).exp();
        out[k] = params.mu + params.alpha * excitation;
    }
    Ok(out)
}
