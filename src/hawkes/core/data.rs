//! Event data containers for Hawkes-process models.
//!
//! Purpose
//! -------
//! Provide small, validated containers for observed event times and the
//! observation horizon. Validation happens once at construction so the
//! likelihood evaluators, which run once per proposed parameter set, never
//! re-check the data.
//!
//! Key behaviors
//! -------------
//! - [`EventSequence`] enforces finite, non-decreasing timestamps. An empty
//!   sequence is valid.
//! - [`HawkesData`] pairs an [`EventSequence`] with a finite horizon `max_t`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Timestamps are finite and `t[i-1] <= t[i]`. Ties are allowed.
//! - `max_t` is finite. Whether `max_t >= max(events)` is the caller's
//!   concern: events past the horizon are dropped from the compensator but
//!   still enter the event term, exactly as the closed form prescribes.
//!
//! Testing notes
//! -------------
//! - Unit tests cover the happy path, the empty sequence, non-finite and
//!   unsorted inputs, and `from_unsorted`.
use crate::hawkes::errors::{HawkesError, HawkesResult};
use ndarray::{Array1, ArrayView1};

/// `EventSequence` — immutable, validated event timestamps.
///
/// Fields
/// ------
/// - `times`: `Vec<f64>`
///   Event times in non-decreasing order, stored contiguously whatever the
///   layout of the input array.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSequence {
    times: Vec<f64>,
}

impl EventSequence {
    /// Construct from timestamps that are already in chronological order.
    ///
    /// Strided or reversed views are accepted; the logical order is what
    /// gets validated and stored.
    ///
    /// Errors
    /// ------
    /// - `HawkesError::NonFiniteEvent` for the first NaN/±inf entry.
    /// - `HawkesError::UnsortedEvents` for the first strict decrease.
    pub fn new(times: Array1<f64>) -> HawkesResult<Self> {
        let mut prev = f64::NEG_INFINITY;
        for (index, &value) in times.iter().enumerate() {
            if !value.is_finite() {
                return Err(HawkesError::NonFiniteEvent { index, value });
            }
            if value < prev {
                return Err(HawkesError::UnsortedEvents { index, prev, value });
            }
            prev = value;
        }
        Ok(EventSequence { times: times.to_vec() })
    }

    /// Construct from timestamps in arbitrary order by sorting them first.
    pub fn from_unsorted(times: Vec<f64>) -> HawkesResult<Self> {
        if let Some((index, &value)) = times.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(HawkesError::NonFiniteEvent { index, value });
        }
        let mut times = times;
        times.sort_by(f64::total_cmp);
        Self::new(Array1::from(times))
    }

    pub fn empty() -> Self {
        EventSequence { times: Vec::new() }
    }

    pub fn times(&self) -> ArrayView1<'_, f64> {
        ArrayView1::from(self.times.as_slice())
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.times
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Latest event time, if any.
    pub fn last(&self) -> Option<f64> {
        self.times.last().copied()
    }
}

/// `HawkesData` — an event sequence observed on `[0, max_t]`.
///
/// Fields
/// ------
/// - `events`: [`EventSequence`]
/// - `max_t`: `f64`, observation cutoff (finite).
#[derive(Debug, Clone, PartialEq)]
pub struct HawkesData {
    pub events: EventSequence,
    pub max_t: f64,
}

impl HawkesData {
    /// Construct a validated [`HawkesData`].
    ///
    /// Errors
    /// ------
    /// - `HawkesError::InvalidHorizon` when `max_t` is NaN/±inf.
    pub fn new(events: EventSequence, max_t: f64) -> HawkesResult<Self> {
        if !max_t.is_finite() {
            return Err(HawkesError::InvalidHorizon { value: max_t });
        }
        Ok(HawkesData { events, max_t })
    }

    /// Convenience constructor from a raw, chronologically ordered vector.
    pub fn from_vec(times: Vec<f64>, max_t: f64) -> HawkesResult<Self> {
        Self::new(EventSequence::new(Array1::from(times))?, max_t)
    }

    pub fn n_events(&self) -> usize {
        self.events.len()
    }

    /// Empirical event rate `N / max_t`, or `None` for a non-positive horizon.
    pub fn empirical_rate(&self) -> Option<f64> {
        if self.max_t > 0.0 { Some(self.events.len() as f64 / self.max_t) } else { None }
    }
}
