//! O(N²) pairwise-matrix Hawkes log-likelihood, kept as a verification oracle.
//!
//! Builds the full difference matrix `D[i, j] = t_i − t_j`, keeps the
//! strictly lower triangle (pairs `j < i` by index), applies the kernel,
//! and sums each row. The compensator is evaluated here as well, term by
//! term, so nothing is shared with the recursive path. Quadratic in time
//! and memory: use [`loglik`](crate::hawkes::core::loglik::loglik) for
//! anything but testing.
use crate::hawkes::{
    core::{data::HawkesData, params::HawkesParams},
    errors::{HawkesError, HawkesResult},
};
use ndarray::{Array2, ArrayView1, Axis};

/// `D[i, j] = t_i − t_j` for all pairs.
pub fn pairwise_differences(times: ArrayView1<'_, f64>) -> Array2<f64> {
    let col = times.insert_axis(Axis(1));
    let row = times.insert_axis(Axis(0));
    &col - &row
}

/// Log-likelihood from the dense pairwise formulation.
pub fn loglik_pairwise(params: &HawkesParams, data: &HawkesData) -> HawkesResult<f64> {
    params.validate()?;
    let times = data.events.times();
    let mut kernel = pairwise_differences(times).mapv(|d| params.alpha * (-params.delta * d).exp());
    for ((i, j), k) in kernel.indexed_iter_mut() {
        if j >= i {
            *k = 0.0;
        }
    }
    let excitation = kernel.sum_axis(Axis(1));
    let mut second = 0.0;
    for (index, &exc) in excitation.iter().enumerate() {
        let term_inside_log = params.mu + exc;
        if term_inside_log <= 0.0 {
            return Err(HawkesError::NonPositiveIntensity { index, value: term_inside_log });
        }
        second += term_inside_log.ln();
    }
    let mut decayed = 0.0;
    for &t in times.iter() {
        let remaining = data.max_t - t;
        if remaining >= 0.0 {
            decayed += (-params.delta * remaining).exp() - 1.0;
        }
    }
    let first = params.mu * data.max_t - params.alpha / params.delta * decayed;
    let value = second - first;
    if !value.is_finite() {
        return Err(HawkesError::NonFiniteLogLik { value });
    }
    Ok(value)
}
