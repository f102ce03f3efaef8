//! Python-side argument extraction shared by the PyO3 wrappers in `lib.rs`.
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyTypeError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    hawkes::core::data::HawkesData,
    optimization::loglik_optimizer::traits::{LineSearcher, MLEOptions, Tolerances},
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

/// Accept a contiguous float64 ndarray, a pandas Series, or any sequence of
/// floats.
#[cfg(feature = "python-bindings")]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method1("to_numpy", (false,)) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        PyTypeError::new_err("expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64")
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Build validated [`HawkesData`] from Python event times and a horizon.
/// Times must already be sorted; unsorted input raises `ValueError`.
#[cfg(feature = "python-bindings")]
pub fn extract_hawkes_data<'py>(
    py: Python<'py>, events: &Bound<'py, PyAny>, max_t: f64,
) -> PyResult<HawkesData> {
    let arr = extract_f64_array(py, events)?;
    let times = arr.as_array().to_owned();
    let events = crate::hawkes::core::data::EventSequence::new(times)?;
    Ok(HawkesData::new(events, max_t)?)
}

/// Optimizer options from optional Python keyword arguments. Unset
/// `tol_grad` and `max_iter` keep their defaults (`1e-6`, `300`).
#[cfg(feature = "python-bindings")]
pub fn build_mle_options(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
) -> PyResult<MLEOptions> {
    use std::str::FromStr;

    let tols = Tolerances::with_defaults(tol_grad, tol_cost, max_iter)?;
    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name)?,
        None => MLEOptions::default().line_searcher,
    };
    Ok(MLEOptions::new(tols, ls, false, lbfgs_mem)?)
}
