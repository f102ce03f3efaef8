//! outbreak_models — likelihoods, simulation, and fitting for epidemic
//! event data, with optional Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the Hawkes evaluators to Python via the `_outbreak_models`
//! extension module.
//!
//! Key behaviors
//! -------------
//! - [`hawkes`]: exact O(N) log-likelihood and gradient of the
//!   exponential-kernel Hawkes process, an O(N²) oracle, Ogata simulation,
//!   residual diagnostics, and maximum-likelihood fitting.
//! - [`compartmental`]: SIR/SEIR right-hand sides, RK4 integration with
//!   conserved population, and a negative-binomial incidence fit.
//! - [`optimization`]: the argmin-backed L-BFGS layer every model fits
//!   through. [`inference`]: observed-information standard errors.
//! - With `python-bindings`, `_outbreak_models.hawkes` provides the
//!   `HawkesLikelihood` class and `simulate_hawkes`.
//!
//! Conventions
//! -----------
//! - All heavy numerical work lives in the inner modules; this file only
//!   converts Python inputs and maps errors to `ValueError`.
//! - Parameter order is `(mu, alpha, delta)` on both sides of the boundary.

pub mod compartmental;
pub mod hawkes;
pub mod inference;
pub mod optimization;
pub mod utils;

#[cfg(feature = "python-bindings")]
use numpy::{IntoPyArray, PyArray1};

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    hawkes::core::{
        data::HawkesData,
        loglik::{loglik, loglik_and_grad},
        options::{HawkesOptions, SimOptions},
        params::HawkesParams,
        simulate::simulate,
    },
    hawkes::models::HawkesModel,
    utils::{build_mle_options, extract_hawkes_data},
};

/// Python handle on a fixed event sequence; evaluates `ℓ` and `∇ℓ` at
/// arbitrary `(mu, alpha, delta)`.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "outbreak_models.hawkes")]
pub struct HawkesLikelihood {
    data: HawkesData,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl HawkesLikelihood {
    #[new]
    #[pyo3(text_signature = "(events, max_t, /)")]
    pub fn new<'py>(
        py: Python<'py>, events: &Bound<'py, PyAny>, max_t: f64,
    ) -> PyResult<HawkesLikelihood> {
        Ok(HawkesLikelihood { data: extract_hawkes_data(py, events, max_t)? })
    }

    #[getter]
    pub fn n_events(&self) -> usize {
        self.data.n_events()
    }

    #[getter]
    pub fn max_t(&self) -> f64 {
        self.data.max_t
    }

    pub fn value(&self, mu: f64, alpha: f64, delta: f64) -> PyResult<f64> {
        let params = HawkesParams::new(mu, alpha, delta)?;
        Ok(loglik(&params, &self.data)?)
    }

    pub fn grad(&self, mu: f64, alpha: f64, delta: f64) -> PyResult<Vec<f64>> {
        Ok(self.value_and_grad(mu, alpha, delta)?.1)
    }

    pub fn value_and_grad(&self, mu: f64, alpha: f64, delta: f64) -> PyResult<(f64, Vec<f64>)> {
        let params = HawkesParams::new(mu, alpha, delta)?;
        let (value, grad) = loglik_and_grad(&params, &self.data)?;
        Ok((value, grad.to_vec()))
    }

    /// Maximum-likelihood fit. Returns `(params, loglik, converged, std_errors)`
    /// with `params` and `std_errors` in `(mu, alpha, delta)` order.
    #[pyo3(
        signature = (
            tol_grad = None,
            tol_cost = None,
            max_iter = None,
            line_searcher = None,
            lbfgs_mem = None,
        ),
        text_signature = "(self, /, tol_grad=1e-6, tol_cost=None, max_iter=300, \
                          line_searcher='MoreThuente', lbfgs_mem=None)"
    )]
    pub fn fit(
        &self, tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
        line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    ) -> PyResult<(Vec<f64>, f64, bool, Vec<f64>)> {
        let mle_opts = build_mle_options(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem)?;
        let mut model = HawkesModel::new(HawkesOptions::new(mle_opts));
        model.fit(HawkesModel::default_theta0(&self.data)?, &self.data)?;
        let se = model.standard_errors(&self.data)?;
        let params = model.params()?.as_array().to_vec();
        let (value, converged) =
            model.results.as_ref().map_or((f64::NAN, false), |r| (r.value, r.converged));
        Ok((params, value, converged, se.to_vec()))
    }
}

/// Simulate event times on `[0, max_t]` by Ogata thinning.
#[cfg(feature = "python-bindings")]
#[pyfunction]
#[pyo3(signature = (mu, alpha, delta, max_t, seed = 42))]
pub fn simulate_hawkes<'py>(
    py: Python<'py>, mu: f64, alpha: f64, delta: f64, max_t: f64, seed: u64,
) -> PyResult<Bound<'py, PyArray1<f64>>> {
    let params = HawkesParams::new(mu, alpha, delta)?;
    let data = simulate(&params, max_t, &SimOptions::new(seed))?;
    Ok(data.events.times().to_owned().into_pyarray(py))
}

#[cfg(feature = "python-bindings")]
#[pymodule]
fn _outbreak_models<'py>(py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let hawkes_mod = PyModule::new(py, "hawkes")?;
    hawkes_mod.add_class::<HawkesLikelihood>()?;
    hawkes_mod.add_function(wrap_pyfunction!(simulate_hawkes, &hawkes_mod)?)?;
    m.add_submodule(&hawkes_mod)?;

    // Register in sys.modules so `import outbreak_models.hawkes` resolves.
    py.import("sys")?.getattr("modules")?.set_item("outbreak_models.hawkes", hawkes_mod)?;
    Ok(())
}
