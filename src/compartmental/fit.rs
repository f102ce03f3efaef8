//! SIR transmission fit to binned incidence counts.
//!
//! Purpose
//! -------
//! Estimate `(beta, gamma)` of an [`Sir`] model from a series of new-case
//! counts by maximizing a negative-binomial likelihood over the RK4 path.
//!
//! Key behaviors
//! -------------
//! - θ-space is `θ = (θ_beta, θ_gamma)` with both rates mapped through
//!   `softplus`, floored at `PARAM_FLOOR` and capped at
//!   [`SirIncidenceModel::max_rate`], so every trial point of the line search
//!   is a model RK4 can integrate.
//! - Expected counts per observation window come from
//!   [`Trajectory::binned_incidence`](crate::compartmental::integrate::Trajectory::binned_incidence).
//!   The number of RK4 steps per window grows with `beta + gamma` so the
//!   stage size `h·(beta + gamma)` stays below [`MAX_RATE_STEP`].
//! - No analytic gradient is provided; the optimizer falls back to finite
//!   differences of the cost.
//!
//! Invariants & assumptions
//! ------------------------
//! - Counts are non-negative integers stored as `f64`.
//! - Expected counts are floored at [`MEAN_FLOOR`] so an epidemic that
//!   has burned out still yields a finite likelihood.
use crate::{
    compartmental::{
        errors::{CompartmentError, CompartmentResult},
        integrate::integrate_rk4,
        models::Sir,
        observation::{NegBinomialObs, validate_count},
    },
    optimization::{
        errors::{OptError, OptResult},
        loglik_optimizer::{
            Cost, LogLikelihood, MLEOptions, OptimOutcome, Theta, maximize,
            validation::validate_theta,
        },
        numerical_stability::transformations::{positive_softplus, safe_softplus_inv},
    },
};
use ndarray::{Array1, array};

/// Number of free parameters in θ-space.
pub const N_SIR_PARAMS: usize = 2;

/// Lower bound applied to expected counts.
pub const MEAN_FLOOR: f64 = 1e-8;

/// Largest allowed `h·(beta + gamma)` per RK4 step.
pub const MAX_RATE_STEP: f64 = 0.25;

/// Upper bound on RK4 steps per observation window. Rates beyond
/// `MAX_RATE_STEP · MAX_STEPS_PER_WINDOW / obs_interval` may fail with
/// `InvalidState`.
pub const MAX_STEPS_PER_WINDOW: usize = 10_000;

/// Default minimum RK4 steps per observation window.
pub const DEFAULT_MIN_STEPS: usize = 8;

/// Observed new-case counts, one per observation window.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidenceData {
    pub counts: Array1<f64>,
}

impl IncidenceData {
    /// Errors
    /// ------
    /// - `LengthMismatch { counts: 0, .. }` for an empty series.
    /// - `InvalidCount` for a negative, fractional, or non-finite entry.
    pub fn new(counts: Array1<f64>) -> CompartmentResult<Self> {
        if counts.is_empty() {
            return Err(CompartmentError::LengthMismatch { counts: 0, means: 1 });
        }
        for (index, &value) in counts.iter().enumerate() {
            validate_count(index, value)?;
        }
        Ok(IncidenceData { counts })
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

/// SIR model observed through negative-binomial incidence counts.
///
/// Fields
/// ------
/// - `population`, `initial_infected`: fix `y0 = [N − I₀, I₀, 0]`.
/// - `obs`: count noise model.
/// - `obs_interval`: length of one observation window in model time.
/// - `min_steps`: lower bound on RK4 steps per window.
/// - `mle_opts`: optimizer configuration.
/// - `results`, `fitted`: filled by [`fit`](Self::fit).
#[derive(Debug, Clone, PartialEq)]
pub struct SirIncidenceModel {
    pub population: f64,
    pub initial_infected: f64,
    pub obs: NegBinomialObs,
    pub obs_interval: f64,
    pub min_steps: usize,
    pub mle_opts: MLEOptions,
    pub results: Option<OptimOutcome>,
    pub fitted: Option<Sir>,
}

impl SirIncidenceModel {
    /// Errors
    /// ------
    /// - `InvalidPopulation` for a non-positive or non-finite population.
    /// - `InvalidState { step: 0, index: 1, .. }` unless
    ///   `0 < initial_infected < population`.
    /// - `InvalidStepSize` for a non-positive or non-finite interval.
    pub fn new(
        population: f64, initial_infected: f64, obs: NegBinomialObs, obs_interval: f64,
        mle_opts: MLEOptions,
    ) -> CompartmentResult<Self> {
        if !population.is_finite() || population <= 0.0 {
            return Err(CompartmentError::InvalidPopulation { value: population });
        }
        if !initial_infected.is_finite() || initial_infected <= 0.0 || initial_infected >= population
        {
            return Err(CompartmentError::InvalidState { step: 0, index: 1, value: initial_infected });
        }
        if !obs_interval.is_finite() || obs_interval <= 0.0 {
            return Err(CompartmentError::InvalidStepSize { value: obs_interval });
        }
        Ok(SirIncidenceModel {
            population,
            initial_infected,
            obs,
            obs_interval,
            min_steps: DEFAULT_MIN_STEPS,
            mle_opts,
            results: None,
            fitted: None,
        })
    }

    /// Largest rate [`sir_from_theta`](Self::sir_from_theta) returns. Two
    /// rates at this cap still fit in `MAX_STEPS_PER_WINDOW` RK4 steps of
    /// stage size `MAX_RATE_STEP`.
    pub fn max_rate(&self) -> f64 {
        0.5 * MAX_RATE_STEP * MAX_STEPS_PER_WINDOW as f64 / self.obs_interval
    }

    /// Map θ to an [`Sir`] model. Rates are `softplus(θ)` clamped to
    /// `[PARAM_FLOOR, max_rate]`.
    pub fn sir_from_theta(&self, theta: &Theta) -> OptResult<Sir> {
        validate_theta(theta, N_SIR_PARAMS)?;
        let cap = self.max_rate();
        let rate = |x: f64| positive_softplus(x).min(cap);
        Ok(Sir::new(rate(theta[0]), rate(theta[1]), self.population)?)
    }

    /// θ for given model-space rates.
    pub fn theta_from_rates(beta: f64, gamma: f64) -> OptResult<Theta> {
        for (name, value) in [("beta", beta), ("gamma", gamma)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(OptError::InvalidModelParam { name, value });
            }
        }
        Ok(array![safe_softplus_inv(beta), safe_softplus_inv(gamma)])
    }

    /// Expected new cases in each of the first `n_obs` windows.
    pub fn expected_incidence(&self, sir: &Sir, n_obs: usize) -> CompartmentResult<Array1<f64>> {
        let steps = self.steps_per_window(sir);
        let dt = self.obs_interval / steps as f64;
        let y0 = sir.initial_state(self.initial_infected);
        let path = integrate_rk4(sir, y0.view(), dt, steps * n_obs)?;
        Ok(path.binned_incidence(steps).mapv(|m| m.max(MEAN_FLOOR)))
    }

    fn steps_per_window(&self, sir: &Sir) -> usize {
        let needed = ((sir.beta + sir.gamma) * self.obs_interval / MAX_RATE_STEP).ceil();
        // Saturating float-to-int cast; rates are finite here.
        (needed as usize).clamp(self.min_steps.max(1), MAX_STEPS_PER_WINDOW.max(self.min_steps))
    }

    /// Maximize the likelihood from `theta0` and cache the outcome.
    ///
    /// Errors
    /// ------
    /// Propagates validation and optimizer errors as [`OptError`].
    pub fn fit(&mut self, theta0: Theta, data: &IncidenceData) -> OptResult<()> {
        let outcome = maximize(self, theta0, data, &self.mle_opts)?;
        let sir = self.sir_from_theta(&outcome.theta_hat)?;
        self.results = Some(outcome);
        self.fitted = Some(sir);
        Ok(())
    }

    pub fn fitted_sir(&self) -> OptResult<&Sir> {
        self.fitted.as_ref().ok_or(OptError::ModelNotFitted)
    }
}

impl LogLikelihood for SirIncidenceModel {
    type Data = IncidenceData;

    fn value(&self, theta: &Theta, data: &Self::Data) -> OptResult<Cost> {
        let sir = self.sir_from_theta(theta)?;
        let means = self.expected_incidence(&sir, data.len())?;
        Ok(self.obs.loglik(data.counts.view(), means.view())?)
    }

    fn check(&self, theta: &Theta, data: &Self::Data) -> OptResult<()> {
        validate_theta(theta, N_SIR_PARAMS)?;
        if data.is_empty() {
            return Err(CompartmentError::LengthMismatch { counts: 0, means: 1 }.into());
        }
        Ok(())
    }
}
