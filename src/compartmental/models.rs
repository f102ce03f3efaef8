//! SIR and SEIR right-hand sides behind a common trait.
//!
//! Purpose
//! -------
//! Describe deterministic compartmental epidemic models as autonomous ODE
//! systems `dy/dt = f(y)` so a single integrator can drive any of them.
//!
//! Key behaviors
//! -------------
//! - [`CompartmentalModel`] exposes compartment labels, the right-hand side
//!   written into a caller-owned buffer, and the conserved population.
//! - [`Sir`]: `S' = −βSI/N`, `I' = βSI/N − γI`, `R' = γI`.
//! - [`Seir`]: `S' = −βSI/N`, `E' = βSI/N − σE`, `I' = σE − γI`, `R' = γI`.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every right-hand side sums to zero, so `Σ y` is conserved exactly by
//!   the flow and up to round-off by RK4.
//! - Compartment 0 is always `S`; new infections are read off its decrease.
use crate::compartmental::errors::{CompartmentError, CompartmentResult};
use ndarray::{Array1, ArrayView1, ArrayViewMut1, array};

/// A deterministic compartmental model `dy/dt = f(y)`.
pub trait CompartmentalModel {
    /// Compartment names in state order.
    fn labels(&self) -> &'static [&'static str];

    /// Write `f(y)` into `dy`. Both have length [`dim`](Self::dim).
    fn rhs(&self, y: ArrayView1<f64>, dy: ArrayViewMut1<f64>);

    /// Total population `N` used in the force of infection.
    fn population(&self) -> f64;

    fn dim(&self) -> usize {
        self.labels().len()
    }

    /// Basic reproduction number.
    fn r0(&self) -> f64;
}

fn check_rate(name: &'static str, value: f64) -> CompartmentResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CompartmentError::InvalidRate { name, value });
    }
    Ok(())
}

fn check_population(value: f64) -> CompartmentResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(CompartmentError::InvalidPopulation { value });
    }
    Ok(())
}

/// Susceptible–Infected–Recovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sir {
    /// Transmission rate β.
    pub beta: f64,
    /// Recovery rate γ (1 / infectious period).
    pub gamma: f64,
    pub population: f64,
}

impl Sir {
    pub fn new(beta: f64, gamma: f64, population: f64) -> CompartmentResult<Self> {
        check_rate("beta", beta)?;
        check_rate("gamma", gamma)?;
        check_population(population)?;
        Ok(Sir { beta, gamma, population })
    }

    /// `[N − I₀, I₀, 0]`.
    pub fn initial_state(&self, infected: f64) -> Array1<f64> {
        array![self.population - infected, infected, 0.0]
    }
}

impl CompartmentalModel for Sir {
    fn labels(&self) -> &'static [&'static str] {
        &["S", "I", "R"]
    }

    fn rhs(&self, y: ArrayView1<f64>, mut dy: ArrayViewMut1<f64>) {
        let infection = self.beta * y[0] * y[1] / self.population;
        let recovery = self.gamma * y[1];
        dy[0] = -infection;
        dy[1] = infection - recovery;
        dy[2] = recovery;
    }

    fn population(&self) -> f64 {
        self.population
    }

    fn r0(&self) -> f64 {
        self.beta / self.gamma
    }
}

/// Susceptible–Exposed–Infected–Recovered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Seir {
    pub beta: f64,
    /// Incubation rate σ (1 / latent period).
    pub sigma: f64,
    pub gamma: f64,
    pub population: f64,
}

impl Seir {
    pub fn new(beta: f64, sigma: f64, gamma: f64, population: f64) -> CompartmentResult<Self> {
        check_rate("beta", beta)?;
        check_rate("sigma", sigma)?;
        check_rate("gamma", gamma)?;
        check_population(population)?;
        Ok(Seir { beta, sigma, gamma, population })
    }

    /// `[N − E₀ − I₀, E₀, I₀, 0]`.
    pub fn initial_state(&self, exposed: f64, infected: f64) -> Array1<f64> {
        array![self.population - exposed - infected, exposed, infected, 0.0]
    }
}

impl CompartmentalModel for Seir {
    fn labels(&self) -> &'static [&'static str] {
        &["S", "E", "I", "R"]
    }

    fn rhs(&self, y: ArrayView1<f64>, mut dy: ArrayViewMut1<f64>) {
        let infection = self.beta * y[0] * y[2] / self.population;
        let onset = self.sigma * y[1];
        let recovery = self.gamma * y[2];
        dy[0] = -infection;
        dy[1] = infection - onset;
        dy[2] = onset - recovery;
        dy[3] = recovery;
    }

    fn population(&self) -> f64 {
        self.population
    }

    fn r0(&self) -> f64 {
        self.beta / self.gamma
    }
}
