//! Fixed-step classical Runge–Kutta integration of compartmental models.
//!
//! Purpose
//! -------
//! Advance any [`CompartmentalModel`] from an initial state over a uniform
//! grid and keep the full path, so incidence and conservation diagnostics
//! can be read off afterwards.
//!
//! Key behaviors
//! -------------
//! - Fourth-order RK4 with caller-chosen `dt` and step count. Stage buffers
//!   are allocated once per call and reused across steps.
//! - Each state is checked after every step; a negative or non-finite
//!   compartment stops the run with the step and compartment index.
//!
//! Invariants & assumptions
//! ------------------------
//! - Every RK4 stage is a combination of right-hand sides that sum to zero,
//!   so the population total drifts only by round-off.
//! - Row `k` of [`Trajectory::states`] is the state at `t = k·dt`.
use crate::compartmental::{
    errors::{CompartmentError, CompartmentResult},
    models::CompartmentalModel,
};
use ndarray::{Array1, Array2, ArrayView1, Zip, s};

/// Integrated path of a compartmental model.
///
/// Fields
/// ------
/// - `dt`: `f64`, step size.
/// - `labels`: compartment names in column order.
/// - `states`: `(n_steps + 1) × dim` matrix; row 0 is the initial state.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub dt: f64,
    pub labels: &'static [&'static str],
    pub states: Array2<f64>,
}

impl Trajectory {
    pub fn n_steps(&self) -> usize {
        self.states.nrows().saturating_sub(1)
    }

    /// Grid times `k·dt` for `k = 0..=n_steps`.
    pub fn times(&self) -> Array1<f64> {
        Array1::from_iter((0..self.states.nrows()).map(|k| k as f64 * self.dt))
    }

    /// Column for the compartment named `label`, if the model has one.
    pub fn compartment(&self, label: &str) -> Option<ArrayView1<'_, f64>> {
        let index = self.labels.iter().position(|&l| l == label)?;
        Some(self.states.column(index))
    }

    pub fn final_state(&self) -> ArrayView1<'_, f64> {
        self.states.row(self.states.nrows() - 1)
    }

    /// New infections per step, `S_k − S_{k+1}`.
    pub fn incidence(&self) -> Array1<f64> {
        let s = self.states.column(0);
        &s.slice(s![..-1]) - &s.slice(s![1..])
    }

    /// New infections per bin of `steps_per_bin` steps. A trailing partial
    /// bin is dropped.
    pub fn binned_incidence(&self, steps_per_bin: usize) -> Array1<f64> {
        if steps_per_bin == 0 {
            return Array1::zeros(0);
        }
        let s = self.states.column(0);
        let n_bins = self.n_steps() / steps_per_bin;
        Array1::from_iter(
            (0..n_bins).map(|b| s[b * steps_per_bin] - s[(b + 1) * steps_per_bin]),
        )
    }

    /// Largest absolute deviation of `Σ y` from its initial value.
    pub fn max_population_drift(&self) -> f64 {
        let totals = self.states.sum_axis(ndarray::Axis(1));
        let initial = totals[0];
        totals.iter().fold(0.0_f64, |acc, &t| acc.max((t - initial).abs()))
    }
}

/// Integrate `model` from `y0` for `n_steps` steps of size `dt`.
///
/// Errors
/// ------
/// - `StateLengthMismatch` when `y0.len() != model.dim()`.
/// - `InvalidStepSize` for non-finite or non-positive `dt`.
/// - `InvalidState { step, index, value }` for a negative or non-finite
///   compartment; `step = 0` refers to `y0`.
pub fn integrate_rk4<M: CompartmentalModel + ?Sized>(
    model: &M, y0: ArrayView1<f64>, dt: f64, n_steps: usize,
) -> CompartmentResult<Trajectory> {
    let dim = model.dim();
    if y0.len() != dim {
        return Err(CompartmentError::StateLengthMismatch { expected: dim, actual: y0.len() });
    }
    if !dt.is_finite() || dt <= 0.0 {
        return Err(CompartmentError::InvalidStepSize { value: dt });
    }
    check_state(0, y0)?;

    let mut states = Array2::<f64>::zeros((n_steps + 1, dim));
    states.row_mut(0).assign(&y0);
    let mut y = y0.to_owned();
    let mut k1 = Array1::<f64>::zeros(dim);
    let mut k2 = Array1::<f64>::zeros(dim);
    let mut k3 = Array1::<f64>::zeros(dim);
    let mut k4 = Array1::<f64>::zeros(dim);
    let mut stage = Array1::<f64>::zeros(dim);

    for step in 1..=n_steps {
        model.rhs(y.view(), k1.view_mut());
        stage.assign(&y);
        stage.scaled_add(0.5 * dt, &k1);
        model.rhs(stage.view(), k2.view_mut());
        stage.assign(&y);
        stage.scaled_add(0.5 * dt, &k2);
        model.rhs(stage.view(), k3.view_mut());
        stage.assign(&y);
        stage.scaled_add(dt, &k3);
        model.rhs(stage.view(), k4.view_mut());

        Zip::from(&mut y).and(&k1).and(&k2).and(&k3).and(&k4).for_each(|yi, &a, &b, &c, &d| {
            *yi += dt / 6.0 * (a + 2.0 * b + 2.0 * c + d);
        });
        check_state(step, y.view())?;
        states.row_mut(step).assign(&y);
    }

    Ok(Trajectory { dt, labels: model.labels(), states })
}

fn check_state(step: usize, y: ArrayView1<f64>) -> CompartmentResult<()> {
    match y.iter().enumerate().find(|(_, v)| !v.is_finite() || **v < 0.0) {
        Some((index, &value)) => Err(CompartmentError::InvalidState { step, index, value }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compartmental::models::{Seir, Sir};
    use approx::assert_relative_eq;
    use ndarray::{ArrayViewMut1, array};

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // These tests cover:
    // - Population conservation for SIR and SEIR.
    // - RK4 accuracy against the early-epidemic exponential solution.
    // - Incidence bookkeeping.
    // - Input and state validation.
    // -------------------------------------------------------------------------

    /// Linear drain `y' = −1`, used to force a negative state.
    struct Drain;

    impl CompartmentalModel for Drain {
        fn labels(&self) -> &'static [&'static str] {
            &["S"]
        }
        fn rhs(&self, _y: ArrayView1<f64>, mut dy: ArrayViewMut1<f64>) {
            dy[0] = -1.0;
        }
        fn population(&self) -> f64 {
            1.0
        }
        fn r0(&self) -> f64 {
            0.0
        }
    }

    #[test]
    // Purpose
    // -------
    // S + I + R and S + E + I + R stay constant under RK4.
    //
    // Given
    // -----
    // - N = 1e6, 2000 steps of dt = 0.1 through the full epidemic.
    //
    // Expect
    // ------
    // - Drift below 1e-6 · N for both models.
    fn rk4_conserves_population() {
        // Arrange
        let n = 1.0e6;
        let sir = Sir::new(0.3, 0.1, n).unwrap();
        let seir = Seir::new(0.5, 0.2, 0.1, n).unwrap();

        // Act
        let sir_path = integrate_rk4(&sir, sir.initial_state(100.0).view(), 0.1, 2000).unwrap();
        let seir_path =
            integrate_rk4(&seir, seir.initial_state(50.0, 100.0).view(), 0.1, 2000).unwrap();

        // Assert
        assert!(sir_path.max_population_drift() < 1e-6 * n);
        assert!(seir_path.max_population_drift() < 1e-6 * n);
        assert_relative_eq!(sir_path.final_state().sum(), n, max_relative = 1e-12);
        assert_eq!(sir_path.n_steps(), 2000);
    }

    #[test]
    // Purpose
    // -------
    // While S ≈ N, infections grow like `I₀ · exp((β − γ) t)`.
    fn rk4_matches_early_exponential_growth() {
        let sir = Sir::new(0.3, 0.1, 1.0e12).unwrap();
        let path = integrate_rk4(&sir, sir.initial_state(1.0).view(), 0.1, 100).unwrap();
        let infected = path.compartment("I").unwrap();
        assert_relative_eq!(infected[100], (0.2_f64 * 10.0).exp(), max_relative = 1e-6);
        assert!(path.compartment("E").is_none());
    }

    #[test]
    // Purpose
    // -------
    // Per-step incidence telescopes to the total drop in S, and bins sum
    // their steps.
    fn incidence_sums_to_susceptible_drop() {
        let sir = Sir::new(0.4, 0.1, 1.0e4).unwrap();
        let path = integrate_rk4(&sir, sir.initial_state(10.0).view(), 0.25, 40).unwrap();
        let inc = path.incidence();
        let s = path.compartment("S").unwrap();
        assert_eq!(inc.len(), 40);
        assert_relative_eq!(inc.sum(), s[0] - s[40], max_relative = 1e-12);

        let binned = path.binned_incidence(4);
        assert_eq!(binned.len(), 10);
        assert_relative_eq!(binned[2], inc.slice(s![8..12]).sum(), max_relative = 1e-12);
        assert!(inc.iter().all(|&x| x > 0.0));
        assert_relative_eq!(path.times()[40], 10.0);
    }

    #[test]
    fn rk4_rejects_bad_inputs() {
        let sir = Sir::new(0.3, 0.1, 100.0).unwrap();
        assert_eq!(
            integrate_rk4(&sir, array![1.0, 2.0].view(), 0.1, 10).unwrap_err(),
            CompartmentError::StateLengthMismatch { expected: 3, actual: 2 }
        );
        assert!(integrate_rk4(&sir, sir.initial_state(1.0).view(), 0.0, 10).is_err());
        assert_eq!(
            integrate_rk4(&sir, array![-1.0, 1.0, 0.0].view(), 0.1, 10).unwrap_err(),
            CompartmentError::InvalidState { step: 0, index: 0, value: -1.0 }
        );
    }

    #[test]
    // Purpose
    // -------
    // A state that crosses zero is reported with its step index.
    fn negative_state_reports_step() {
        let err = integrate_rk4(&Drain, array![1.5].view(), 1.0, 5).unwrap_err();
        assert_eq!(err, CompartmentError::InvalidState { step: 2, index: 0, value: -0.5 });
    }
}
