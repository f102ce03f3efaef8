//! Integration tests for the Hawkes and compartmental pipelines.
//!
//! Purpose
//! -------
//! - Hawkes: simulate a path, cross-check the O(N) recursion against the
//!   pairwise oracle, fit by maximum likelihood, compute standard errors,
//!   and check the time-rescaling residuals.
//! - Compartmental: integrate SIR/SEIR over a full epidemic wave and score
//!   incidence counts with the negative-binomial likelihood.
//!
//! Exclusions
//! ----------
//! - Edge cases of the individual evaluators; those live in unit tests.
//! - Python bindings.
use approx::assert_relative_eq;
use ndarray::Array1;
use outbreak_models::{
    compartmental::{
        CompartmentalModel, IncidenceData, NegBinomialObs, Seir, Sir, SirIncidenceModel,
        integrate_rk4,
    },
    hawkes::{
        HawkesModel, HawkesOptions, HawkesParams, KsOutcome, SimOptions, loglik, loglik_and_grad,
        loglik_pairwise, rescaled_times, simulate,
    },
    optimization::loglik_optimizer::{LineSearcher, LogLikelihood, MLEOptions, Tolerances},
};

fn hawkes_options(line_searcher: LineSearcher) -> HawkesOptions {
    let tols = Tolerances::new(Some(1e-4), Some(1e-10), Some(300)).unwrap();
    HawkesOptions::new(MLEOptions::new(tols, line_searcher, false, None).unwrap())
}

#[test]
// Purpose
// -------
// On a simulated path of a few hundred events the recursion and the pairwise
// oracle agree, and the gradient matches central differences of the value.
//
// Given
// -----
// - mu = 0.4, alpha = 1.0, delta = 2.0 on [0, 400], seed 3.
//
// Expect
// ------
// - Relative agreement of values to 1e-9.
// - Gradient agreement to 1e-4 relative.
fn recursion_matches_oracle_on_simulated_path() {
    // Arrange
    let truth = HawkesParams::new(0.4, 1.0, 2.0).unwrap();
    let data = simulate(&truth, 400.0, &SimOptions::new(3)).unwrap();
    let trial = HawkesParams::new(0.6, 0.7, 1.5).unwrap();

    // Act
    let fast = loglik(&trial, &data).unwrap();
    let slow = loglik_pairwise(&trial, &data).unwrap();
    let (value, grad) = loglik_and_grad(&trial, &data).unwrap();

    // Assert
    assert!(data.n_events() > 100, "n = {}", data.n_events());
    assert_relative_eq!(fast, slow, max_relative = 1e-9);
    assert_relative_eq!(value, fast);
    let h = 1e-6;
    let bumped = |i: usize, s: f64| {
        let mut p = trial.as_array();
        p[i] += s * h;
        HawkesParams::new(p[0], p[1], p[2]).and_then(|q| loglik(&q, &data)).unwrap()
    };
    for i in 0..3 {
        let numeric = (bumped(i, 1.0) - bumped(i, -1.0)) / (2.0 * h);
        assert_relative_eq!(grad[i], numeric, epsilon = 1e-5, max_relative = 1e-4);
    }
}

#[test]
// Purpose
// -------
// Full Hawkes workflow: simulate, fit with both line searches, standard
// errors, and goodness of fit.
//
// Given
// -----
// - mu = 0.3, alpha = 1.2, delta = 2.0 (branching ratio 0.6), T = 3000.
//
// Expect
// ------
// - Both line searches land on the same optimum.
// - Fitted branching ratio within 0.15 of 0.6.
// - Positive finite SEs, with the truth for mu inside 4 SEs.
// - Residuals at the fit pass a KS test at the 0.1% level and average ~1.
fn hawkes_fit_pipeline_recovers_parameters() {
    // Arrange
    let truth = HawkesParams::new(0.3, 1.2, 2.0).unwrap();
    let data = simulate(&truth, 3000.0, &SimOptions::new(2024)).unwrap();
    let theta0 = HawkesModel::default_theta0(&data).unwrap();
    let mut mt = HawkesModel::new(hawkes_options(LineSearcher::MoreThuente));
    let mut hz = HawkesModel::new(hawkes_options(LineSearcher::HagerZhang));

    // Act
    mt.fit(theta0.clone(), &data).unwrap();
    hz.fit(theta0, &data).unwrap();
    let fitted = *mt.params().unwrap();
    let se = mt.standard_errors(&data).unwrap();
    let residuals = rescaled_times(&fitted, &data.events).unwrap();
    let ks = KsOutcome::ks_exponential(residuals.as_slice().unwrap()).unwrap();

    // Assert
    let ll_mt = mt.results.as_ref().unwrap().value;
    let ll_hz = hz.results.as_ref().unwrap().value;
    assert_relative_eq!(ll_mt, ll_hz, max_relative = 1e-6);
    assert!((fitted.branching_ratio() - 0.6).abs() < 0.15, "n_hat = {}", fitted.branching_ratio());
    assert!(se.iter().all(|s| s.is_finite() && *s > 0.0), "se = {se}");
    assert!((fitted.mu - 0.3).abs() < 4.0 * se[0], "mu_hat = {}, se = {}", fitted.mu, se[0]);
    assert_eq!(ks.n(), data.n_events());
    assert!(ks.p_value() > 1e-3, "KS p = {}", ks.p_value());
    assert!((residuals.mean().unwrap() - 1.0).abs() < 0.1);
}

#[test]
// Purpose
// -------
// A full epidemic wave conserves population and ends with S below the
// herd-immunity threshold N / R0.
//
// Given
// -----
// - SIR with beta = 0.4, gamma = 0.1 (R0 = 4); SEIR adds sigma = 0.25.
// - N = 1e6, 10 initial infections, 400 days at dt = 0.05.
//
// Expect
// ------
// - Maximum drift of Σ y below 1e-6 relative.
// - Final S < N / R0 and incidence sums to S₀ − S_T.
fn compartmental_wave_conserves_population() {
    let n = 1.0e6;
    let sir = Sir::new(0.4, 0.1, n).unwrap();
    let seir = Seir::new(0.4, 0.25, 0.1, n).unwrap();
    let runs = [
        integrate_rk4(&sir, sir.initial_state(10.0).view(), 0.05, 8000).unwrap(),
        integrate_rk4(&seir, seir.initial_state(0.0, 10.0).view(), 0.05, 8000).unwrap(),
    ];
    for (path, r0) in runs.iter().zip([sir.r0(), seir.r0()]) {
        let s = path.compartment("S").unwrap();
        assert!(path.max_population_drift() / n < 1e-6);
        assert!(s[path.n_steps()] < n / r0);
        assert_relative_eq!(path.incidence().sum(), s[0] - s[path.n_steps()], max_relative = 1e-9);
    }
}

#[test]
// Purpose
// -------
// Perturbed incidence counts score best near the generating rates and the
// incidence fit moves towards them.
//
// Given
// -----
// - beta = 0.45, gamma = 0.15, N = 2e5, I₀ = 20, 50 daily windows.
// - Counts: expected incidence times (1 + 0.1·sin k), rounded.
//
// Expect
// ------
// - ℓ(truth) exceeds ℓ at rates 20% off in either direction.
// - The fit does not decrease ℓ from its start and lands within 0.1 of beta.
fn incidence_likelihood_peaks_near_generating_rates() {
    // Arrange
    let tols = Tolerances::new(Some(1e-2), Some(1e-7), Some(200)).unwrap();
    let opts = MLEOptions::new(tols, LineSearcher::MoreThuente, false, Some(5)).unwrap();
    let mut model =
        SirIncidenceModel::new(2.0e5, 20.0, NegBinomialObs::new(20.0).unwrap(), 1.0, opts)
            .unwrap();
    let truth = Sir::new(0.45, 0.15, 2.0e5).unwrap();
    let clean = model.expected_incidence(&truth, 50).unwrap();
    let counts = Array1::from_iter(
        clean.iter().enumerate().map(|(k, m)| (m * (1.0 + 0.1 * (k as f64).sin())).round()),
    );
    let data = IncidenceData::new(counts).unwrap();
    let at = |beta: f64, gamma: f64| {
        let theta = SirIncidenceModel::theta_from_rates(beta, gamma).unwrap();
        model.value(&theta, &data).unwrap()
    };

    // Act
    let ll_truth = at(0.45, 0.15);
    let ll_neighbours = [at(0.54, 0.15), at(0.36, 0.15), at(0.45, 0.18), at(0.45, 0.12)];
    let theta0 = SirIncidenceModel::theta_from_rates(0.35, 0.12).unwrap();
    let ll0 = model.value(&theta0, &data).unwrap();
    model.fit(theta0, &data).unwrap();

    // Assert
    assert!(ll_neighbours.iter().all(|ll| *ll < ll_truth), "{ll_truth} vs {ll_neighbours:?}");
    assert!(model.results.as_ref().unwrap().value >= ll0);
    let beta_hat = model.fitted_sir().unwrap().beta;
    assert!((beta_hat - 0.45).abs() < 0.1, "beta_hat = {beta_hat}");
}
