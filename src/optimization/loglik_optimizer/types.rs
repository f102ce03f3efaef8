//! Numeric aliases shared by the optimizer, the model layers, and inference.
//!
//! Parameters, gradients, and Hessians are plain `ndarray` containers over
//! `f64` so model code can build them without conversion.
use argmin::solver::{
    linesearch::{HagerZhangLineSearch, MoreThuenteLineSearch},
    quasinewton::LBFGS,
};
use ndarray::{Array1, Array2};
use std::collections::HashMap;

/// Unconstrained parameter vector θ.
pub type Theta = Array1<f64>;

/// Gradient with respect to θ.
pub type Grad = Array1<f64>;

pub type Hessian = Array2<f64>;

/// Scalar objective value; a log-likelihood in user code, its negation
/// inside the solver.
pub type Cost = f64;

/// argmin's evaluation counters, keyed by name (`cost_count`, ...).
pub type FnEvalMap = HashMap<String, u64>;

/// L-BFGS history length when `MLEOptions::lbfgs_mem` is `None`.
pub const DEFAULT_LBFGS_MEM: usize = 7;

pub type HagerZhangLS = HagerZhangLineSearch<Theta, Grad, Cost>;

pub type MoreThuenteLS = MoreThuenteLineSearch<Theta, Grad, Cost>;

pub type LbfgsHagerZhang = LBFGS<HagerZhangLS, Theta, Grad, Cost>;

pub type LbfgsMoreThuente = LBFGS<MoreThuenteLS, Theta, Grad, Cost>;
