//! `argmin` view of a [`LogLikelihood`]: cost `c(θ) = −ℓ(θ)`.
//!
//! Analytic gradients are negated; models without one are differentiated
//! numerically on the cost, which needs no sign flip.
use crate::optimization::{
    errors::{OptError, OptResult},
    loglik_optimizer::{
        finite_diff::fd_gradient,
        traits::LogLikelihood,
        types::{Cost, Grad, Theta},
        validation::{validate_grad, validate_value},
    },
};
use argmin::core::{CostFunction, Error, Gradient};

#[derive(Debug, Clone)]
pub struct ArgMinAdapter<'a, F: LogLikelihood> {
    pub f: &'a F,
    pub data: &'a F::Data,
}

impl<'a, F: LogLikelihood> ArgMinAdapter<'a, F> {
    pub fn new(f: &'a F, data: &'a F::Data) -> Self {
        Self { f, data }
    }

    /// `−ℓ(θ)`, rejecting non-finite log-likelihoods.
    fn neg_loglik(&self, theta: &Theta) -> OptResult<Cost> {
        let value = self.f.value(theta, self.data)?;
        validate_value(value)?;
        Ok(-value)
    }
}

impl<'a, F: LogLikelihood> CostFunction for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Output = Cost;

    fn cost(&self, theta: &Self::Param) -> Result<Self::Output, Error> {
        Ok(self.neg_loglik(theta)?)
    }
}

impl<'a, F: LogLikelihood> Gradient for ArgMinAdapter<'a, F> {
    type Param = Theta;
    type Gradient = Grad;

    /// `−∇ℓ(θ)` from the model, or a finite-difference gradient of the cost
    /// when the model reports `GradientNotImplemented`.
    fn gradient(&self, theta: &Self::Param) -> Result<Self::Gradient, Error> {
        match self.f.grad(theta, self.data) {
            Ok(g) => {
                validate_grad(&g, theta.len())?;
                Ok(-g)
            }
            Err(OptError::GradientNotImplemented) => {
                Ok(fd_gradient(theta, |t| self.neg_loglik(t))?)
            }
            Err(e) => Err(e.into()),
        }
    }
}
