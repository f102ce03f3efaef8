//! loglik_optimizer — L-BFGS maximum likelihood on top of `argmin`.
//!
//! Models implement [`LogLikelihood`] over an unconstrained vector θ and call
//! [`maximize`]. Internally the solver minimizes `c(θ) = −ℓ(θ)`; everything
//! returned to callers (including [`OptimOutcome::value`]) is in terms of
//! `ℓ`.
//!
//! Layout
//! ------
//! - [`adapter`]: `CostFunction` / `Gradient` view of a model.
//! - [`builders`]: L-BFGS with More–Thuente or Hager–Zhang line search.
//! - [`run`]: executor setup and outcome normalization.
//! - [`finite_diff`]: numerical gradients for models without `grad`, and
//!   the Hessian behind observed-information standard errors.
//! - [`validation`]: shape and finiteness checks shared with model code.
//!
//! Errors are [`OptError`](crate::optimization::errors::OptError) values
//! throughout; nothing here panics on bad input.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

pub use self::api::maximize;
pub use self::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
pub use self::types::{Cost, DEFAULT_LBFGS_MEM, FnEvalMap, Grad, Theta};

pub mod prelude {
    pub use super::api::maximize;
    pub use super::traits::{LineSearcher, LogLikelihood, MLEOptions, OptimOutcome, Tolerances};
    pub use super::types::{Cost, Grad, Theta};
}
