//! compartmental — deterministic SIR/SEIR models, RK4 integration, and
//! incidence-count likelihoods.
//!
//! Purpose
//! -------
//! Provide the population-level counterpart to the Hawkes module: ODE
//! epidemic models with conserved population, a fixed-step integrator, and
//! a negative-binomial count model used to fit transmission rates.
//!
//! Key behaviors
//! -------------
//! - [`Sir`] and [`Seir`] implement [`CompartmentalModel`].
//! - [`integrate_rk4`] returns a [`Trajectory`] with incidence and
//!   conservation diagnostics.
//! - [`SirIncidenceModel`] implements
//!   [`LogLikelihood`](crate::optimization::loglik_optimizer::LogLikelihood)
//!   and is fitted through the shared L-BFGS optimizer.
//!
//! Conventions
//! -----------
//! - Compartment 0 is `S` in every model.
//! - Errors are [`CompartmentError`]; they convert into
//!   [`OptError`](crate::optimization::errors::OptError) with `?`.

pub mod errors;
pub mod fit;
pub mod integrate;
pub mod models;
pub mod observation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::errors::{CompartmentError, CompartmentResult};
pub use self::fit::{IncidenceData, SirIncidenceModel};
pub use self::integrate::{Trajectory, integrate_rk4};
pub use self::models::{CompartmentalModel, Seir, Sir};
pub use self::observation::NegBinomialObs;

pub mod prelude {
    pub use super::errors::{CompartmentError, CompartmentResult};
    pub use super::fit::{IncidenceData, SirIncidenceModel};
    pub use super::integrate::{Trajectory, integrate_rk4};
    pub use super::models::{CompartmentalModel, Seir, Sir};
    pub use super::observation::NegBinomialObs;
}
