//! optimization — maximum-likelihood machinery shared by the Hawkes and
//! compartmental models.
//!
//! - `loglik_optimizer`: the [`LogLikelihood`](loglik_optimizer::LogLikelihood)
//!   trait and the L-BFGS driver.
//! - `numerical_stability`: softplus / logistic maps between θ-space and
//!   positive model parameters.
//! - `errors`: [`OptError`](errors::OptError), the one error type callers of
//!   the optimizer see. Model-layer errors convert into it with `?`.
//!
//! ```
//! use outbreak_models::optimization::prelude::*;
//!
//! let tols = Tolerances::new(Some(1e-6), None, Some(200))?;
//! let opts = MLEOptions::new(tols, "HagerZhang".parse()?, false, None)?;
//! assert_eq!(opts.line_searcher, LineSearcher::HagerZhang);
//! # Ok::<(), OptError>(())
//! ```

pub mod errors;
pub mod loglik_optimizer;
pub mod numerical_stability;

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::loglik_optimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
