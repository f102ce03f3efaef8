//! Fitted Hawkes models built on the core evaluators.

pub mod hawkes;

pub use self::hawkes::HawkesModel;
