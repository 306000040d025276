//! pearl - exact and approximate inference over discrete Bayesian networks.
//!
//! A `BayesNet` is a DAG of identity-keyed, finite-domain `Variable`s with one
//! conditional probability table per variable. Given a query variable and a partial
//! evidence `Assignment`, the crate answers `P(query | evidence)` four ways:
//!
//! * [`enumeration_ask`] - exact, by recursive summation of the joint distribution;
//! * [`variable_elimination_ask`] - exact, by factor algebra (restrict, pointwise
//!   product, sum out);
//! * [`prior_sample`] - one joint draw from the prior, in topological order;
//! * [`rejection_sampling`] - a Monte Carlo posterior estimate that discards samples
//!   inconsistent with the evidence.

pub mod factor;
pub mod inference;
pub mod init;
pub mod model;
pub mod samplers;
pub mod util;
pub mod variable;

pub use factor::Factor;
pub use inference::{
    enumeration_ask, prior_sample, rejection_sampling, variable_elimination_ask, Distribution,
};
pub use init::Initialization;
pub use model::{BayesNet, BayesNetBuilder};
pub use util::{PearlError, Result};
pub use variable::{all_assignments, Assignment, Variable};
