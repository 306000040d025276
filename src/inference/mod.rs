//! Defines the interface to the inference engines.
//!
//! Each engine answers conditional probability queries of the form `P(X | E = e)` over a
//! `BayesNet`. A caller hands the query variable, the evidence, and the network to
//! exactly one engine; engines do not call each other.

use crate::model::BayesNet;
use crate::samplers::{ForwardSampler, Sampler};
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use rand::Rng;

mod enumeration;
mod rejection;
mod variable_elimination;

pub use self::enumeration::EnumerationEngine;
pub use self::rejection::RejectionSamplingEngine;
pub use self::variable_elimination::{
    DeclaredOrder, EliminationOrdering, MaxCardinality, VariableEliminationEngine,
};

/// A normalized distribution over the domain of a single `Variable`
#[derive(Clone, Debug)]
pub struct Distribution {
    variable: Variable,
    probabilities: Vec<f64>,
}

impl Distribution {
    /// Normalize unnormalized weights (one per domain value) into a `Distribution`.
    ///
    /// # Errors
    /// `PearlError::ContradictoryEvidence` if the weights sum to zero (or the sum is not
    /// finite) - the posterior is undefined and must never be reported as NaN.
    pub(crate) fn from_weights(variable: Variable, weights: Vec<f64>) -> Result<Distribution> {
        debug_assert_eq!(weights.len(), variable.cardinality());

        let total: f64 = weights.iter().sum();
        if !total.is_finite() || total <= 0.0 {
            return Err(PearlError::ContradictoryEvidence);
        }

        Ok(Distribution {
            variable,
            probabilities: weights.into_iter().map(|w| w / total).collect(),
        })
    }

    /// The `Variable` this distribution is over
    pub fn variable(&self) -> &Variable {
        &self.variable
    }

    /// The probabilities, indexed by domain value
    pub fn probabilities(&self) -> &[f64] {
        &self.probabilities
    }

    /// The probability of the value at the given domain index
    pub fn probability_of_index(&self, value: usize) -> f64 {
        self.probabilities[value]
    }

    /// The probability of the value with the given domain label
    pub fn probability(&self, label: &str) -> Result<f64> {
        match self.variable.index_of(label) {
            Some(value) => Ok(self.probabilities[value]),
            None => Err(PearlError::UnknownValue {
                variable: String::from(self.variable.name()),
                value: String::from(label),
            }),
        }
    }

    /// Iterate over `(label, probability)` pairs in domain order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.variable
            .labels()
            .iter()
            .map(|l| l.as_str())
            .zip(self.probabilities.iter().copied())
    }
}

/// An `InferenceEngine` answers conditional probability queries `P(X | E = e)`
pub trait InferenceEngine {
    /// The posterior distribution of the query variable given the evidence
    fn posterior(&mut self, query: &Variable, evidence: &Assignment) -> Result<Distribution>;
}

/// Compute `P(query | evidence)` by recursive enumeration of the full joint distribution.
///
/// Exponential in the number of hidden variables; exact.
pub fn enumeration_ask(
    query: &Variable,
    evidence: &Assignment,
    model: &BayesNet,
) -> Result<Distribution> {
    EnumerationEngine::new(model).posterior(query, evidence)
}

/// Compute `P(query | evidence)` exactly via factor algebra (variable elimination).
///
/// Agrees with `enumeration_ask` up to floating-point tolerance.
pub fn variable_elimination_ask(
    query: &Variable,
    evidence: &Assignment,
    model: &BayesNet,
) -> Result<Distribution> {
    VariableEliminationEngine::new(model).posterior(query, evidence)
}

/// Draw one full joint sample from the network's prior distribution
pub fn prior_sample<R: Rng>(model: &BayesNet, rng: &mut R) -> Result<Assignment> {
    ForwardSampler::new(model, rng).sample()
}

/// Estimate `P(query | evidence)` by drawing `samples` prior samples and rejecting those
/// inconsistent with the evidence
pub fn rejection_sampling<R: Rng>(
    query: &Variable,
    evidence: &Assignment,
    model: &BayesNet,
    samples: usize,
    rng: &mut R,
) -> Result<Distribution> {
    RejectionSamplingEngine::new(model, samples, rng).posterior(query, evidence)
}
