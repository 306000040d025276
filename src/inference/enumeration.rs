//! Exact inference by enumeration: recursive summation of the joint distribution,
//! restricted by the evidence.
//!
//! Exponential in the number of hidden variables; it exists as the semantic baseline the
//! factor-algebra and sampling engines are checked against.

use super::{Distribution, InferenceEngine};
use crate::model::BayesNet;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

pub struct EnumerationEngine<'a> {
    /// The network over which to perform inference
    model: &'a BayesNet,
}

impl<'a> EnumerationEngine<'a> {
    pub fn new(model: &'a BayesNet) -> Self {
        EnumerationEngine { model }
    }

    /// Sum the joint probability of the evidence over every completion of the remaining
    /// variables.
    ///
    /// The variables arrive in the network's declared (topological) order, so the parents
    /// of the head variable are always assigned when its CPT is consulted - provided the
    /// caller upholds the evidence invariant (parents of evidence variables are in
    /// evidence); a violation surfaces as a `MissingAssignment` lookup failure.
    fn enumerate_all(&self, vars: &[Variable], evidence: &Assignment) -> Result<f64> {
        let (y, rest) = match vars.split_first() {
            Some(split) => split,
            None => return Ok(1.0),
        };

        if let Some(value) = evidence.get(y) {
            let p = self.model.probability_of(y, value, evidence)?;
            Ok(p * self.enumerate_all(rest, evidence)?)
        } else {
            let mut total = 0.0;
            for value in 0..y.cardinality() {
                let mut extended = evidence.clone();
                extended.set(y, value);

                let p = self.model.probability_of(y, value, &extended)?;
                total += p * self.enumerate_all(rest, &extended)?;
            }

            Ok(total)
        }
    }
}

impl<'a> InferenceEngine for EnumerationEngine<'a> {
    fn posterior(&mut self, query: &Variable, evidence: &Assignment) -> Result<Distribution> {
        if evidence.contains(query) {
            return Err(PearlError::QueryObserved(String::from(query.name())));
        }

        if self.model.cpd(query).is_none() {
            return Err(PearlError::MissingCpt(String::from(query.name())));
        }

        let order = self.model.topological_order();

        let mut weights = Vec::with_capacity(query.cardinality());
        for value in 0..query.cardinality() {
            let mut extended = evidence.clone();
            extended.set(query, value);
            weights.push(self.enumerate_all(&order, &extended)?);
        }

        Distribution::from_weights(query.clone(), weights)
    }
}
