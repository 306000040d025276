//! Defines a forward sampler for `BayesNet`s: Prior-Sample, one joint draw from the
//! network's prior distribution.

use super::Sampler;
use crate::model::BayesNet;
use crate::util::Result;
use crate::variable::Assignment;

use rand::Rng;

/// A stateless-over-the-model `Sampler` that draws each variable in topological order,
/// conditioned on its already-sampled parents.
///
/// The random source is injected so runs can be reproduced with a seeded generator.
pub struct ForwardSampler<'a, R: Rng> {
    /// The `BayesNet` to sample
    model: &'a BayesNet,

    /// The random source
    rng: R,
}

impl<'a, R: Rng> ForwardSampler<'a, R> {
    pub fn new(model: &'a BayesNet, rng: R) -> Self {
        ForwardSampler { model, rng }
    }
}

impl<'a, R: Rng> Sampler for ForwardSampler<'a, R> {
    fn sample(&mut self) -> Result<Assignment> {
        let mut a = Assignment::new();

        // the declared order is topological, so every parent is sampled before its
        // children and the conditional lookups always have a full parent assignment
        for var in self.model.topological_order() {
            let mut weights = Vec::with_capacity(var.cardinality());
            for value in 0..var.cardinality() {
                weights.push(self.model.probability_of(&var, value, &a)?);
            }

            let value = pick(&weights, self.rng.gen::<f64>());
            a.set(&var, value);
        }

        Ok(a)
    }
}

/// Select the first value whose cumulative breakpoint exceeds the draw.
///
/// The weights of a CPT row sum to 1, but rounding can leave the final breakpoint just
/// below the draw; the last value is used in that case.
fn pick(weights: &[f64], draw: f64) -> usize {
    let mut cumulative = 0.0;
    for (value, w) in weights.iter().enumerate() {
        cumulative += w;
        if draw < cumulative {
            return value;
        }
    }

    weights.len() - 1
}
