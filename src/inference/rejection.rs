//! Approximate inference by rejection sampling: draw joint samples from the prior and
//! discard every sample that disagrees with the evidence; the survivors' query values
//! estimate the posterior.

use super::{Distribution, InferenceEngine};
use crate::model::BayesNet;
use crate::samplers::{ForwardSampler, Sampler};
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use log::debug;
use rand::Rng;

pub struct RejectionSamplingEngine<'a, R: Rng> {
    /// The network over which to perform inference
    model: &'a BayesNet,

    /// The number of prior samples to draw
    samples: usize,

    /// The random source, injected for reproducibility
    rng: R,
}

impl<'a, R: Rng> RejectionSamplingEngine<'a, R> {
    pub fn new(model: &'a BayesNet, samples: usize, rng: R) -> Self {
        RejectionSamplingEngine {
            model,
            samples,
            rng,
        }
    }
}

impl<'a, R: Rng> InferenceEngine for RejectionSamplingEngine<'a, R> {
    fn posterior(&mut self, query: &Variable, evidence: &Assignment) -> Result<Distribution> {
        if evidence.contains(query) {
            return Err(PearlError::QueryObserved(String::from(query.name())));
        }

        let mut tally = vec![0u64; query.cardinality()];
        let mut accepted = 0u64;

        let mut sampler = ForwardSampler::new(self.model, &mut self.rng);
        for _ in 0..self.samples {
            let sample = sampler.sample()?;

            let consistent = evidence.iter().all(|(v, val)| sample.get(v) == Some(val));
            if !consistent {
                continue;
            }

            let value = sample
                .get(query)
                .ok_or_else(|| PearlError::MissingCpt(String::from(query.name())))?;
            tally[value] += 1;
            accepted += 1;
        }

        debug!(
            "rejection sampling kept {}/{} samples",
            accepted, self.samples
        );

        if accepted == 0 {
            return Err(PearlError::NoConsistentSamples);
        }

        Distribution::from_weights(
            query.clone(),
            tally.into_iter().map(|count| count as f64).collect(),
        )
    }
}
