//! Exact inference by variable elimination: one factor per variable (its CPT restricted
//! to the evidence), hidden variables summed out one at a time, remaining factors
//! multiplied into the query marginal.
//!
//! Sum-Product-VE in the style of Koller & Friedman Algorithm 9.1.

use super::{Distribution, InferenceEngine};
use crate::factor::Factor;
use crate::model::BayesNet;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use log::debug;

use std::collections::{HashMap, HashSet};

/// Strategy deciding the order in which hidden variables are summed out.
///
/// The order does not change the result, only the size of the intermediate factors.
pub trait EliminationOrdering {
    /// The hidden variables - neither the query nor in evidence - in elimination order
    fn order(&self, model: &BayesNet, query: &Variable, evidence: &Assignment)
        -> Vec<Variable>;
}

/// Eliminate in the network's declared variable order.
///
/// The default. No reordering heuristic is applied, so the intermediate factors are
/// exactly those implied by the construction order of the network.
pub struct DeclaredOrder;

impl EliminationOrdering for DeclaredOrder {
    fn order(
        &self,
        model: &BayesNet,
        query: &Variable,
        evidence: &Assignment,
    ) -> Vec<Variable> {
        model
            .topological_order()
            .into_iter()
            .filter(|v| v != query && !evidence.contains(v))
            .collect()
    }
}

/// Order hidden variables by the max-cardinality heuristic over the evidence-reduced
/// factor scopes.
pub struct MaxCardinality;

impl EliminationOrdering for MaxCardinality {
    fn order(
        &self,
        model: &BayesNet,
        query: &Variable,
        evidence: &Assignment,
    ) -> Vec<Variable> {
        let hidden: Vec<Variable> = model
            .topological_order()
            .into_iter()
            .filter(|v| v != query && !evidence.contains(v))
            .collect();

        // the reduced factor scopes define the moralized neighbor structure
        let mut neighbors: HashMap<Variable, HashSet<Variable>> = model
            .variables()
            .into_iter()
            .map(|v| (v, HashSet::new()))
            .collect();

        for var in model.topological_order() {
            let scope = match model.cpd(&var) {
                Some(cpt) => cpt.reduce(evidence).scope(),
                None => continue,
            };

            for i in 0..scope.len() {
                for j in (i + 1)..scope.len() {
                    neighbors
                        .get_mut(&scope[i])
                        .expect("scope variables are in the network")
                        .insert(scope[j].clone());
                    neighbors
                        .get_mut(&scope[j])
                        .expect("scope variables are in the network")
                        .insert(scope[i].clone());
                }
            }
        }

        // repeatedly pick the unmarked variable with the most marked neighbors
        let mut marked: HashSet<Variable> = HashSet::new();
        let mut elimination = Vec::with_capacity(hidden.len());

        for _ in 0..hidden.len() {
            let mut best: Option<(usize, usize)> = None;

            for (idx, v) in hidden.iter().enumerate() {
                if marked.contains(v) {
                    continue;
                }

                let count = neighbors[v].iter().filter(|n| marked.contains(*n)).count();
                match best {
                    Some((_, max)) if count <= max => {}
                    _ => best = Some((idx, count)),
                }
            }

            // invariant: one unmarked variable remains per iteration
            let (idx, _) = best.expect("an unmarked hidden variable remains");
            elimination.push(hidden[idx].clone());
            marked.insert(hidden[idx].clone());
        }

        // max-cardinality produces a reverse elimination order
        elimination.reverse();
        elimination
    }
}

pub struct VariableEliminationEngine<'a, O: EliminationOrdering = DeclaredOrder> {
    /// The network over which to perform inference
    model: &'a BayesNet,

    /// The elimination-ordering strategy
    ordering: O,
}

impl<'a> VariableEliminationEngine<'a, DeclaredOrder> {
    /// An engine that eliminates in the network's declared order
    pub fn new(model: &'a BayesNet) -> Self {
        VariableEliminationEngine {
            model,
            ordering: DeclaredOrder,
        }
    }
}

impl<'a, O: EliminationOrdering> VariableEliminationEngine<'a, O> {
    /// An engine with an injected elimination-ordering strategy
    pub fn with_ordering(model: &'a BayesNet, ordering: O) -> Self {
        VariableEliminationEngine { model, ordering }
    }
}

impl<'a, O: EliminationOrdering> InferenceEngine for VariableEliminationEngine<'a, O> {
    fn posterior(&mut self, query: &Variable, evidence: &Assignment) -> Result<Distribution> {
        if evidence.contains(query) {
            return Err(PearlError::QueryObserved(String::from(query.name())));
        }

        // one factor per variable: its CPT restricted to the evidence. Fully-observed
        // CPTs reduce to constants and are kept - a zero constant is what makes
        // contradictory evidence reach the normalizer.
        let mut factors: Vec<Factor> = self
            .model
            .topological_order()
            .iter()
            .map(|v| {
                self.model
                    .cpd(v)
                    .expect("every declared variable has a CPT")
                    .reduce(evidence)
            })
            .collect();

        for var in self.ordering.order(self.model, query, evidence) {
            let (mentioning, rest): (Vec<Factor>, Vec<Factor>) = factors
                .into_iter()
                .partition(|f| f.scope().contains(&var));

            factors = rest;
            if mentioning.is_empty() {
                // nothing mentions the variable; leave the factor set unchanged
                continue;
            }

            // product step - multiply the factors that mention var
            let psi = mentioning
                .iter()
                .fold(Factor::identity(), |acc, phi| acc.product(phi));

            // sum step - marginalize var out of the product
            let tau = psi.marginalize(&var);

            debug!(
                "eliminated `{}`: {} factor(s) -> scope {:?}",
                var.name(),
                mentioning.len(),
                tau.scope()
            );

            factors.push(tau);
        }

        // multiply the remaining factors into the unnormalized query marginal
        let phi_star = factors
            .iter()
            .fold(Factor::identity(), |acc, phi| acc.product(phi));

        // invariant: everything except the query has been summed out or fixed
        let scope = phi_star.scope();
        if scope.len() != 1 || scope[0] != *query {
            return Err(PearlError::EliminationMismatch {
                scope: scope.iter().map(|v| String::from(v.name())).collect(),
            });
        }

        let mut weights = Vec::with_capacity(query.cardinality());
        for value in 0..query.cardinality() {
            let mut assn = Assignment::new();
            assn.set(query, value);
            weights.push(
                phi_star
                    .value(&assn)
                    .expect("the final factor is over the query variable"),
            );
        }

        Distribution::from_weights(query.clone(), weights)
    }
}
