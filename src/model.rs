//! Defines a `BayesNet`, a directed acyclic graphical model that represents the
//! factorization of a joint probability distribution into one CPT per variable.

use crate::factor::Factor;
use crate::init::Initialization;
use crate::util::{PearlError, Result};
use crate::variable::{Assignment, Variable};

use bidir_map::BidirMap;
use indexmap::IndexMap;

use std::collections::HashSet;

/// A Bayesian network over discrete `Variable`s.
///
/// # Representation
/// A traditional graph data structure is not used; instead the scope of each variable's
/// CPT implicitly defines the edges of the DAG. The CPT of a variable `X` has scope
/// `Pa(X) ∪ {X}` with `X` on the last table axis. Variables are held in insertion order,
/// and because the builder requires every parent to be present before its children, that
/// order is a topological order of the DAG.
pub struct BayesNet {
    /// The `Variable`s comprising the network and their associated CPTs, in declared
    /// (topological) order
    graph: IndexMap<Variable, Factor>,

    /// Two-way lookup between `Variable`s and their user-facing names
    names: BidirMap<Variable, String>,
}

impl BayesNet {
    /// Get the CPT for the given variable in this network
    pub fn cpd(&self, var: &Variable) -> Option<&Factor> {
        self.graph.get(var)
    }

    /// The parents of the given variable - its CPT scope minus itself
    pub fn parents(&self, var: &Variable) -> Vec<Variable> {
        match self.graph.get(var) {
            Some(cpt) => cpt.scope().into_iter().filter(|v| v != var).collect(),
            None => vec![],
        }
    }

    /// The declared (topological) order of the network's variables
    pub fn topological_order(&self) -> Vec<Variable> {
        self.graph.keys().cloned().collect()
    }

    /// Get all `Variable`s in the network
    pub fn variables(&self) -> HashSet<Variable> {
        self.graph.keys().cloned().collect()
    }

    /// Get the number of `Variable`s in the network
    pub fn num_variables(&self) -> usize {
        self.graph.len()
    }

    /// Lookup a `Variable` by its name
    pub fn lookup_variable(&self, name: &str) -> Option<&Variable> {
        self.names.get_by_second(&String::from(name))
    }

    /// Lookup a `Variable`'s name
    pub fn lookup_name(&self, var: &Variable) -> Option<&String> {
        self.names.get_by_first(var)
    }

    /// The conditional probability P(var = value | parents), with the parent values
    /// restricted from the given assignment.
    ///
    /// # Errors
    /// * `PearlError::MissingCpt` if the variable is not in the network
    /// * `PearlError::MissingAssignment` if a parent of `var` is unassigned
    pub fn probability_of(
        &self,
        var: &Variable,
        value: usize,
        assignment: &Assignment,
    ) -> Result<f64> {
        let cpt = self
            .graph
            .get(var)
            .ok_or_else(|| PearlError::MissingCpt(String::from(var.name())))?;

        let mut full = assignment.clone();
        full.set(var, value);
        cpt.value(&full)
    }

    /// The joint probability of a full `Assignment` to the network, by the chain rule
    pub fn joint_probability(&self, assignment: &Assignment) -> Result<f64> {
        self.graph
            .values()
            .map(|cpt| cpt.value(assignment))
            .try_fold(1.0, |acc, val| val.map(|v| acc * v))
    }
}

/// An implementation of the builder pattern for creating a `BayesNet`.
///
/// Variables must be added in topological order: every parent before any of its
/// children. The builder latches the first error it encounters and reports it from
/// `build`.
pub struct BayesNetBuilder {
    /// The `Variable`s and their associated CPTs
    factors: IndexMap<Variable, Factor>,

    /// The names of each `Variable`
    names: BidirMap<Variable, String>,

    /// The error state of the builder
    err: Option<PearlError>,
}

impl Default for BayesNetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl BayesNetBuilder {
    /// Construct a new `BayesNetBuilder` representing an empty network
    pub fn new() -> Self {
        BayesNetBuilder {
            factors: IndexMap::new(),
            names: BidirMap::new(),
            err: None,
        }
    }

    /// Add a `Variable` to the network.
    ///
    /// # Args
    /// * `var`: the variable to add
    /// * `parents`: the parent variables, in the order of the CPT's leading table axes.
    ///   The parents must already be in the network.
    /// * `init`: the initialization mechanism for the CPT of `var`
    pub fn with_variable(
        mut self,
        var: &Variable,
        parents: &[&Variable],
        init: Initialization,
    ) -> Self {
        // once in an error state, do nothing
        if self.err.is_some() {
            return self;
        }

        if let Some(missing) = parents.iter().find(|p| !self.factors.contains_key(**p)) {
            self.err = Some(PearlError::MissingParent {
                parent: String::from(missing.name()),
                child: String::from(var.name()),
            });
            return self;
        }

        if self.factors.contains_key(var) {
            self.err = Some(PearlError::DuplicateVariable(String::from(var.name())));
            return self;
        }

        match init.build_cpd(var, parents) {
            Ok(cpt) => {
                self.factors.insert(var.clone(), cpt);
                self.names.insert(var.clone(), String::from(var.name()));
            }
            Err(e) => self.err = Some(e),
        }

        self
    }

    /// Complete building the network.
    ///
    /// # Returns
    /// the `BayesNet`, or the first error generated during the building process
    pub fn build(self) -> Result<BayesNet> {
        match self.err {
            Some(e) => Err(e),
            None => Ok(BayesNet {
                graph: self.factors,
                names: self.names,
            }),
        }
    }
}

#[cfg(test)]
mod tests {

    use super::*;
    use ndarray::array;

    #[test]
    fn build_empty() {
        let model = BayesNetBuilder::new().build().unwrap();

        assert_eq!(model.num_variables(), 0);
        assert!(model.variables().is_empty());
    }

    #[test]
    /// A network with a single uniform binary variable
    fn build_simple() {
        let v = Variable::binary("V");
        let model = BayesNetBuilder::new()
            .with_variable(&v, &[], Initialization::Uniform)
            .build()
            .unwrap();

        let vars = model.variables();
        assert_eq!(1, vars.len());
        assert!(vars.contains(&v));
        assert_eq!(model.lookup_name(&v).unwrap(), "V");
        assert_eq!(model.lookup_variable("V").unwrap(), &v);
        assert!(model.parents(&v).is_empty());

        let f = model.cpd(&v).unwrap();
        assert_eq!(f.scope(), vec![v.clone()]);
        for value in 0..2 {
            let mut a = Assignment::new();
            a.set(&v, value);
            assert_eq!(0.5, f.value(&a).unwrap());
        }
    }

    #[test]
    fn missing_parent() {
        let a = Variable::binary("A");
        let b = Variable::binary("B");

        let result = BayesNetBuilder::new()
            .with_variable(&b, &[&a], Initialization::Uniform)
            .build();

        assert_eq!(
            result.err(),
            Some(PearlError::MissingParent {
                parent: String::from("A"),
                child: String::from("B")
            })
        );
    }

    #[test]
    fn duplicate_variable() {
        let a = Variable::binary("A");

        let result = BayesNetBuilder::new()
            .with_variable(&a, &[], Initialization::Uniform)
            .with_variable(&a, &[], Initialization::Uniform)
            .build();

        assert_eq!(
            result.err(),
            Some(PearlError::DuplicateVariable(String::from("A")))
        );
    }

    #[test]
    /// Example taken from Koller & Friedman Section 3.1.2
    fn intelligence() {
        let intelligence = Variable::binary("I");
        let sat = Variable::binary("S");

        let model = BayesNetBuilder::new()
            .with_variable(&intelligence, &[], Initialization::Multinomial(&[0.7, 0.3]))
            .with_variable(
                &sat,
                &[&intelligence],
                Initialization::Table(array![[0.95, 0.05], [0.2, 0.8]].into_dyn()),
            )
            .build()
            .unwrap();

        assert_eq!(2, model.num_variables());
        assert_eq!(model.parents(&sat), vec![intelligence.clone()]);
        assert_eq!(
            model.topological_order(),
            vec![intelligence.clone(), sat.clone()]
        );

        // conditional probabilities restricted from an assignment
        let mut a = Assignment::new();
        a.set(&intelligence, 1);
        assert_eq!(model.probability_of(&sat, 1, &a).unwrap(), 0.8);

        // joint probability by the chain rule
        let cases = [
            (0, 0, 0.7 * 0.95),
            (0, 1, 0.7 * 0.05),
            (1, 0, 0.3 * 0.2),
            (1, 1, 0.3 * 0.8),
        ];
        for (i, s, expected) in cases {
            let mut a = Assignment::new();
            a.set(&intelligence, i);
            a.set(&sat, s);
            assert!((model.joint_probability(&a).unwrap() - expected).abs() < 1e-12);
        }

        // partial assignments cannot be scored
        let mut a = Assignment::new();
        a.set(&intelligence, 1);
        assert!(model.joint_probability(&a).is_err());
    }

    #[test]
    fn probability_of_missing_parent_assignment() {
        let a = Variable::binary("A");
        let b = Variable::binary("B");

        let model = BayesNetBuilder::new()
            .with_variable(&a, &[], Initialization::Uniform)
            .with_variable(&b, &[&a], Initialization::Uniform)
            .build()
            .unwrap();

        // b's parent is unassigned
        let err = model.probability_of(&b, 0, &Assignment::new()).unwrap_err();
        assert_eq!(err, PearlError::MissingAssignment(String::from("A")));
    }

    #[test]
    fn probability_of_unknown_variable() {
        let a = Variable::binary("A");
        let model = BayesNetBuilder::new().build().unwrap();

        let err = model.probability_of(&a, 0, &Assignment::new()).unwrap_err();
        assert_eq!(err, PearlError::MissingCpt(String::from("A")));
    }
}
