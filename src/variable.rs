//! Definition of the variable module
//!
//! A `Variable` represents a discrete random variable with a finite, ordered domain of
//! named values. An `Assignment` is a partial mapping of `Variable`s to values and doubles
//! as the evidence type for the inference engines.

use crate::util::{PearlError, Result};

use indexmap::IndexMap;

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Source of identity tokens for `Variable`s
static NEXT_ID: AtomicU64 = AtomicU64::new(0);

struct VariableInfo {
    /// The identity token. Equality and hashing use this and nothing else, so two
    /// `Variable`s that share a name and domain are still distinct.
    id: u64,

    /// The display name of the `Variable`
    name: String,

    /// The ordered domain of value labels. Values are addressed by their index in this list.
    labels: Vec<String>,
}

/// A discrete random variable.
///
/// `Variable`s are cheap to clone (the definition is shared behind an `Arc`) and compare
/// by identity, not by structure.
#[derive(Clone)]
pub struct Variable(Arc<VariableInfo>);

impl Variable {
    /// Construct a new `Variable` with the given domain of value labels.
    ///
    /// # Panics
    /// If the domain is empty or contains a duplicate label.
    pub fn new(name: &str, labels: &[&str]) -> Variable {
        assert!(
            !labels.is_empty(),
            "variable `{}` must have a non-empty domain",
            name
        );

        let labels: Vec<String> = labels.iter().map(|s| String::from(*s)).collect();
        for (i, label) in labels.iter().enumerate() {
            assert!(
                !labels[..i].contains(label),
                "variable `{}` has duplicate value `{}`",
                name,
                label
            );
        }

        Variable(Arc::new(VariableInfo {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            name: String::from(name),
            labels,
        }))
    }

    /// Construct a new boolean `Variable` with the domain `["false", "true"]`
    pub fn binary(name: &str) -> Variable {
        Variable::new(name, &["false", "true"])
    }

    /// The identity token of the `Variable`
    pub fn id(&self) -> u64 {
        self.0.id
    }

    /// Get the name of the `Variable`
    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// The number of values in the domain
    pub fn cardinality(&self) -> usize {
        self.0.labels.len()
    }

    /// The ordered value labels of the domain
    pub fn labels(&self) -> &[String] {
        &self.0.labels
    }

    /// The label of the value at the given index
    pub fn label(&self, value: usize) -> &str {
        &self.0.labels[value]
    }

    /// Find the value index for a label, if the label is in the domain
    pub fn index_of(&self, label: &str) -> Option<usize> {
        self.0.labels.iter().position(|l| l == label)
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.0.id == other.0.id
    }
}

impl Eq for Variable {}

impl Hash for Variable {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.id.hash(state);
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0.name)
    }
}

/// A partial mapping of `Variable`s to value indices.
///
/// Backed by an `IndexMap` so iteration order is the insertion order, which keeps
/// sampling and enumeration deterministic.
#[derive(Clone, Debug, Default)]
pub struct Assignment {
    values: IndexMap<Variable, usize>,
}

impl Assignment {
    pub fn new() -> Assignment {
        Assignment {
            values: IndexMap::new(),
        }
    }

    /// The number of assigned `Variable`s
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn contains(&self, var: &Variable) -> bool {
        self.values.contains_key(var)
    }

    /// Get the assigned value index of a `Variable`, if it has one
    pub fn get(&self, var: &Variable) -> Option<usize> {
        self.values.get(var).copied()
    }

    /// Get the assigned value label of a `Variable`, if it has one.
    ///
    /// The label borrows from the `Variable`'s shared definition, not from the
    /// assignment.
    pub fn label<'a>(&self, var: &'a Variable) -> Option<&'a str> {
        self.get(var).map(|v| var.label(v))
    }

    /// Assign a value index to a `Variable`.
    ///
    /// # Panics
    /// If the value index is outside the `Variable`'s domain.
    pub fn set(&mut self, var: &Variable, value: usize) {
        assert!(
            value < var.cardinality(),
            "invalid value ({}) for variable `{}` with cardinality {}",
            value,
            var.name(),
            var.cardinality()
        );

        self.values.insert(var.clone(), value);
    }

    /// Assign a value to a `Variable` by its domain label
    pub fn observe(&mut self, var: &Variable, label: &str) -> Result<()> {
        match var.index_of(label) {
            Some(value) => {
                self.values.insert(var.clone(), value);
                Ok(())
            }
            None => Err(PearlError::UnknownValue {
                variable: String::from(var.name()),
                value: String::from(label),
            }),
        }
    }

    /// Iterate over the assigned `(Variable, value index)` pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&Variable, usize)> {
        self.values.iter().map(|(v, &val)| (v, val))
    }
}

/// Produce every complete `Assignment` over the given scope - the Cartesian product of
/// the domains.
///
/// Built by iteratively extending the singleton set containing the empty assignment, one
/// variable at a time, by every value in that variable's domain. Yields exactly the
/// product of the cardinalities; an empty scope yields exactly one (empty) assignment.
pub fn all_assignments(scope: &[Variable]) -> Vec<Assignment> {
    let mut assignments = vec![Assignment::new()];

    for var in scope {
        let mut extended = Vec::with_capacity(assignments.len() * var.cardinality());
        for assignment in &assignments {
            for value in 0..var.cardinality() {
                let mut a = assignment.clone();
                a.set(var, value);
                extended.push(a);
            }
        }

        assignments = extended;
    }

    assignments
}

// Unit Tests for the variable module
#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn identity_not_structure() {
        let a = Variable::binary("Foo");
        let b = Variable::binary("Foo");

        // same name, same domain - still different variables
        assert_ne!(a, b);
        assert_eq!(a, a.clone());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn domain_accessors() {
        let grade = Variable::new("Grade", &["a", "b", "c"]);

        assert_eq!(grade.name(), "Grade");
        assert_eq!(grade.cardinality(), 3);
        assert_eq!(grade.label(1), "b");
        assert_eq!(grade.index_of("c"), Some(2));
        assert_eq!(grade.index_of("d"), None);
    }

    #[test]
    #[should_panic]
    fn empty_domain() {
        Variable::new("Foo", &[]);
    }

    #[test]
    #[should_panic]
    fn duplicate_label() {
        Variable::new("Foo", &["x", "y", "x"]);
    }

    #[test]
    fn assignment() {
        let a = Variable::binary("A");
        let b = Variable::new("B", &["low", "mid", "high"]);

        let mut assn = Assignment::new();
        assert!(assn.is_empty());
        assert_eq!(assn.get(&a), None);

        assn.set(&a, 1);
        assn.observe(&b, "mid").unwrap();

        assert_eq!(assn.len(), 2);
        assert_eq!(assn.get(&a), Some(1));
        assert_eq!(assn.get(&b), Some(1));
        assert_eq!(assn.label(&b), Some("mid"));
        assert!(assn.contains(&a));
    }

    #[test]
    /// The label borrows from the variable, so it stays valid after the
    /// assignment that produced it is gone
    fn label_outlives_assignment() {
        let b = Variable::new("B", &["low", "mid", "high"]);

        let label = {
            let mut assn = Assignment::new();
            assn.observe(&b, "mid").unwrap();
            assn.label(&b).unwrap()
        };

        assert_eq!(label, "mid");
    }

    #[test]
    fn observe_unknown_value() {
        let b = Variable::new("B", &["low", "mid", "high"]);

        let mut assn = Assignment::new();
        let err = assn.observe(&b, "extreme").unwrap_err();
        assert_eq!(
            err,
            PearlError::UnknownValue {
                variable: String::from("B"),
                value: String::from("extreme")
            }
        );
    }

    #[test]
    #[should_panic]
    fn set_out_of_range() {
        let a = Variable::binary("A");

        let mut assn = Assignment::new();
        assn.set(&a, 2);
    }

    #[test]
    fn all_assignments_product() {
        let a = Variable::binary("A");
        let b = Variable::new("B", &["1", "2", "3", "4", "5"]);
        let c = Variable::new("C", &["x", "y", "z"]);

        let scope = vec![a.clone(), b.clone(), c.clone()];
        let assignments = all_assignments(&scope);

        assert_eq!(assignments.len(), 2 * 5 * 3);
        for assn in &assignments {
            assert_eq!(assn.len(), 3);
            assert!(assn.get(&a).unwrap() < 2);
            assert!(assn.get(&b).unwrap() < 5);
            assert!(assn.get(&c).unwrap() < 3);
        }
    }

    #[test]
    fn all_assignments_empty_scope() {
        let assignments = all_assignments(&[]);

        assert_eq!(assignments.len(), 1);
        assert!(assignments[0].is_empty());
    }
}
