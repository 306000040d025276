//! Definition of the factor module
//!
//! A `Factor` maps every joint assignment of some scope of `Variable`s to a non-negative
//! real. Factors are created by restricting a CPT to evidence, by pointwise product, or by
//! summing a variable out; they live only for the duration of a single inference call.

use crate::util::{PearlError, Result};
use crate::variable::{all_assignments, Assignment, Variable};

use itertools::Itertools;
use ndarray::prelude as nd;
use ndarray::Axis;

/// Alias f64 ndarray::Array as Table
pub type Table = nd::ArrayD<f64>;

#[derive(Clone, Debug)]
pub enum Factor {
    /// A scope-free factor holding a single value. `Constant(1.0)` is the multiplicative
    /// identity; reducing a table by a complete assignment yields the looked-up value as a
    /// `Constant`, so a zero-probability evidence row is not lost on the way to the
    /// normalizer.
    Constant(f64),

    /// A factor over a non-empty scope, represented as a dense table with one axis per
    /// scope variable (axis length = cardinality, values addressed by domain index).
    TableFactor {
        /// The scope of the `Factor`
        scope: Vec<Variable>,

        /// The values of the `Factor` table
        table: Table,
    },
}

impl Factor {
    /// Get the identity factor
    pub fn identity() -> Self {
        Factor::Constant(1.0)
    }

    /// Create a new table `Factor`, validating the scope/table shape.
    pub fn new(scope: Vec<Variable>, table: Table) -> Result<Self> {
        if scope.is_empty() {
            return Err(PearlError::InvalidFactor(String::from(
                "scope may not be empty",
            )));
        }

        if scope.iter().unique().count() != scope.len() {
            return Err(PearlError::InvalidFactor(String::from(
                "scope contains a duplicate variable",
            )));
        }

        if scope.len() != table.ndim() {
            return Err(PearlError::InvalidFactor(String::from(
                "number of table dimensions must match the scope",
            )));
        }

        for (v, t) in scope.iter().zip(table.shape().iter()) {
            if v.cardinality() != *t {
                return Err(PearlError::InvalidFactor(format!(
                    "axis length {} does not match the cardinality of `{}`",
                    t,
                    v.name()
                )));
            }
        }

        if table.iter().any(|v| !v.is_finite() || *v < 0.0) {
            return Err(PearlError::InvalidFactor(String::from(
                "table values must be finite and non-negative",
            )));
        }

        Ok(Factor::TableFactor { scope, table })
    }

    /// Internal constructor for results of factor algebra, which satisfy the `new`
    /// invariants by construction.
    fn from_parts(scope: Vec<Variable>, table: Table) -> Self {
        Factor::TableFactor { scope, table }
    }

    pub fn is_constant(&self) -> bool {
        matches!(self, Factor::Constant(_))
    }

    /// Retrieve the scope of the `Factor`.
    ///
    /// # Note
    /// This method returns a clone of the `Factor`'s scope. `Variable`s are lightweight
    /// and therefore this is an acceptable overhead.
    pub fn scope(&self) -> Vec<Variable> {
        match self {
            Factor::Constant(_) => vec![],
            Factor::TableFactor { scope, .. } => scope.clone(),
        }
    }

    /// The total mass of the `Factor` - the sum over every assignment of its scope
    pub fn sum(&self) -> f64 {
        match self {
            Factor::Constant(c) => *c,
            Factor::TableFactor { table, .. } => table.sum(),
        }
    }

    /// Retrieve the value for a complete assignment over the scope of this `Factor`.
    ///
    /// The assignment may cover a superset of the scope; variables outside the scope are
    /// ignored.
    ///
    /// # Errors
    /// `PearlError::MissingAssignment` if the assignment does not cover the scope.
    pub fn value(&self, assignment: &Assignment) -> Result<f64> {
        match self {
            Factor::Constant(c) => Ok(*c),
            Factor::TableFactor { scope, table } => {
                let mut idxs = Vec::with_capacity(scope.len());
                for v in scope {
                    match assignment.get(v) {
                        Some(idx) => idxs.push(idx),
                        None => {
                            return Err(PearlError::MissingAssignment(String::from(v.name())))
                        }
                    }
                }

                Ok(table[nd::IxDyn(&idxs)])
            }
        }
    }

    /// Pointwise product of this `Factor` and another.
    ///
    /// The result's scope is the union of the two scopes; each assignment of the union is
    /// mapped to the product of the values the operands give to its restrictions. The
    /// scopes may overlap, be disjoint, or be equal; `Constant` factors scale the other
    /// operand.
    pub fn product(&self, other: &Self) -> Self {
        match (self, other) {
            (Factor::Constant(a), Factor::Constant(b)) => Factor::Constant(a * b),
            (Factor::Constant(c), Factor::TableFactor { scope, table }) => {
                Factor::from_parts(scope.clone(), table * *c)
            }
            (Factor::TableFactor { scope, table }, Factor::Constant(c)) => {
                Factor::from_parts(scope.clone(), table * *c)
            }
            (Factor::TableFactor { scope: s1, .. }, Factor::TableFactor { scope: s2, .. }) => {
                // union scope, in first-seen order
                let scope: Vec<Variable> =
                    s1.iter().chain(s2.iter()).cloned().unique().collect();
                let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();

                let mut table = Table::zeros(shape);
                for assn in all_assignments(&scope) {
                    // lookups cannot fail: the assignment covers the union of both scopes
                    let v1 = self.value(&assn).expect("product assignment covers scope");
                    let v2 = other.value(&assn).expect("product assignment covers scope");

                    let idx: Vec<usize> = scope
                        .iter()
                        .map(|v| assn.get(v).expect("product assignment covers scope"))
                        .collect();
                    table[nd::IxDyn(&idx)] = v1 * v2;
                }

                Factor::from_parts(scope, table)
            }
        }
    }

    /// Sum the given `Variable` out of the `Factor`.
    ///
    /// The scope shrinks by exactly one and the total mass is preserved. A factor that
    /// does not mention the variable is returned unchanged; a single-variable factor
    /// collapses to a `Constant` holding its mass.
    pub fn marginalize(&self, var: &Variable) -> Self {
        match self {
            Factor::Constant(c) => Factor::Constant(*c),
            Factor::TableFactor { scope, table } => {
                match scope.iter().position(|v| v == var) {
                    Some(_) if scope.len() == 1 => Factor::Constant(table.sum()),
                    Some(idx) => {
                        let new_table = table.sum_axis(Axis(idx));
                        let new_scope =
                            scope.iter().filter(|&v| v != var).cloned().collect();
                        Factor::from_parts(new_scope, new_table)
                    }
                    // the variable is not in scope; already marginalized
                    None => self.clone(),
                }
            }
        }
    }

    /// Restrict the `Factor` to the given partial assignment.
    ///
    /// Variables fixed by the assignment are dropped from the scope and their axes are
    /// collapsed onto the assigned value. Reducing by a complete assignment yields a
    /// `Constant` holding the table entry.
    pub fn reduce(&self, assignment: &Assignment) -> Self {
        match self {
            Factor::Constant(c) => Factor::Constant(*c),
            Factor::TableFactor { scope, table } => {
                let mut view = table.view();
                let mut new_scope: Vec<Variable> = Vec::new();
                let mut new_shape: Vec<usize> = Vec::new();

                for (i, v) in scope.iter().enumerate() {
                    if let Some(val) = assignment.get(v) {
                        view.collapse_axis(Axis(i), val);
                    } else {
                        new_scope.push(v.clone());
                        new_shape.push(table.len_of(Axis(i)));
                    }
                }

                if new_scope.is_empty() {
                    // complete assignment - keep the looked-up value
                    let value = *view.iter().next().expect("collapsed view holds one value");
                    Factor::Constant(value)
                } else if new_scope.len() == scope.len() {
                    // the assignment fixes nothing in scope
                    self.clone()
                } else {
                    let table = view
                        .to_owned()
                        .into_shape(new_shape)
                        .expect("collapsed axes have length one");
                    Factor::from_parts(new_scope, table)
                }
            }
        }
    }
}
