//! Module containing initialization routines for the CPTs of a network.

use crate::factor::{Factor, Table};
use crate::util::{PearlError, Result};
use crate::variable::Variable;

use ndarray::prelude as nd;
use ndarray::Axis;
use ndarray_rand::rand_distr::Uniform;
use ndarray_rand::RandomExt;

/// Tolerance for checking that each conditional distribution in a CPT sums to 1
const CPD_TOLERANCE: f64 = 1e-6;

/// Defines possible ways to initialize a `Variable`'s CPT.
pub enum Initialization<'a> {
    /// A uniform distribution over the variable's values, for every parent assignment
    Uniform,

    /// Randomly initialized conditional distributions
    Random,

    /// A Bernoulli distribution with `p = P(value 1)`.
    /// Valid only for a binary `Variable` with no parents.
    Binomial(f64),

    /// A categorical distribution with one parameter per value.
    /// Valid only for a `Variable` with no parents.
    Multinomial(&'a [f64]),

    /// A user-defined table with one axis per parent (in order) and the variable itself
    /// on the last axis
    Table(Table),
}

impl<'a> Initialization<'a> {
    /// Construct the CPT for `var` given `parents`, initialized based on `self`.
    ///
    /// The resulting `Factor` has scope `parents ++ [var]`, and every conditional
    /// distribution (every slice along the last axis) sums to 1.
    pub fn build_cpd(self, var: &Variable, parents: &[&Variable]) -> Result<Factor> {
        let mut scope: Vec<Variable> = parents.iter().map(|p| (*p).clone()).collect();
        scope.push(var.clone());
        let shape: Vec<usize> = scope.iter().map(|v| v.cardinality()).collect();

        let table = match self {
            Initialization::Uniform => {
                let val = 1. / (var.cardinality() as f64);
                nd::Array::from_elem(shape, val)
            }
            Initialization::Random => {
                let ax = Axis(shape.len() - 1);
                let tbl = nd::Array::random(shape, Uniform::new(1.0, 100.0));
                let z = tbl.sum_axis(ax).insert_axis(ax);
                &tbl / &z
            }
            Initialization::Binomial(p) => {
                if !parents.is_empty() || var.cardinality() != 2 {
                    return Err(PearlError::InvalidInitialization(format!(
                        "Binomial requires a binary root variable, `{}` is not one",
                        var.name()
                    )));
                }
                nd::Array::from_vec(vec![1.0 - p, p]).into_dyn()
            }
            Initialization::Multinomial(ps) => {
                if !parents.is_empty() {
                    return Err(PearlError::InvalidInitialization(format!(
                        "Multinomial requires a root variable, `{}` has parents",
                        var.name()
                    )));
                }
                if ps.len() != var.cardinality() {
                    return Err(PearlError::InvalidInitialization(format!(
                        "Multinomial has {} parameters for the {} values of `{}`",
                        ps.len(),
                        var.cardinality(),
                        var.name()
                    )));
                }
                nd::Array::from_iter(ps.iter().copied()).into_dyn()
            }
            Initialization::Table(t) => t,
        };

        let factor = Factor::new(scope, table)?;

        // every parent assignment must carry a distribution over var
        if let Factor::TableFactor { ref table, .. } = factor {
            let rows = table.sum_axis(Axis(table.ndim() - 1));
            if rows.iter().any(|s| (s - 1.0).abs() > CPD_TOLERANCE) {
                return Err(PearlError::InvalidInitialization(format!(
                    "the conditional distributions of `{}` do not sum to 1",
                    var.name()
                )));
            }
        }

        Ok(factor)
    }
}
