//! Defines the `Error` type for the pearl library

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PearlError>;

#[derive(Clone, Debug, Error, PartialEq)]
pub enum PearlError {
    /// A lookup required a value for a `Variable` that the `Assignment` does not hold.
    /// Surfaces malformed evidence (e.g. an evidence variable whose parent is unobserved)
    /// and incomplete assignments to a `Factor`.
    #[error("assignment is missing a value for variable `{0}`")]
    MissingAssignment(String),

    /// The network holds no CPT for the given variable
    #[error("no CPT for variable `{0}` in the network")]
    MissingCpt(String),

    /// A parent variable was referenced before it was added to the network
    #[error("parent `{parent}` of `{child}` is not in the network")]
    MissingParent { parent: String, child: String },

    /// A variable was added to the network more than once
    #[error("variable `{0}` was added to the network twice")]
    DuplicateVariable(String),

    /// A `Factor` table did not satisfy its structural constraints
    #[error("invalid factor: {0}")]
    InvalidFactor(String),

    /// A CPT initialization that does not fit the variable it is for
    #[error("invalid CPT initialization: {0}")]
    InvalidInitialization(String),

    /// A value label that is not part of the variable's domain
    #[error("value `{value}` is not in the domain of variable `{variable}`")]
    UnknownValue { variable: String, value: String },

    /// The query variable is itself observed in the evidence
    #[error("query variable `{0}` is already fixed by the evidence")]
    QueryObserved(String),

    /// The unnormalized posterior summed to zero: the evidence has probability zero
    /// under the network, so the conditional distribution is undefined
    #[error("evidence has zero probability; posterior is undefined")]
    ContradictoryEvidence,

    /// Rejection sampling kept no samples, so there is nothing to normalize
    #[error("no samples were consistent with the evidence")]
    NoConsistentSamples,

    /// Variable elimination finished with factors over more than the query variable.
    /// This is an internal-invariant violation, reported with the offending scope.
    #[error("elimination left a factor over {scope:?}; expected only the query variable")]
    EliminationMismatch { scope: Vec<String> },
}
