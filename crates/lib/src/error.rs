//! Resolution errors.
//!
//! Every failure aborts resolution for the machine being resolved; there is no
//! partially resolved configuration. Lookup-table misses are not errors: they
//! produce the unknown sentinel (see [`Value::Unknown`](crate::value::Value::Unknown)).

use thiserror::Error;

use crate::priority::Priority;

/// Errors raised while declaring options or resolving a machine specification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveError {
  /// The same option path was declared twice.
  #[error("option '{path}' is declared by both {first} and {second}")]
  DuplicatePath {
    path: String,
    first: String,
    second: String,
  },

  /// A refinement tried to replace a default that is already set.
  #[error("option '{path}' already defaults to {existing}; {refined_by} tried to set {attempted}")]
  ConflictingDefault {
    path: String,
    existing: String,
    attempted: String,
    refined_by: String,
  },

  /// `deployment.targetEnv` is not one of the recognised profiles.
  #[error("unknown target environment {value} (expected one of: none, ec2, virtualbox, adhoc-cloud, container)")]
  UnknownEnvironment { value: String },

  /// Computed defaults read each other's values.
  #[error("circular computed defaults: {}", paths.join(" <-> "))]
  CircularDefault { paths: Vec<String> },

  /// Two candidates with different values share the winning priority tier.
  #[error("ambiguous {priority} values for '{path}' from {}", sources.join(", "))]
  AmbiguousOverride {
    path: String,
    priority: Priority,
    sources: Vec<String>,
  },

  /// A definition names an option that was never declared.
  #[error("option '{path}' does not exist (defined by {defined_by})")]
  UnknownAttribute { path: String, defined_by: String },

  /// A value does not match the declared option type.
  #[error("option '{path}' expects {expected}, got {found}")]
  TypeMismatch {
    path: String,
    expected: String,
    found: String,
  },

  /// A refinement changes an option's type in a way that is not a narrowing.
  #[error("option '{path}' cannot be refined from {from} to {to}")]
  InvalidRefinement { path: String, from: String, to: String },

  /// An option in an active namespace has neither a default nor a definition.
  #[error("option '{path}' is used but not defined")]
  MissingValue { path: String },

  /// A driver asked for a concrete value but resolution produced the unknown sentinel.
  #[error("option '{path}' resolved to the unknown sentinel and must be set explicitly")]
  UnresolvedSentinel { path: String },
}

pub type Result<T, E = ResolveError> = std::result::Result<T, E>;
