//! Override priorities and candidate selection.
//!
//! Every value that could end up in a resolved option is a [`Candidate`]
//! tagged with the [`Priority`] tier it was produced at. The winner is the
//! single candidate of the highest tier present:
//!
//! ```text
//! Declared < Computed < Explicit < Forced
//! ```
//!
//! `Forced` sits above user definitions. It is reserved for fragments that an
//! environment imposes (a container never runs DHCP), so it is the one place
//! where a user's explicit value can lose.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};
use crate::value::Value;

/// Priority tier of a candidate value. Ordered lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Priority {
  /// The default attached to the option declaration.
  Declared,
  /// Produced by a default rule from other resolved options.
  Computed,
  /// Written by the user in a machine specification.
  Explicit,
  /// Imposed by the active environment profile.
  Forced,
}

impl Priority {
  pub fn as_str(&self) -> &'static str {
    match self {
      Priority::Declared => "declared-default",
      Priority::Computed => "computed-default",
      Priority::Explicit => "explicit",
      Priority::Forced => "forced",
    }
  }
}

impl fmt::Display for Priority {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Which rule or source produced a candidate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Provenance {
  /// Default from the option declaration.
  Declaration { declared_by: String },
  /// Named default rule.
  Rule { rule: String },
  /// A definition layer of the machine specification.
  Definition { source: String },
  /// A profile fragment.
  Fragment { fragment: String },
}

impl fmt::Display for Provenance {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Provenance::Declaration { declared_by } => write!(f, "declaration in {}", declared_by),
      Provenance::Rule { rule } => write!(f, "rule {}", rule),
      Provenance::Definition { source } => write!(f, "definition in {}", source),
      Provenance::Fragment { fragment } => write!(f, "fragment {}", fragment),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
  pub value: Value,
  pub priority: Priority,
  pub provenance: Provenance,
}

impl Candidate {
  pub fn new(value: Value, priority: Priority, provenance: Provenance) -> Self {
    Self {
      value,
      priority,
      provenance,
    }
  }
}

/// Pick the winning candidate for `path`.
///
/// Returns `Ok(None)` when there are no candidates. Candidates on the top tier
/// that carry identical values collapse into the first of them; differing
/// values on the top tier are an [`ResolveError::AmbiguousOverride`].
pub fn select_winner<'a>(path: &str, candidates: &'a [Candidate]) -> Result<Option<&'a Candidate>> {
  let Some(top) = candidates.iter().map(|c| c.priority).max() else {
    return Ok(None);
  };

  let mut contenders = candidates.iter().filter(|c| c.priority == top);
  let Some(winner) = contenders.next() else {
    return Ok(None);
  };

  let rivals: Vec<&Candidate> = contenders.filter(|c| c.value != winner.value).collect();
  if !rivals.is_empty() {
    let mut sources = vec![winner.provenance.to_string()];
    sources.extend(rivals.iter().map(|c| c.provenance.to_string()));
    return Err(ResolveError::AmbiguousOverride {
      path: path.to_string(),
      priority: top,
      sources,
    });
  }

  Ok(Some(winner))
}
