use std::collections::BTreeMap;

use serde::Serialize;

use crate::env::{Deployment, TargetEnv};
use crate::error::{ResolveError, Result};
use crate::priority::{Priority, Provenance};
use crate::util::hash::{HashError, Hashable, ObjectHash};
use crate::value::Value;

/// The winning value of one option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedAttr {
  pub value: Value,
  pub priority: Priority,
  pub provenance: Provenance,
}

/// The final configuration of one machine.
///
/// Immutable once returned by the resolver; share it by reference or clone it.
/// Contains every option of the selected profile and of no profile in
/// particular, plus any option of another profile that the user set
/// explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
  machine: String,
  profile: TargetEnv,
  attrs: BTreeMap<String, ResolvedAttr>,
}

impl Hashable for ResolvedConfig {}

impl ResolvedConfig {
  pub(crate) fn new(machine: String, profile: TargetEnv, attrs: BTreeMap<String, ResolvedAttr>) -> Self {
    Self {
      machine,
      profile,
      attrs,
    }
  }

  pub fn machine(&self) -> &str {
    &self.machine
  }

  /// The selected profile. Drivers read this before anything else.
  pub fn profile(&self) -> TargetEnv {
    self.profile
  }

  /// Typed payload for the selected profile.
  pub fn deployment(&self) -> Result<Deployment> {
    Deployment::from_resolved(self)
  }

  pub fn get(&self, path: &str) -> Option<&ResolvedAttr> {
    self.attrs.get(path)
  }

  pub fn value(&self, path: &str) -> Option<&Value> {
    self.attrs.get(path).map(|attr| &attr.value)
  }

  pub fn contains(&self, path: &str) -> bool {
    self.attrs.contains_key(path)
  }

  /// Resolved options in path order.
  pub fn iter(&self) -> impl Iterator<Item = (&str, &ResolvedAttr)> {
    self.attrs.iter().map(|(path, attr)| (path.as_str(), attr))
  }

  pub fn len(&self) -> usize {
    self.attrs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.attrs.is_empty()
  }

  /// Hash of the serialized configuration; equal inputs give equal hashes.
  pub fn content_hash(&self) -> Result<ObjectHash, HashError> {
    self.compute_hash()
  }

  /// The value at `path`, rejecting the unknown sentinel.
  ///
  /// Drivers call this on derived options (AMI, base image) before provisioning.
  pub fn require_known(&self, path: &str) -> Result<&Value> {
    match self.value(path) {
      None => Err(ResolveError::MissingValue { path: path.to_string() }),
      Some(Value::Unknown) => Err(ResolveError::UnresolvedSentinel { path: path.to_string() }),
      Some(value) => Ok(value),
    }
  }

  pub fn get_str(&self, path: &str) -> Result<&str> {
    let value = self.require_known(path)?;
    value.as_str().ok_or_else(|| mismatch(path, "string", value))
  }

  /// Like [`get_str`](Self::get_str), but maps the unknown sentinel to `None`.
  pub fn get_known_str(&self, path: &str) -> Result<Option<&str>> {
    match self.value(path) {
      Some(Value::Unknown) => Ok(None),
      _ => self.get_str(path).map(Some),
    }
  }

  pub fn get_bool(&self, path: &str) -> Result<bool> {
    let value = self.require_known(path)?;
    value.as_bool().ok_or_else(|| mismatch(path, "boolean", value))
  }

  pub fn get_int(&self, path: &str) -> Result<i64> {
    let value = self.require_known(path)?;
    value.as_int().ok_or_else(|| mismatch(path, "signed integer", value))
  }

  pub fn get_list(&self, path: &str) -> Result<&[String]> {
    let value = self.require_known(path)?;
    value.as_list().ok_or_else(|| mismatch(path, "list of strings", value))
  }

  pub fn get_map(&self, path: &str) -> Result<&BTreeMap<String, String>> {
    let value = self.require_known(path)?;
    value.as_map().ok_or_else(|| mismatch(path, "attribute set of strings", value))
  }
}

fn mismatch(path: &str, expected: &str, found: &Value) -> ResolveError {
  ResolveError::TypeMismatch {
    path: path.to_string(),
    expected: expected.to_string(),
    found: format!("{} {}", found.kind(), found),
  }
}
