use std::collections::BTreeMap;
use std::fmt;

use crate::env::TargetEnv;
use crate::value::Value;

/// Signature of a computed default.
///
/// Returns `None` when the rule has no candidate for the current inputs.
pub type ComputeFn = fn(&RuleInputs) -> Option<Value>;

/// A computed default for one option path.
///
/// A rule fires only when its profile is selected (or always, for rules
/// without a profile). It may read the resolved values of the paths listed in
/// `reads` and nothing else; those reads are the edges of the dependency graph.
#[derive(Clone)]
pub struct DefaultRule {
  pub name: String,
  pub path: String,
  pub profile: Option<TargetEnv>,
  pub reads: Vec<String>,
  pub compute: ComputeFn,
}

impl DefaultRule {
  pub fn new(name: impl Into<String>, path: impl Into<String>, compute: ComputeFn) -> Self {
    Self {
      name: name.into(),
      path: path.into(),
      profile: None,
      reads: Vec::new(),
      compute,
    }
  }

  /// Restrict the rule to one profile.
  pub fn under(mut self, profile: TargetEnv) -> Self {
    self.profile = Some(profile);
    self
  }

  pub fn reading<I, S>(mut self, paths: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    self.reads.extend(paths.into_iter().map(Into::into));
    self
  }

  pub fn applies_to(&self, profile: TargetEnv) -> bool {
    self.profile.is_none_or(|p| p == profile)
  }

  pub fn evaluate(&self, inputs: &RuleInputs) -> Option<Value> {
    (self.compute)(inputs)
  }
}

impl fmt::Debug for DefaultRule {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DefaultRule")
      .field("name", &self.name)
      .field("path", &self.path)
      .field("profile", &self.profile)
      .field("reads", &self.reads)
      .finish_non_exhaustive()
  }
}

/// Resolved values a rule may read.
///
/// Paths the rule reads that ended up without a value (inert namespace, or no
/// candidate at all) are simply absent.
#[derive(Debug, Clone)]
pub struct RuleInputs {
  profile: TargetEnv,
  values: BTreeMap<String, Value>,
}

impl RuleInputs {
  pub fn new(profile: TargetEnv) -> Self {
    Self {
      profile,
      values: BTreeMap::new(),
    }
  }

  pub fn with(mut self, path: impl Into<String>, value: Value) -> Self {
    self.values.insert(path.into(), value);
    self
  }

  pub fn profile(&self) -> TargetEnv {
    self.profile
  }

  pub fn get(&self, path: &str) -> Option<&Value> {
    self.values.get(path)
  }

  /// String value at `path`; `None` if absent, not a string, or the sentinel.
  pub fn get_str(&self, path: &str) -> Option<&str> {
    self.get(path).and_then(Value::as_str)
  }
}
