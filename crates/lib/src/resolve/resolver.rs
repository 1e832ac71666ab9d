use std::collections::BTreeMap;

use rayon::prelude::*;
use tracing::{debug, info, trace};

use super::types::{ResolvedAttr, ResolvedConfig};
use crate::activate::activate;
use crate::defaults::{DefaultRule, RuleGraph, RuleInputs, builtin_rules};
use crate::env::{TargetEnv, select};
use crate::error::{ResolveError, Result};
use crate::options::paths::TARGET_ENV;
use crate::options::{OptionSchema, check_type, machine_schema};
use crate::priority::{Candidate, Priority, Provenance, select_winner};
use crate::spec::MachineSpec;
use crate::value::Value;

/// Candidate lists of the options that are active for the machine.
type Candidates = BTreeMap<String, Vec<Candidate>>;

/// Resolves machine specifications against an option schema and a set of
/// default rules.
///
/// A resolver holds no per-machine state, so one instance can resolve any
/// number of machines, concurrently if needed.
#[derive(Debug, Clone)]
pub struct Resolver {
  schema: OptionSchema,
  rules: BTreeMap<String, DefaultRule>,
}

impl Resolver {
  /// Resolver over `schema` with the built-in default rules.
  ///
  /// `schema` must declare every option those rules compute or read, or
  /// [`resolve`](Self::resolve) fails with [`ResolveError::UnknownAttribute`].
  pub fn new(schema: OptionSchema) -> Self {
    Self::without_rules(schema).with_rules(builtin_rules())
  }

  /// Resolver over the built-in machine schema and rules.
  pub fn builtin() -> Result<Self> {
    Ok(Self::new(machine_schema()?))
  }

  /// Resolver over `schema` with no default rules at all.
  pub fn without_rules(schema: OptionSchema) -> Self {
    Self {
      schema,
      rules: BTreeMap::new(),
    }
  }

  /// Add a rule. A rule for a path that already has one replaces it.
  pub fn with_rule(mut self, rule: DefaultRule) -> Self {
    if let Some(previous) = self.rules.insert(rule.path.clone(), rule) {
      debug!(path = %previous.path, replaced = %previous.name, "default rule replaced");
    }
    self
  }

  pub fn with_rules<I>(self, rules: I) -> Self
  where
    I: IntoIterator<Item = DefaultRule>,
  {
    rules.into_iter().fold(self, Self::with_rule)
  }

  pub fn schema(&self) -> &OptionSchema {
    &self.schema
  }

  pub fn rules(&self) -> impl Iterator<Item = &DefaultRule> {
    self.rules.values()
  }

  /// Resolve one machine.
  ///
  /// # Errors
  ///
  /// Any [`ResolveError`]; resolution stops at the first one and no partial
  /// configuration is returned.
  pub fn resolve(&self, spec: &MachineSpec) -> Result<ResolvedConfig> {
    self.check_rules()?;
    let mut explicit = self.collect_definitions(spec)?;
    let profile = self.select_profile(&explicit)?;
    info!(machine = %spec.name, profile = %profile, "resolving machine configuration");

    let mut candidates = Candidates::new();
    let mut attrs = BTreeMap::new();

    for decl in self.schema.iter() {
      let defined = explicit.remove(&decl.path).unwrap_or_default();

      if !profile.is_active(&decl.path) {
        // Inert: no defaults, no checks, only what the user wrote.
        if let Some(winner) = select_winner(&decl.path, &defined)? {
          trace!(path = %decl.path, "keeping explicit value of inert option");
          attrs.insert(decl.path.clone(), to_attr(winner));
        }
        continue;
      }

      let mut list = Vec::with_capacity(defined.len() + 1);
      if let Some(default) = &decl.default {
        list.push(Candidate::new(
          default.clone(),
          Priority::Declared,
          Provenance::Declaration {
            declared_by: decl.declared_by.clone(),
          },
        ));
      }
      list.extend(defined);
      candidates.insert(decl.path.clone(), list);
    }

    self.apply_fragments(profile, &mut candidates)?;
    self.apply_rules(profile, &mut candidates)?;

    for (path, list) in &candidates {
      let winner = select_winner(path, list)?.ok_or_else(|| ResolveError::MissingValue { path: path.clone() })?;
      if let Some(decl) = self.schema.get(path) {
        check_type(path, &decl.ty, &winner.value)?;
      }
      attrs.insert(path.clone(), to_attr(winner));
    }

    debug!(machine = %spec.name, options = attrs.len(), "machine configuration resolved");
    Ok(ResolvedConfig::new(spec.name.clone(), profile, attrs))
  }

  /// Resolve several machines independently, in parallel.
  ///
  /// Results are returned in input order; one machine failing does not affect
  /// the others.
  pub fn resolve_all(&self, specs: &[MachineSpec]) -> Vec<Result<ResolvedConfig>> {
    specs.par_iter().map(|spec| self.resolve(spec)).collect()
  }

  /// Every rule must compute and read declared options only.
  fn check_rules(&self) -> Result<()> {
    for rule in self.rules.values() {
      if let Some(path) = std::iter::once(&rule.path)
        .chain(&rule.reads)
        .find(|path| !self.schema.contains(path))
      {
        return Err(ResolveError::UnknownAttribute {
          path: path.clone(),
          defined_by: format!("rule {}", rule.name),
        });
      }
    }
    Ok(())
  }

  /// Turn every definition into an explicit candidate, rejecting undeclared paths.
  fn collect_definitions(&self, spec: &MachineSpec) -> Result<Candidates> {
    let mut explicit = Candidates::new();
    for layer in &spec.definitions {
      for (path, value) in &layer.values {
        let Some(decl) = self.schema.get(path) else {
          return Err(ResolveError::UnknownAttribute {
            path: path.clone(),
            defined_by: layer.source.clone(),
          });
        };
        // The sentinel marks a lookup miss; a user cannot write one.
        if value.is_unknown() {
          return Err(ResolveError::TypeMismatch {
            path: path.clone(),
            expected: decl.ty.to_string(),
            found: format!("null (defined by {})", layer.source),
          });
        }
        explicit.entry(path.clone()).or_default().push(Candidate::new(
          value.clone(),
          Priority::Explicit,
          Provenance::Definition {
            source: layer.source.clone(),
          },
        ));
      }
    }
    Ok(explicit)
  }

  /// Resolve `deployment.targetEnv` on its own and select the profile.
  fn select_profile(&self, explicit: &Candidates) -> Result<TargetEnv> {
    let mut list = explicit.get(TARGET_ENV).cloned().unwrap_or_default();
    if let Some(decl) = self.schema.get(TARGET_ENV)
      && let Some(default) = &decl.default
    {
      list.push(Candidate::new(
        default.clone(),
        Priority::Declared,
        Provenance::Declaration {
          declared_by: decl.declared_by.clone(),
        },
      ));
    }

    match select_winner(TARGET_ENV, &list)? {
      None => Ok(TargetEnv::None),
      Some(Candidate {
        value: Value::String(name),
        ..
      }) => select(name),
      Some(other) => Err(ResolveError::UnknownEnvironment {
        value: other.value.to_string(),
      }),
    }
  }

  fn apply_fragments(&self, profile: TargetEnv, candidates: &mut Candidates) -> Result<()> {
    for fragment in activate(profile) {
      for (path, value) in fragment.assignments {
        let Some(list) = candidates.get_mut(&path) else {
          return Err(ResolveError::UnknownAttribute {
            path,
            defined_by: fragment.name.to_string(),
          });
        };
        debug!(path = %path, value = %value, fragment = fragment.name, "forcing option");
        list.push(Candidate::new(
          value,
          Priority::Forced,
          Provenance::Fragment {
            fragment: fragment.name.to_string(),
          },
        ));
      }
    }
    Ok(())
  }

  /// Evaluate the rules of the active profile in dependency order, adding one
  /// computed candidate per rule that yields a value.
  fn apply_rules(&self, profile: TargetEnv, candidates: &mut Candidates) -> Result<()> {
    let active = self
      .rules
      .values()
      .filter(|rule| rule.applies_to(profile) && candidates.contains_key(&rule.path));
    let order = RuleGraph::new(active).evaluation_order()?;

    for rule in order {
      let overridden = candidates
        .get(&rule.path)
        .is_some_and(|list| list.iter().any(|c| c.priority >= Priority::Explicit));
      if overridden {
        trace!(path = %rule.path, rule = %rule.name, "skipping rule, value set explicitly");
        continue;
      }

      let mut inputs = RuleInputs::new(profile);
      for read in &rule.reads {
        if let Some(list) = candidates.get(read)
          && let Some(winner) = select_winner(read, list)?
        {
          inputs = inputs.with(read.clone(), winner.value.clone());
        }
      }

      match rule.evaluate(&inputs) {
        Some(value) => {
          debug!(path = %rule.path, rule = %rule.name, value = %value, "computed default");
          if let Some(list) = candidates.get_mut(&rule.path) {
            list.push(Candidate::new(
              value,
              Priority::Computed,
              Provenance::Rule {
                rule: rule.name.clone(),
              },
            ));
          }
        }
        None => trace!(path = %rule.path, rule = %rule.name, "rule produced no candidate"),
      }
    }
    Ok(())
  }
}

/// Resolve one machine with the built-in schema and rules.
pub fn resolve(spec: &MachineSpec) -> Result<ResolvedConfig> {
  Resolver::builtin()?.resolve(spec)
}

fn to_attr(candidate: &Candidate) -> ResolvedAttr {
  ResolvedAttr {
    value: candidate.value.clone(),
    priority: candidate.priority,
    provenance: candidate.provenance.clone(),
  }
}
