//! Option declaration types.

use crate::consts::BUILTIN_SOURCE;
use crate::value::{OptionType, Value};

/// The declaration of a single option.
///
/// A declaration is pure data: it names the option, states its type, and may
/// attach a declared default. Computed defaults are not stored here; they are
/// [`DefaultRule`](crate::defaults::DefaultRule)s keyed by the same path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDecl {
  /// Dotted path, unique within a schema.
  pub path: String,
  pub ty: OptionType,
  /// Declared default, the lowest-priority candidate.
  pub default: Option<Value>,
  /// Documentation for a default that is computed rather than declared.
  pub default_text: Option<String>,
  pub description: String,
  /// The module or source that declared the option.
  pub declared_by: String,
}

impl OptionDecl {
  pub fn new(path: impl Into<String>, ty: OptionType, description: impl Into<String>) -> Self {
    Self {
      path: path.into(),
      ty,
      default: None,
      default_text: None,
      description: description.into(),
      declared_by: BUILTIN_SOURCE.to_string(),
    }
  }

  pub fn with_default(mut self, value: impl Into<Value>) -> Self {
    self.default = Some(value.into());
    self
  }

  pub fn with_default_text(mut self, text: impl Into<String>) -> Self {
    self.default_text = Some(text.into());
    self
  }

  pub fn declared_by(mut self, source: impl Into<String>) -> Self {
    self.declared_by = source.into();
    self
  }
}

/// A cooperating source's amendment to an existing declaration.
///
/// Refinements may narrow the type, add to the description, or supply a
/// default where none is set. They may never replace a default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Refinement {
  pub ty: Option<OptionType>,
  pub default: Option<Value>,
  pub description: Option<String>,
  pub refined_by: String,
}

impl Refinement {
  pub fn by(source: impl Into<String>) -> Self {
    Self {
      refined_by: source.into(),
      ..Self::default()
    }
  }

  pub fn narrow_to(mut self, ty: OptionType) -> Self {
    self.ty = Some(ty);
    self
  }

  pub fn with_default(mut self, value: impl Into<Value>) -> Self {
    self.default = Some(value.into());
    self
  }

  pub fn describe(mut self, text: impl Into<String>) -> Self {
    self.description = Some(text.into());
    self
  }
}
