use std::collections::BTreeMap;

use tracing::trace;

use super::types::{OptionDecl, Refinement};
use crate::error::{ResolveError, Result};
use crate::value::{OptionType, Value};

/// Every option declared for a machine, keyed by path.
///
/// Uses [`BTreeMap`] so iteration is always in lexicographic path order, which
/// the exporter relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionSchema {
  decls: BTreeMap<String, OptionDecl>,
}

impl OptionSchema {
  pub fn new() -> Self {
    Self::default()
  }

  /// Declare a new option.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::DuplicatePath`] if the path is already declared. Use
  ///   [`refine`](Self::refine) to amend an existing declaration.
  /// - [`ResolveError::TypeMismatch`] if the declared default does not fit the type.
  pub fn declare(&mut self, decl: OptionDecl) -> Result<&OptionDecl> {
    if let Some(existing) = self.decls.get(&decl.path) {
      return Err(ResolveError::DuplicatePath {
        path: decl.path,
        first: existing.declared_by.clone(),
        second: decl.declared_by,
      });
    }

    if let Some(default) = &decl.default {
      check_type(&decl.path, &decl.ty, default)?;
    }

    trace!(path = %decl.path, ty = %decl.ty, "declared option");
    let path = decl.path.clone();
    Ok(self.decls.entry(path).or_insert(decl))
  }

  /// Amend an existing declaration on behalf of a cooperating source.
  ///
  /// # Errors
  ///
  /// - [`ResolveError::UnknownAttribute`] if nothing is declared at `path`.
  /// - [`ResolveError::InvalidRefinement`] if the new type does not narrow the old one.
  /// - [`ResolveError::ConflictingDefault`] if a different default is already set.
  /// - [`ResolveError::TypeMismatch`] if a default does not fit the (narrowed) type.
  pub fn refine(&mut self, path: &str, refinement: Refinement) -> Result<&OptionDecl> {
    let Some(decl) = self.decls.get_mut(path) else {
      return Err(ResolveError::UnknownAttribute {
        path: path.to_string(),
        defined_by: refinement.refined_by,
      });
    };

    // Validate everything before touching the declaration.
    let ty = refinement.ty.as_ref().unwrap_or(&decl.ty);
    if !ty.narrows(&decl.ty) {
      return Err(ResolveError::InvalidRefinement {
        path: path.to_string(),
        from: decl.ty.to_string(),
        to: ty.to_string(),
      });
    }

    if let (Some(existing), Some(attempted)) = (&decl.default, &refinement.default)
      && existing != attempted
    {
      return Err(ResolveError::ConflictingDefault {
        path: path.to_string(),
        existing: existing.to_string(),
        attempted: attempted.to_string(),
        refined_by: refinement.refined_by,
      });
    }

    if let Some(default) = decl.default.as_ref().or(refinement.default.as_ref()) {
      check_type(path, ty, default)?;
    }

    if let Some(ty) = refinement.ty {
      decl.ty = ty;
    }
    if decl.default.is_none() {
      decl.default = refinement.default;
    }
    if let Some(text) = refinement.description {
      if decl.description.is_empty() {
        decl.description = text;
      } else {
        decl.description = format!("{}\n\n{}", decl.description, text);
      }
    }

    trace!(path = %path, refined_by = %refinement.refined_by, "refined option");
    Ok(decl)
  }

  pub fn get(&self, path: &str) -> Option<&OptionDecl> {
    self.decls.get(path)
  }

  pub fn contains(&self, path: &str) -> bool {
    self.decls.contains_key(path)
  }

  /// Declarations in lexicographic path order.
  pub fn iter(&self) -> impl Iterator<Item = &OptionDecl> {
    self.decls.values()
  }

  pub fn len(&self) -> usize {
    self.decls.len()
  }

  pub fn is_empty(&self) -> bool {
    self.decls.is_empty()
  }
}

pub(crate) fn check_type(path: &str, ty: &OptionType, value: &Value) -> Result<()> {
  if ty.check(value) {
    Ok(())
  } else {
    Err(ResolveError::TypeMismatch {
      path: path.to_string(),
      expected: ty.to_string(),
      found: format!("{} {}", value.kind(), value),
    })
  }
}
