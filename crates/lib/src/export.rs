//! Schema exporter.
//!
//! Produces one [`DocRecord`] per declared option, sorted by path, for an
//! external documentation renderer. Export runs over the schema alone and
//! never selects a profile or evaluates a default rule, so options of every
//! profile are documented the same way.

use serde::{Serialize, Serializer};

use crate::consts::NO_DEFAULT;
use crate::options::{OptionDecl, OptionSchema};
use crate::priority::Priority;
use crate::resolve::ResolvedConfig;

/// Documentation for one option.
///
/// Field order is part of the output format and must not change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRecord {
  pub path: String,
  #[serde(rename = "type")]
  pub type_name: String,
  /// Literal rendering of the default; `None` when the option has none.
  /// Serialized as `"no default"` in that case.
  #[serde(serialize_with = "serialize_default")]
  pub default: Option<String>,
  pub description: String,
  pub declared_by: String,
}

impl DocRecord {
  fn from_decl(decl: &OptionDecl) -> Self {
    let default = match (&decl.default, &decl.default_text) {
      (Some(value), _) => Some(value.to_string()),
      (None, Some(text)) => Some(text.clone()),
      (None, None) => None,
    };
    Self {
      path: decl.path.clone(),
      type_name: decl.ty.to_string(),
      default,
      description: decl.description.clone(),
      declared_by: decl.declared_by.clone(),
    }
  }

  /// The default as a renderer shows it.
  pub fn default_display(&self) -> &str {
    self.default.as_deref().unwrap_or(NO_DEFAULT)
  }
}

fn serialize_default<S: Serializer>(default: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
  serializer.serialize_str(default.as_deref().unwrap_or(NO_DEFAULT))
}

/// Document every option of `schema`, sorted by path.
pub fn export(schema: &OptionSchema) -> Vec<DocRecord> {
  // The schema is keyed by path, so iteration order is already lexicographic.
  schema.iter().map(DocRecord::from_decl).collect()
}

/// Document every option of `schema` as seen by one resolved machine.
///
/// Identical to [`export`] except that options whose value came from a
/// computed default show that value instead of the default text.
pub fn export_for(schema: &OptionSchema, resolved: &ResolvedConfig) -> Vec<DocRecord> {
  schema
    .iter()
    .map(|decl| {
      let mut record = DocRecord::from_decl(decl);
      if let Some(attr) = resolved.get(&decl.path)
        && attr.priority == Priority::Computed
      {
        record.default = Some(attr.value.to_string());
      }
      record
    })
    .collect()
}

pub fn to_json(records: &[DocRecord]) -> serde_json::Result<String> {
  serde_json::to_string_pretty(records)
}
