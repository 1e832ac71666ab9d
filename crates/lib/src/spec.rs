//! Machine specifications.
//!
//! A [`MachineSpec`] is the already-merged input for one machine: an ordered
//! list of definition layers, each contributed by one configuration source.
//! Every value in a layer is an explicit definition. Layers do not override
//! each other; two layers giving one option different values is ambiguous.
//!
//! # Format
//!
//! ```json
//! {
//!   "name": "webserver",
//!   "definitions": [
//!     { "source": "network.json", "values": { "deployment.targetEnv": "ec2" } },
//!     { "source": "ec2.json", "values": { "deployment.ec2.region": "us-east-1" } }
//!   ]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::value::Value;

/// Errors loading a machine specification from disk.
#[derive(Debug, Error)]
pub enum SpecError {
  #[error("failed to read {path}: {source}")]
  Io {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("invalid JSON machine specification: {0}")]
  Json(#[from] serde_json::Error),

  #[error("invalid YAML machine specification: {0}")]
  Yaml(#[from] serde_yaml::Error),

  #[error("unsupported machine specification format: {path} (expected .json, .yaml or .yml)")]
  UnsupportedFormat { path: PathBuf },
}

/// One configuration source's definitions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Definition {
  pub source: String,
  #[serde(default)]
  pub values: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSpec {
  pub name: String,
  #[serde(default)]
  pub definitions: Vec<Definition>,
}

impl MachineSpec {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      definitions: Vec::new(),
    }
  }

  /// Add a value to the layer named `source`, creating the layer if needed.
  pub fn define(mut self, source: &str, path: impl Into<String>, value: impl Into<Value>) -> Self {
    let layer = match self.definitions.iter().position(|d| d.source == source) {
      Some(idx) => &mut self.definitions[idx],
      None => {
        self.definitions.push(Definition {
          source: source.to_string(),
          values: BTreeMap::new(),
        });
        let last = self.definitions.len() - 1;
        &mut self.definitions[last]
      }
    };
    layer.values.insert(path.into(), value.into());
    self
  }

  pub fn from_json_str(json: &str) -> Result<Self, SpecError> {
    Ok(serde_json::from_str(json)?)
  }

  pub fn from_yaml_str(yaml: &str) -> Result<Self, SpecError> {
    Ok(serde_yaml::from_str(yaml)?)
  }

  /// Load a specification, picking the format from the file extension.
  pub fn from_path(path: &Path) -> Result<Self, SpecError> {
    let content = std::fs::read_to_string(path).map_err(|source| SpecError::Io {
      path: path.to_path_buf(),
      source,
    })?;

    let spec = match path.extension().and_then(|e| e.to_str()) {
      Some("json") => Self::from_json_str(&content)?,
      Some("yaml" | "yml") => Self::from_yaml_str(&content)?,
      _ => {
        return Err(SpecError::UnsupportedFormat {
          path: path.to_path_buf(),
        });
      }
    };

    debug!(path = ?path, machine = %spec.name, layers = spec.definitions.len(), "loaded machine specification");
    Ok(spec)
  }
}
