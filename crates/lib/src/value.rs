//! Attribute values and option types.
//!
//! [`Value`] is what a definition, a declared default or a computed default
//! produces. [`OptionType`] is what a declaration promises. The unknown sentinel
//! ([`Value::Unknown`]) is accepted by every type: it marks a derived default
//! whose lookup table had no match, and it is up to the deployment driver to
//! reject it before provisioning.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::UNKNOWN_SENTINEL;

/// A concrete attribute value.
///
/// Serialized untagged so machine specifications read naturally:
/// `{ "deployment.ec2.region": "us-east-1", "deployment.virtualbox.headless": true }`.
/// `null` maps to the unknown sentinel, which the resolver rejects in user
/// definitions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
  Bool(bool),
  Int(i64),
  String(String),
  List(Vec<String>),
  Map(BTreeMap<String, String>),
  /// Lookup miss in a derived-default table.
  Unknown,
}

impl Value {
  pub fn as_str(&self) -> Option<&str> {
    match self {
      Value::String(s) => Some(s),
      _ => None,
    }
  }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }

  pub fn as_int(&self) -> Option<i64> {
    match self {
      Value::Int(i) => Some(*i),
      _ => None,
    }
  }

  pub fn as_list(&self) -> Option<&[String]> {
    match self {
      Value::List(items) => Some(items),
      _ => None,
    }
  }

  pub fn as_map(&self) -> Option<&BTreeMap<String, String>> {
    match self {
      Value::Map(map) => Some(map),
      _ => None,
    }
  }

  pub fn is_unknown(&self) -> bool {
    matches!(self, Value::Unknown)
  }

  /// Short name of the value's shape, used in type errors.
  pub fn kind(&self) -> &'static str {
    match self {
      Value::Bool(_) => "boolean",
      Value::Int(_) => "integer",
      Value::String(_) => "string",
      Value::List(_) => "list",
      Value::Map(_) => "attribute set",
      Value::Unknown => "unknown",
    }
  }
}

/// Renders the value as a Nix literal, the form documentation renderers expect.
impl fmt::Display for Value {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Value::Bool(b) => write!(f, "{}", b),
      Value::Int(i) => write!(f, "{}", i),
      Value::String(s) => write!(f, "{:?}", s),
      Value::List(items) => {
        write!(f, "[ ")?;
        for item in items {
          write!(f, "{:?} ", item)?;
        }
        write!(f, "]")
      }
      Value::Map(map) => {
        write!(f, "{{ ")?;
        for (key, value) in map {
          write!(f, "{:?} = {:?}; ", key, value)?;
        }
        write!(f, "}}")
      }
      Value::Unknown => f.write_str(UNKNOWN_SENTINEL),
    }
  }
}

impl From<&str> for Value {
  fn from(s: &str) -> Self {
    Value::String(s.to_string())
  }
}

impl From<String> for Value {
  fn from(s: String) -> Self {
    Value::String(s)
  }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self {
    Value::Bool(b)
  }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self {
    Value::Int(i)
  }
}

impl From<Vec<String>> for Value {
  fn from(items: Vec<String>) -> Self {
    Value::List(items)
  }
}

impl From<BTreeMap<String, String>> for Value {
  fn from(map: BTreeMap<String, String>) -> Self {
    Value::Map(map)
  }
}

/// The declared type of an option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionType {
  String,
  Int,
  Bool,
  /// A string restricted to the listed alternatives.
  Enum(Vec<String>),
  ListOfString,
  AttrsOfString,
}

impl OptionType {
  pub fn one_of<I, S>(alternatives: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    OptionType::Enum(alternatives.into_iter().map(Into::into).collect())
  }

  /// Whether `value` inhabits this type. The unknown sentinel inhabits every type.
  pub fn check(&self, value: &Value) -> bool {
    match (self, value) {
      (_, Value::Unknown) => true,
      (OptionType::String, Value::String(_)) => true,
      (OptionType::Int, Value::Int(_)) => true,
      (OptionType::Bool, Value::Bool(_)) => true,
      (OptionType::Enum(alternatives), Value::String(s)) => alternatives.iter().any(|a| a == s),
      (OptionType::ListOfString, Value::List(_)) => true,
      (OptionType::AttrsOfString, Value::Map(_)) => true,
      _ => false,
    }
  }

  /// Whether `self` is an acceptable refinement of `previous`.
  ///
  /// A type may be restated unchanged, and a plain string may be narrowed to an
  /// enum. An enum may drop alternatives but never gain them.
  pub fn narrows(&self, previous: &OptionType) -> bool {
    match (previous, self) {
      (a, b) if a == b => true,
      (OptionType::String, OptionType::Enum(_)) => true,
      (OptionType::Enum(wide), OptionType::Enum(narrow)) => narrow.iter().all(|alt| wide.contains(alt)),
      _ => false,
    }
  }
}

/// Human-readable type name as it appears in generated documentation.
impl fmt::Display for OptionType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      OptionType::String => f.write_str("string"),
      OptionType::Int => f.write_str("signed integer"),
      OptionType::Bool => f.write_str("boolean"),
      OptionType::Enum(alternatives) => {
        let quoted: Vec<String> = alternatives.iter().map(|a| format!("{:?}", a)).collect();
        write!(f, "one of {}", quoted.join(", "))
      }
      OptionType::ListOfString => f.write_str("list of strings"),
      OptionType::AttrsOfString => f.write_str("attribute set of strings"),
    }
  }
}
