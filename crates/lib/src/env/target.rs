use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ResolveError, Result};

/// The deployment environment a machine targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TargetEnv {
  /// A pre-existing machine reachable over SSH.
  #[serde(rename = "none")]
  None,
  #[serde(rename = "ec2")]
  Ec2,
  #[serde(rename = "virtualbox")]
  VirtualBox,
  /// VMs created on demand through commands run on a controller over SSH.
  #[serde(rename = "adhoc-cloud")]
  AdhocCloud,
  #[serde(rename = "container")]
  Container,
}

impl TargetEnv {
  pub const ALL: [TargetEnv; 5] = [
    TargetEnv::None,
    TargetEnv::Ec2,
    TargetEnv::VirtualBox,
    TargetEnv::AdhocCloud,
    TargetEnv::Container,
  ];

  /// The value of `deployment.targetEnv` selecting this profile.
  pub fn as_str(&self) -> &'static str {
    match self {
      TargetEnv::None => "none",
      TargetEnv::Ec2 => "ec2",
      TargetEnv::VirtualBox => "virtualbox",
      TargetEnv::AdhocCloud => "adhoc-cloud",
      TargetEnv::Container => "container",
    }
  }

  /// Option namespace owned by this profile, if any.
  pub fn namespace(&self) -> Option<&'static str> {
    match self {
      TargetEnv::None => None,
      TargetEnv::Ec2 => Some("deployment.ec2"),
      TargetEnv::VirtualBox => Some("deployment.virtualbox"),
      TargetEnv::AdhocCloud => Some("deployment.adhoc"),
      TargetEnv::Container => Some("deployment.container"),
    }
  }

  /// The profile whose namespace contains `path`, or `None` for options that
  /// belong to every profile.
  pub fn owner_of(path: &str) -> Option<TargetEnv> {
    Self::ALL.into_iter().find(|env| {
      env.namespace().is_some_and(|ns| {
        path
          .strip_prefix(ns)
          .is_some_and(|rest| rest.is_empty() || rest.starts_with('.'))
      })
    })
  }

  /// Whether options at `path` take effect when `self` is the selected profile.
  pub fn is_active(&self, path: &str) -> bool {
    Self::owner_of(path).is_none_or(|owner| owner == *self)
  }
}

impl FromStr for TargetEnv {
  type Err = ResolveError;

  fn from_str(s: &str) -> Result<Self> {
    Self::ALL
      .into_iter()
      .find(|env| env.as_str() == s)
      .ok_or_else(|| ResolveError::UnknownEnvironment {
        value: format!("{:?}", s),
      })
  }
}

impl fmt::Display for TargetEnv {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Select the profile named by a resolved `deployment.targetEnv` value.
///
/// # Errors
///
/// Returns [`ResolveError::UnknownEnvironment`] for anything other than the five
/// recognised names.
pub fn select(resolved_target_env: &str) -> Result<TargetEnv> {
  resolved_target_env.parse()
}
