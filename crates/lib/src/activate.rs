//! Profile fragments.
//!
//! A fragment is a fixed set of assignments that one profile imposes on the
//! machine. Assignments are applied at [`Priority::Forced`](crate::priority::Priority::Forced),
//! above explicit user definitions, because they encode constraints of the
//! environment itself. Fragments of profiles that are not selected are never
//! produced, so they cannot affect resolution in any way.

use std::collections::BTreeMap;

use crate::env::TargetEnv;
use crate::options::paths::*;
use crate::value::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fragment {
  pub name: &'static str,
  pub profile: TargetEnv,
  pub assignments: BTreeMap<String, Value>,
}

impl Fragment {
  fn new(name: &'static str, profile: TargetEnv) -> Self {
    Self {
      name,
      profile,
      assignments: BTreeMap::new(),
    }
  }

  fn set(mut self, path: &str, value: impl Into<Value>) -> Self {
    self.assignments.insert(path.to_string(), value.into());
    self
  }
}

/// Fragments imposed by `profile`.
pub fn activate(profile: TargetEnv) -> Vec<Fragment> {
  match profile {
    TargetEnv::Container => vec![container_networking()],
    TargetEnv::None | TargetEnv::Ec2 | TargetEnv::VirtualBox | TargetEnv::AdhocCloud => Vec::new(),
  }
}

/// Containers get their address from the host, never from DHCP, and are only
/// reachable through sshd, which must be up before the first connection.
fn container_networking() -> Fragment {
  Fragment::new("container-networking", TargetEnv::Container)
    .set(USE_DHCP, false)
    .set(OPENSSH_ENABLE, true)
    .set(OPENSSH_START_WHEN_NEEDED, false)
    .set(OPENSSH_EXTRA_CONFIG, "UseDNS no")
}
