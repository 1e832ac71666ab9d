//! EC2 derived defaults: controller endpoint, AMI and block device mapping.
//!
//! The tables here are part of the external contract. Changing a row changes
//! what existing machine specifications resolve to.

use std::collections::BTreeMap;

use tracing::warn;

use super::rule::RuleInputs;
use crate::options::paths::{EC2_INSTANCE_TYPE, EC2_REGION, SYSTEM};
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;
use crate::value::Value;

const X86_64_LINUX: Platform = Platform::new(Arch::X86_64, Os::Linux);
const I686_LINUX: Platform = Platform::new(Arch::I686, Os::Linux);

/// EBS-backed NixOS AMIs, keyed by (region, system).
const AMIS: &[(&str, Platform, &str)] = &[
  ("eu-west-1", I686_LINUX, "ami-4f0a1d3b"),
  ("eu-west-1", X86_64_LINUX, "ami-4d0a1d39"),
  ("us-east-1", I686_LINUX, "ami-cf409fa6"),
  ("us-east-1", X86_64_LINUX, "ami-d9409fb0"),
  ("us-west-1", X86_64_LINUX, "ami-4996ce0c"),
];

/// Instance types grouped by how many ephemeral stores they come with.
const EPHEMERAL_TIERS: &[(usize, &[&str])] = &[
  (1, &["c1.medium", "m1.medium", "m1.small", "m2.2xlarge", "m2.xlarge"]),
  (2, &["cc1.4xlarge", "cg1.4xlarge", "m1.large", "m2.4xlarge"]),
  (4, &["c1.xlarge", "cc2.8xlarge", "m1.xlarge"]),
];

/// Controller endpoint for `region`, or `None` for an empty region.
pub fn controller_url(region: &str) -> Option<String> {
  if region.is_empty() {
    None
  } else {
    Some(format!("https://ec2.{}.amazonaws.com/", region))
  }
}

/// AMI for a region and system string, if one is known.
pub fn ami_for(region: &str, system: &str) -> Option<&'static str> {
  let platform: Platform = system.parse().ok()?;
  AMIS
    .iter()
    .find(|(r, p, _)| *r == region && *p == platform)
    .map(|(_, _, ami)| *ami)
}

/// Number of ephemeral stores of `instance_type`; zero for unlisted types.
pub fn ephemeral_device_count(instance_type: &str) -> usize {
  EPHEMERAL_TIERS
    .iter()
    .find(|(_, types)| types.contains(&instance_type))
    .map(|(count, _)| *count)
    .unwrap_or(0)
}

/// Map every ephemeral store of `instance_type` to successive devices,
/// starting at `/dev/sdb`.
pub fn block_device_mapping(instance_type: &str) -> BTreeMap<String, String> {
  (0..ephemeral_device_count(instance_type))
    .map(|i| {
      let letter = char::from(b'b' + i as u8);
      (format!("/dev/sd{}", letter), format!("ephemeral{}", i))
    })
    .collect()
}

pub(super) fn default_controller(inputs: &RuleInputs) -> Option<Value> {
  controller_url(inputs.get_str(EC2_REGION)?).map(Value::from)
}

pub(super) fn default_ami(inputs: &RuleInputs) -> Option<Value> {
  let region = inputs.get_str(EC2_REGION).unwrap_or_default();
  let system = inputs.get_str(SYSTEM).unwrap_or_default();
  match ami_for(region, system) {
    Some(ami) => Some(Value::from(ami)),
    None => {
      warn!(region = %region, system = %system, "no AMI known for region and system, leaving it unresolved");
      Some(Value::Unknown)
    }
  }
}

pub(super) fn default_block_device_mapping(inputs: &RuleInputs) -> Option<Value> {
  let instance_type = inputs.get_str(EC2_INSTANCE_TYPE).unwrap_or_default();
  Some(Value::Map(block_device_mapping(instance_type)))
}
