//! Computed defaults.
//!
//! Each [`DefaultRule`] derives a candidate for one option from other resolved
//! options. Candidates are produced at [`Priority::Computed`](crate::priority::Priority::Computed),
//! so they beat declared defaults and lose to anything the user writes.
//!
//! Lookup misses never fail: the AMI and base image rules yield
//! [`Value::Unknown`](crate::value::Value::Unknown), and an instance type
//! without ephemeral stores yields an empty block device mapping.

pub mod ec2;
mod graph;
mod rule;
pub mod virtualbox;

pub use graph::RuleGraph;
pub use rule::{ComputeFn, DefaultRule, RuleInputs};

use crate::env::TargetEnv;
use crate::options::paths::*;
use crate::value::Value;

fn default_target_host(inputs: &RuleInputs) -> Option<Value> {
  inputs.get_str(HOST_NAME).map(Value::from)
}

/// The rules every resolver starts with.
pub fn builtin_rules() -> Vec<DefaultRule> {
  vec![
    DefaultRule::new("target-host-from-host-name", TARGET_HOST, default_target_host).reading([HOST_NAME]),
    DefaultRule::new("ec2-controller", EC2_CONTROLLER, ec2::default_controller)
      .under(TargetEnv::Ec2)
      .reading([EC2_REGION]),
    DefaultRule::new("ec2-ami", EC2_AMI, ec2::default_ami)
      .under(TargetEnv::Ec2)
      .reading([EC2_REGION, SYSTEM]),
    DefaultRule::new(
      "ec2-block-device-mapping",
      EC2_BLOCK_DEVICE_MAPPING,
      ec2::default_block_device_mapping,
    )
    .under(TargetEnv::Ec2)
    .reading([EC2_INSTANCE_TYPE]),
    DefaultRule::new("virtualbox-system", SYSTEM, virtualbox::default_system).under(TargetEnv::VirtualBox),
    DefaultRule::new("virtualbox-base-image", VBOX_BASE_IMAGE, virtualbox::default_base_image)
      .under(TargetEnv::VirtualBox)
      .reading([SYSTEM]),
  ]
}
