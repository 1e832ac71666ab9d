use std::collections::BTreeMap;

use charon_lib::options::paths::*;
use charon_lib::priority::{Priority, Provenance};
use charon_lib::{Deployment, ResolveError, Value, resolve};

use super::common::{NETWORK, ec2_machine, machine, resolved};

#[test]
fn ami_is_looked_up_by_region_and_system() {
  let config = resolved(&ec2_machine("us-east-1"));

  let ami = config.get(EC2_AMI).unwrap();
  assert_eq!(ami.value, Value::from("ami-d9409fb0"));
  assert_eq!(ami.priority, Priority::Computed);
  assert_eq!(
    ami.provenance,
    Provenance::Rule {
      rule: "ec2-ami".to_string()
    }
  );
}

#[test]
fn ami_follows_an_explicit_system() {
  let config = resolved(&ec2_machine("eu-west-1").define(NETWORK, SYSTEM, "i686-linux"));
  assert_eq!(config.value(EC2_AMI), Some(&Value::from("ami-4f0a1d3b")));
}

#[test]
fn unknown_region_resolves_to_sentinel() {
  let config = resolved(&ec2_machine("sa-east-1"));

  assert_eq!(config.value(EC2_AMI), Some(&Value::Unknown));
  assert_eq!(
    config.require_known(EC2_AMI),
    Err(ResolveError::UnresolvedSentinel {
      path: EC2_AMI.to_string()
    })
  );

  let Deployment::Ec2(target) = config.deployment().unwrap() else {
    panic!("expected an ec2 deployment");
  };
  assert_eq!(target.ami, None);
}

#[test]
fn explicit_ami_beats_the_lookup() {
  let config = resolved(&ec2_machine("sa-east-1").define(NETWORK, EC2_AMI, "ami-12345678"));

  let ami = config.get(EC2_AMI).unwrap();
  assert_eq!(ami.value, Value::from("ami-12345678"));
  assert_eq!(ami.priority, Priority::Explicit);
  assert!(config.require_known(EC2_AMI).is_ok());
}

#[test]
fn two_ephemeral_devices_for_m1_large() {
  let config = resolved(&ec2_machine("us-east-1").define(NETWORK, EC2_INSTANCE_TYPE, "m1.large"));

  let expected: BTreeMap<String, String> = [("/dev/sdb", "ephemeral0"), ("/dev/sdc", "ephemeral1")]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect();
  assert_eq!(config.get_map(EC2_BLOCK_DEVICE_MAPPING).unwrap(), &expected);
}

#[test]
fn four_ephemeral_devices_for_m1_xlarge() {
  let config = resolved(&ec2_machine("us-east-1").define(NETWORK, EC2_INSTANCE_TYPE, "m1.xlarge"));

  let devices: Vec<&str> = config
    .get_map(EC2_BLOCK_DEVICE_MAPPING)
    .unwrap()
    .keys()
    .map(String::as_str)
    .collect();
  assert_eq!(devices, ["/dev/sdb", "/dev/sdc", "/dev/sdd", "/dev/sde"]);
}

#[test]
fn untabled_instance_type_has_no_devices() {
  let config = resolved(&ec2_machine("us-east-1").define(NETWORK, EC2_INSTANCE_TYPE, "t2.nano"));
  assert!(config.get_map(EC2_BLOCK_DEVICE_MAPPING).unwrap().is_empty());
}

#[test]
fn default_instance_type_has_one_device() {
  let config = resolved(&ec2_machine("us-east-1"));
  assert_eq!(config.value(EC2_INSTANCE_TYPE), Some(&Value::from("m1.small")));
  assert_eq!(config.get_map(EC2_BLOCK_DEVICE_MAPPING).unwrap().len(), 1);
}

#[test]
fn controller_is_templated_from_region() {
  let config = resolved(&ec2_machine("eu-west-1"));
  assert_eq!(
    config.get_str(EC2_CONTROLLER).unwrap(),
    "https://ec2.eu-west-1.amazonaws.com/"
  );
}

#[test]
fn empty_region_leaves_controller_undefined() {
  let spec = machine("ec2").define(NETWORK, EC2_KEY_PAIR, "web-key");
  assert_eq!(
    resolve(&spec),
    Err(ResolveError::MissingValue {
      path: EC2_CONTROLLER.to_string()
    })
  );
}

#[test]
fn key_pair_is_required() {
  let spec = machine("ec2").define(NETWORK, EC2_REGION, "us-east-1");
  assert_eq!(
    resolve(&spec),
    Err(ResolveError::MissingValue {
      path: EC2_KEY_PAIR.to_string()
    })
  );
}

#[test]
fn deployment_payload_carries_ec2_options() {
  let config = resolved(
    &ec2_machine("us-east-1")
      .define("ec2.json", EC2_SECURITY_GROUPS, vec!["web".to_string()])
      .define("ec2.json", EC2_INSTANCE_TYPE, "m1.large"),
  );

  assert_eq!(config.deployment().unwrap().target_env(), charon_lib::TargetEnv::Ec2);
  let Deployment::Ec2(target) = config.deployment().unwrap() else {
    panic!("expected an ec2 deployment");
  };
  assert_eq!(target.region, "us-east-1");
  assert_eq!(target.key_pair, "web-key");
  assert_eq!(target.ami.as_deref(), Some("ami-d9409fb0"));
  assert_eq!(target.security_groups, ["web"]);
  assert_eq!(target.block_device_mapping.len(), 2);
  assert!(target.tags.is_empty());
}
