use charon_lib::options::paths::*;
use charon_lib::priority::Priority;
use charon_lib::{Deployment, MachineSpec, ResolveError, TargetEnv, Value, resolve};

use super::common::{NETWORK, ec2_machine, machine, resolved};

const PROFILE_NAMESPACES: [&str; 4] = [
  "deployment.ec2.",
  "deployment.virtualbox.",
  "deployment.adhoc.",
  "deployment.container.",
];

#[test]
fn default_profile_is_none() {
  let config = resolved(&MachineSpec::new("bare"));

  assert_eq!(config.profile(), TargetEnv::None);
  assert_eq!(config.get(TARGET_ENV).unwrap().priority, Priority::Declared);
  assert_eq!(config.deployment().unwrap(), Deployment::None);
}

#[test]
fn inert_namespaces_are_absent() {
  let config = resolved(&MachineSpec::new("bare"));
  for (path, _) in config.iter() {
    assert!(
      !PROFILE_NAMESPACES.iter().any(|ns| path.starts_with(ns)),
      "{} should not be resolved under none",
      path
    );
  }
}

#[test]
fn only_the_selected_namespace_is_present() {
  let config = resolved(&ec2_machine("us-east-1"));
  assert!(config.contains(EC2_AMI));
  assert!(!config.contains(VBOX_BASE_IMAGE));
  assert!(!config.contains(VBOX_MEMORY_SIZE));
  assert!(!config.contains(ADHOC_CONTROLLER));
  assert!(!config.contains(CONTAINER_HOST));
}

#[test]
fn required_options_of_inactive_profiles_are_never_required() {
  // deployment.ec2.keyPair and deployment.adhoc.controller have no default.
  for env in ["none", "virtualbox", "container"] {
    assert!(resolve(&machine(env)).is_ok(), "{} should resolve", env);
  }
}

#[test]
fn explicit_inert_values_are_kept_verbatim() {
  let config = resolved(
    &machine("none")
      .define("ec2.json", EC2_REGION, 5_i64)
      .define("ec2.json", EC2_KEY_PAIR, "kept"),
  );

  let region = config.get(EC2_REGION).unwrap();
  assert_eq!(region.value, Value::Int(5));
  assert_eq!(region.priority, Priority::Explicit);
  assert_eq!(config.value(EC2_KEY_PAIR), Some(&Value::from("kept")));
  // Setting the region does not wake the ec2 rules up.
  assert!(!config.contains(EC2_AMI));
  assert!(!config.contains(EC2_CONTROLLER));
}

#[test]
fn adhoc_requires_a_controller() {
  assert_eq!(
    resolve(&machine("adhoc-cloud")),
    Err(ResolveError::MissingValue {
      path: ADHOC_CONTROLLER.to_string()
    })
  );

  let config = resolved(&machine("adhoc-cloud").define(NETWORK, ADHOC_CONTROLLER, "root@cloud"));
  let Deployment::AdhocCloud(target) = config.deployment().unwrap() else {
    panic!("expected an adhoc deployment");
  };
  assert_eq!(target.controller, "root@cloud");
  assert_eq!(target.create_vm_command, "create-vm");
  assert_eq!(target.query_vm_command, "query-vm");
}

#[test]
fn unknown_environment_is_rejected() {
  let err = resolve(&machine("openstack")).unwrap_err();
  assert!(matches!(err, ResolveError::UnknownEnvironment { ref value } if value.contains("openstack")));
}

#[test]
fn non_string_environment_is_rejected() {
  let spec = MachineSpec::new("web").define(NETWORK, TARGET_ENV, true);
  assert!(matches!(resolve(&spec), Err(ResolveError::UnknownEnvironment { .. })));
}

#[test]
fn undeclared_option_is_rejected() {
  let spec = machine("none").define("extra.json", "deployment.ec2.zone", "us-east-1a");
  assert_eq!(
    resolve(&spec),
    Err(ResolveError::UnknownAttribute {
      path: "deployment.ec2.zone".to_string(),
      defined_by: "extra.json".to_string(),
    })
  );
}

#[test]
fn active_values_are_type_checked() {
  let spec = machine("none").define(NETWORK, USE_DHCP, "yes");
  assert!(matches!(
    resolve(&spec),
    Err(ResolveError::TypeMismatch { ref path, .. }) if path == USE_DHCP
  ));
}

#[test]
fn target_host_follows_host_name() {
  let config = resolved(&machine("none"));
  assert_eq!(config.get_str(TARGET_HOST).unwrap(), "nixos");

  let config = resolved(&machine("none").define(NETWORK, HOST_NAME, "web01"));
  let host = config.get(TARGET_HOST).unwrap();
  assert_eq!(host.value, Value::from("web01"));
  assert_eq!(host.priority, Priority::Computed);

  let config = resolved(
    &machine("none")
      .define(NETWORK, HOST_NAME, "web01")
      .define(NETWORK, TARGET_HOST, "10.0.0.7"),
  );
  assert_eq!(config.get_str(TARGET_HOST).unwrap(), "10.0.0.7");
}

#[test]
fn user_null_is_not_the_sentinel() {
  let spec = MachineSpec::from_json_str(
    r#"{ "name": "web", "definitions": [ { "source": "net.json", "values": { "networking.useDHCP": null } } ] }"#,
  )
  .unwrap();
  assert!(matches!(
    resolve(&spec),
    Err(ResolveError::TypeMismatch { ref path, ref expected, .. }) if path == USE_DHCP && expected == "boolean"
  ));
}

#[test]
fn null_does_not_satisfy_a_required_option() {
  let spec = machine("ec2")
    .define(NETWORK, EC2_REGION, "us-east-1")
    .define(NETWORK, EC2_KEY_PAIR, Value::Unknown);
  assert!(matches!(
    resolve(&spec),
    Err(ResolveError::TypeMismatch { ref path, .. }) if path == EC2_KEY_PAIR
  ));
}

#[test]
fn null_is_rejected_in_inert_namespaces_too() {
  let spec = machine("none").define("vbox.yaml", VBOX_BASE_IMAGE, Value::Unknown);
  assert!(matches!(
    resolve(&spec),
    Err(ResolveError::TypeMismatch { ref path, .. }) if path == VBOX_BASE_IMAGE
  ));
}
