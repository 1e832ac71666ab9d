use charon_lib::defaults::{DefaultRule, RuleInputs};
use charon_lib::options::paths::*;
use charon_lib::priority::Priority;
use charon_lib::{MachineSpec, ResolveError, Resolver, Value, resolve};
use proptest::prelude::*;

use super::common::{NETWORK, ec2_machine, machine, resolved};

fn echo_target_host(inputs: &RuleInputs) -> Option<Value> {
  inputs.get(TARGET_HOST).cloned()
}

fn fixed_host_name(_: &RuleInputs) -> Option<Value> {
  Some(Value::from("from-rule"))
}

#[test]
fn conflicting_layers_are_ambiguous() {
  let spec = machine("none")
    .define("a.json", HOST_NAME, "alpha")
    .define("b.json", HOST_NAME, "beta");

  let Err(ResolveError::AmbiguousOverride { path, priority, sources }) = resolve(&spec) else {
    panic!("expected an ambiguous override");
  };
  assert_eq!(path, HOST_NAME);
  assert_eq!(priority, Priority::Explicit);
  assert_eq!(sources, ["definition in a.json", "definition in b.json"]);
}

#[test]
fn agreeing_layers_collapse() {
  let config = resolved(
    &machine("none")
      .define("a.json", HOST_NAME, "alpha")
      .define("b.json", HOST_NAME, "alpha"),
  );
  assert_eq!(config.get_str(HOST_NAME).unwrap(), "alpha");
}

#[test]
fn mutually_dependent_rules_are_circular() {
  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("host-name-from-target-host", HOST_NAME, echo_target_host).reading([TARGET_HOST]));

  assert_eq!(
    resolver.resolve(&machine("none")),
    Err(ResolveError::CircularDefault {
      paths: vec![TARGET_HOST.to_string(), HOST_NAME.to_string()],
    })
  );
}

#[test]
fn custom_rule_feeds_builtin_rules() {
  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("fixed-host-name", HOST_NAME, fixed_host_name));

  let config = resolver.resolve(&machine("none")).unwrap();
  assert_eq!(config.get_str(HOST_NAME).unwrap(), "from-rule");
  assert_eq!(config.get_str(TARGET_HOST).unwrap(), "from-rule");
}

#[test]
fn custom_rule_replaces_builtin_for_same_path() {
  fn no_ami(_: &RuleInputs) -> Option<Value> {
    Some(Value::from("ami-00000000"))
  }

  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("pinned-ami", EC2_AMI, no_ami).under(charon_lib::TargetEnv::Ec2));
  assert_eq!(resolver.rules().filter(|r| r.path == EC2_AMI).count(), 1);

  let config = resolver.resolve(&ec2_machine("us-east-1")).unwrap();
  assert_eq!(config.get_str(EC2_AMI).unwrap(), "ami-00000000");
}

#[test]
fn rule_for_undeclared_option_is_rejected() {
  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("misspelled-host-name", "networking.hostname", fixed_host_name));

  assert_eq!(
    resolver.resolve(&machine("none")),
    Err(ResolveError::UnknownAttribute {
      path: "networking.hostname".to_string(),
      defined_by: "rule misspelled-host-name".to_string(),
    })
  );
}

#[test]
fn rule_reading_undeclared_option_is_rejected() {
  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("host-name-from-typo", HOST_NAME, echo_target_host).reading(["networking.hostNmae"]));

  assert_eq!(
    resolver.resolve(&machine("none")),
    Err(ResolveError::UnknownAttribute {
      path: "networking.hostNmae".to_string(),
      defined_by: "rule host-name-from-typo".to_string(),
    })
  );
}

#[test]
fn rules_of_inactive_profiles_are_checked_too() {
  let resolver = Resolver::builtin()
    .unwrap()
    .with_rule(DefaultRule::new("ec2-zone", "deployment.ec2.zone", fixed_host_name).under(charon_lib::TargetEnv::Ec2));

  assert!(matches!(
    resolver.resolve(&machine("none")),
    Err(ResolveError::UnknownAttribute { ref path, .. }) if path == "deployment.ec2.zone"
  ));
}

#[test]
fn resolve_all_keeps_input_order() {
  let specs = vec![ec2_machine("us-east-1"), machine("openstack"), machine("container")];
  let results = Resolver::builtin().unwrap().resolve_all(&specs);

  assert_eq!(results.len(), 3);
  assert_eq!(results[0].as_ref().unwrap().profile(), charon_lib::TargetEnv::Ec2);
  assert!(matches!(results[1], Err(ResolveError::UnknownEnvironment { .. })));
  assert_eq!(results[2].as_ref().unwrap().profile(), charon_lib::TargetEnv::Container);
}

proptest! {
  #[test]
  fn explicit_beats_computed(host in "[a-z][a-z0-9-]{0,15}", target in "[a-z0-9.]{1,20}") {
    let spec = MachineSpec::new("web")
      .define(NETWORK, HOST_NAME, host.as_str())
      .define(NETWORK, TARGET_HOST, target.as_str());
    let config = resolve(&spec).unwrap();

    let attr = config.get(TARGET_HOST).unwrap();
    prop_assert_eq!(&attr.value, &Value::from(target.as_str()));
    prop_assert_eq!(attr.priority, Priority::Explicit);
  }

  #[test]
  fn forced_beats_explicit(dhcp in any::<bool>(), start in any::<bool>()) {
    let spec = machine("container")
      .define(NETWORK, USE_DHCP, dhcp)
      .define(NETWORK, OPENSSH_START_WHEN_NEEDED, start);
    let config = resolve(&spec).unwrap();

    prop_assert!(!config.get_bool(USE_DHCP).unwrap());
    prop_assert!(!config.get_bool(OPENSSH_START_WHEN_NEEDED).unwrap());
  }

  #[test]
  fn resolution_is_idempotent(
    region in prop::sample::select(vec!["us-east-1", "eu-west-1", "sa-east-1", ""]),
    instance in prop::sample::select(vec!["m1.small", "m1.large", "c1.xlarge", "t2.nano"]),
  ) {
    let spec = ec2_machine(region)
      .define(NETWORK, EC2_CONTROLLER, "https://ec2.example.org/")
      .define(NETWORK, EC2_INSTANCE_TYPE, instance);

    let first = resolve(&spec).unwrap();
    let second = resolve(&spec).unwrap();
    prop_assert_eq!(&first, &second);
    prop_assert_eq!(first.content_hash().unwrap(), second.content_hash().unwrap());
  }
}
