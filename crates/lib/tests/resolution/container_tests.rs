use charon_lib::options::paths::*;
use charon_lib::priority::{Priority, Provenance};
use charon_lib::{Deployment, Value};

use super::common::{NETWORK, machine, resolved};

#[test]
fn forced_fragment_beats_explicit_dhcp() {
  let config = resolved(&machine("container").define(NETWORK, USE_DHCP, true));

  let dhcp = config.get(USE_DHCP).unwrap();
  assert_eq!(dhcp.value, Value::Bool(false));
  assert_eq!(dhcp.priority, Priority::Forced);
  assert_eq!(
    dhcp.provenance,
    Provenance::Fragment {
      fragment: "container-networking".to_string()
    }
  );
}

#[test]
fn container_runs_sshd_eagerly() {
  let config = resolved(&machine("container"));

  assert!(config.get_bool(OPENSSH_ENABLE).unwrap());
  assert!(!config.get_bool(OPENSSH_START_WHEN_NEEDED).unwrap());
  assert_eq!(config.get_str(OPENSSH_EXTRA_CONFIG).unwrap(), "UseDNS no");
}

#[test]
fn agreeing_explicit_value_still_reports_forced() {
  let config = resolved(&machine("container").define(NETWORK, OPENSSH_ENABLE, true));
  assert_eq!(config.get(OPENSSH_ENABLE).unwrap().priority, Priority::Forced);
}

#[test]
fn other_profiles_keep_explicit_dhcp() {
  for env in ["none", "virtualbox"] {
    let config = resolved(&machine(env).define(NETWORK, USE_DHCP, false));
    let dhcp = config.get(USE_DHCP).unwrap();
    assert_eq!(dhcp.value, Value::Bool(false));
    assert_eq!(dhcp.priority, Priority::Explicit, "under {}", env);
  }

  let config = resolved(&machine("none"));
  assert!(config.get_bool(USE_DHCP).unwrap());
  assert!(!config.get_bool(OPENSSH_ENABLE).unwrap());
}

#[test]
fn deployment_payload_carries_host() {
  let config = resolved(&machine("container").define(NETWORK, CONTAINER_HOST, "root@host"));
  assert_eq!(
    config.deployment().unwrap(),
    Deployment::Container(charon_lib::env::ContainerTarget {
      host: "root@host".to_string()
    })
  );
}
