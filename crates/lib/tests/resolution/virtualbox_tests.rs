use charon_lib::options::paths::*;
use charon_lib::priority::Priority;
use charon_lib::{Deployment, ResolveError, Value};

use super::common::{NETWORK, machine, resolved};

#[test]
fn base_image_for_default_system() {
  let config = resolved(&machine("virtualbox"));

  let image = config.get_str(VBOX_BASE_IMAGE).unwrap();
  assert!(image.ends_with("x86_64-linux.vdi.xz"), "{}", image);
  assert_eq!(config.get(SYSTEM).unwrap().priority, Priority::Computed);
}

#[test]
fn unsupported_system_resolves_to_sentinel() {
  let config = resolved(&machine("virtualbox").define(NETWORK, SYSTEM, "i686-linux"));

  assert_eq!(config.value(SYSTEM), Some(&Value::from("i686-linux")));
  assert_eq!(config.value(VBOX_BASE_IMAGE), Some(&Value::Unknown));
  assert_eq!(
    config.require_known(VBOX_BASE_IMAGE),
    Err(ResolveError::UnresolvedSentinel {
      path: VBOX_BASE_IMAGE.to_string()
    })
  );
}

#[test]
fn explicit_base_image_wins() {
  let config = resolved(
    &machine("virtualbox")
      .define(NETWORK, SYSTEM, "i686-linux")
      .define("vbox.json", VBOX_BASE_IMAGE, "/srv/images/i686.vdi"),
  );
  assert_eq!(config.get_str(VBOX_BASE_IMAGE).unwrap(), "/srv/images/i686.vdi");
}

#[test]
fn deployment_payload_carries_virtualbox_options() {
  let config = resolved(&machine("virtualbox").define("vbox.json", VBOX_HEADLESS, true));

  let Deployment::VirtualBox(target) = config.deployment().unwrap() else {
    panic!("expected a virtualbox deployment");
  };
  assert_eq!(target.memory_size, 512);
  assert!(target.headless);
  assert!(target.base_image.is_some());
}

#[test]
fn system_is_not_pinned_outside_virtualbox() {
  let config = resolved(&machine("none"));
  assert_eq!(config.get(SYSTEM).unwrap().priority, Priority::Declared);
}
