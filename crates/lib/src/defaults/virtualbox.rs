//! VirtualBox derived defaults.

use tracing::warn;

use super::rule::RuleInputs;
use crate::options::paths::SYSTEM;
use crate::platform::Platform;
use crate::platform::arch::Arch;
use crate::platform::os::Os;
use crate::value::Value;

/// The only system prebuilt VirtualBox images exist for.
pub const IMAGE_SYSTEM: Platform = Platform::new(Arch::X86_64, Os::Linux);

/// Prebuilt VDI images, keyed by system.
const BASE_IMAGES: &[(Platform, &str)] = &[(
  IMAGE_SYSTEM,
  "http://nixos.org/releases/nixos/virtualbox-charon-images/virtualbox-charon-r29930-x86_64-linux.vdi.xz",
)];

/// Prebuilt base image for a system string, if one exists.
pub fn base_image_for(system: &str) -> Option<&'static str> {
  let platform: Platform = system.parse().ok()?;
  BASE_IMAGES.iter().find(|(p, _)| *p == platform).map(|(_, image)| *image)
}

pub(super) fn default_system(_: &RuleInputs) -> Option<Value> {
  Some(Value::from(IMAGE_SYSTEM.triple()))
}

pub(super) fn default_base_image(inputs: &RuleInputs) -> Option<Value> {
  let system = inputs.get_str(SYSTEM).unwrap_or_default();
  match base_image_for(system) {
    Some(image) => Some(Value::from(image)),
    None => {
      warn!(system = %system, "no prebuilt VirtualBox image for system, baseImage must be set explicitly");
      Some(Value::Unknown)
    }
  }
}
