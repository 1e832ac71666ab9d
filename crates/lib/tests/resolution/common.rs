use charon_lib::options::paths::*;
use charon_lib::{MachineSpec, ResolvedConfig, resolve};

pub const NETWORK: &str = "network.json";

/// A machine targeting `env` with no other definitions.
pub fn machine(env: &str) -> MachineSpec {
  MachineSpec::new("web").define(NETWORK, TARGET_ENV, env)
}

/// An EC2 machine with everything required set.
pub fn ec2_machine(region: &str) -> MachineSpec {
  machine("ec2")
    .define(NETWORK, EC2_REGION, region)
    .define(NETWORK, EC2_KEY_PAIR, "web-key")
}

pub fn resolved(spec: &MachineSpec) -> ResolvedConfig {
  resolve(spec).unwrap()
}
