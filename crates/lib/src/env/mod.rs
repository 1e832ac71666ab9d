//! Environment selection.
//!
//! `deployment.targetEnv` picks exactly one [`TargetEnv`]. Options under the
//! namespace of any other profile are inert for that machine: they get no
//! defaults, no computed values and are never required.

mod deployment;
mod target;

pub use deployment::{AdhocTarget, ContainerTarget, Deployment, Ec2Target, VirtualBoxTarget};
pub use target::{TargetEnv, select};
