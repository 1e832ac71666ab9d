//! charon-lib: machine configuration resolution for Charon deployments
//!
//! This crate turns a machine specification into the configuration a
//! deployment driver acts on:
//! - `OptionSchema`: every declared option with its type and declared default
//! - `TargetEnv`: the deployment profile selected by `deployment.targetEnv`
//! - `DefaultRule`: computed defaults (EC2 AMI, block devices, VirtualBox image)
//! - `Fragment`: profile-imposed assignments that override user input
//! - `ResolvedConfig`: the frozen result, one winning value per option
//! - `DocRecord`: documentation records produced by the schema exporter

pub mod activate;
pub mod consts;
pub mod defaults;
pub mod env;
pub mod error;
pub mod export;
pub mod options;
pub mod platform;
pub mod priority;
pub mod resolve;
pub mod spec;
pub mod util;
pub mod value;

pub use env::{Deployment, TargetEnv};
pub use error::{ResolveError, Result};
pub use options::{OptionDecl, OptionSchema, machine_schema};
pub use resolve::{ResolvedConfig, Resolver, resolve};
pub use spec::MachineSpec;
pub use value::{OptionType, Value};
