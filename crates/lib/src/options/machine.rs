//! The built-in option catalogue for a deployable machine.

use std::collections::BTreeMap;

use super::schema::OptionSchema;
use super::types::OptionDecl;
use crate::env::TargetEnv;
use crate::error::Result;
use crate::value::{OptionType, Value};

/// Paths of the options the resolver, rules and fragments refer to by name.
pub mod paths {
  pub const TARGET_ENV: &str = "deployment.targetEnv";
  pub const TARGET_HOST: &str = "deployment.targetHost";
  pub const HOST_NAME: &str = "networking.hostName";
  pub const USE_DHCP: &str = "networking.useDHCP";
  pub const SYSTEM: &str = "nixpkgs.system";
  pub const OPENSSH_ENABLE: &str = "services.openssh.enable";
  pub const OPENSSH_START_WHEN_NEEDED: &str = "services.openssh.startWhenNeeded";
  pub const OPENSSH_EXTRA_CONFIG: &str = "services.openssh.extraConfig";

  pub const EC2_REGION: &str = "deployment.ec2.region";
  pub const EC2_CONTROLLER: &str = "deployment.ec2.controller";
  pub const EC2_ACCESS_KEY_ID: &str = "deployment.ec2.accessKeyId";
  pub const EC2_KEY_PAIR: &str = "deployment.ec2.keyPair";
  pub const EC2_PRIVATE_KEY: &str = "deployment.ec2.privateKey";
  pub const EC2_INSTANCE_TYPE: &str = "deployment.ec2.instanceType";
  pub const EC2_AMI: &str = "deployment.ec2.ami";
  pub const EC2_SECURITY_GROUPS: &str = "deployment.ec2.securityGroups";
  pub const EC2_TAGS: &str = "deployment.ec2.tags";
  pub const EC2_ELASTIC_IPV4: &str = "deployment.ec2.elasticIPv4";
  pub const EC2_BLOCK_DEVICE_MAPPING: &str = "deployment.ec2.blockDeviceMapping";

  pub const VBOX_MEMORY_SIZE: &str = "deployment.virtualbox.memorySize";
  pub const VBOX_HEADLESS: &str = "deployment.virtualbox.headless";
  pub const VBOX_BASE_IMAGE: &str = "deployment.virtualbox.baseImage";

  pub const ADHOC_CONTROLLER: &str = "deployment.adhoc.controller";
  pub const ADHOC_CREATE_VM_COMMAND: &str = "deployment.adhoc.createVMCommand";
  pub const ADHOC_DESTROY_VM_COMMAND: &str = "deployment.adhoc.destroyVMCommand";
  pub const ADHOC_QUERY_VM_COMMAND: &str = "deployment.adhoc.queryVMCommand";

  pub const CONTAINER_HOST: &str = "deployment.container.host";
}

use paths::*;

const DEPLOYMENT: &str = "deployment/options";
const EC2: &str = "deployment/ec2";
const VIRTUALBOX: &str = "deployment/virtualbox";
const ADHOC: &str = "deployment/adhoc";
const CONTAINER: &str = "deployment/container";
const NETWORKING: &str = "networking";
const NIXPKGS: &str = "nixpkgs";
const OPENSSH: &str = "services/openssh";

/// Build the schema declaring every option a machine can set, across all
/// deployment profiles.
///
/// Options whose default is derived from other options carry only a
/// `default_text`; the actual value comes from the default rules in
/// [`crate::defaults`].
pub fn machine_schema() -> Result<OptionSchema> {
  let mut schema = OptionSchema::new();
  for decl in general().into_iter().chain(ec2()).chain(virtualbox()).chain(adhoc()).chain(container()) {
    schema.declare(decl)?;
  }
  Ok(schema)
}

fn general() -> Vec<OptionDecl> {
  vec![
    OptionDecl::new(
      TARGET_ENV,
      OptionType::one_of(TargetEnv::ALL.iter().map(|env| env.as_str())),
      "This option specifies the type of the environment in which the machine is to be deployed. \
       \"none\" means the machine already exists and is reachable over SSH at `deployment.targetHost`.",
    )
    .with_default(TargetEnv::None.as_str())
    .declared_by(DEPLOYMENT),
    OptionDecl::new(
      TARGET_HOST,
      OptionType::String,
      "The host name or IP address of the machine, used to reach it over SSH.",
    )
    .with_default_text("config.networking.hostName")
    .declared_by(DEPLOYMENT),
    OptionDecl::new(HOST_NAME, OptionType::String, "The name of the machine.")
      .with_default("nixos")
      .declared_by(NETWORKING),
    OptionDecl::new(
      USE_DHCP,
      OptionType::Bool,
      "Whether to use DHCP to obtain an IP address and other configuration for all network interfaces.",
    )
    .with_default(true)
    .declared_by(NETWORKING),
    OptionDecl::new(
      SYSTEM,
      OptionType::String,
      "The system type the machine runs, e.g. \"x86_64-linux\".",
    )
    .with_default("x86_64-linux")
    .declared_by(NIXPKGS),
    OptionDecl::new(OPENSSH_ENABLE, OptionType::Bool, "Whether to enable the OpenSSH secure shell daemon.")
      .with_default(false)
      .declared_by(OPENSSH),
    OptionDecl::new(
      OPENSSH_START_WHEN_NEEDED,
      OptionType::Bool,
      "If set, sshd is socket-activated on the first incoming connection instead of being started at boot.",
    )
    .with_default(true)
    .declared_by(OPENSSH),
    OptionDecl::new(OPENSSH_EXTRA_CONFIG, OptionType::String, "Verbatim contents of sshd_config.")
      .with_default("")
      .declared_by(OPENSSH),
  ]
}

fn ec2() -> Vec<OptionDecl> {
  vec![
    OptionDecl::new(
      EC2_REGION,
      OptionType::String,
      "Amazon EC2 region in which the instance is to be deployed, e.g. \"us-east-1\".",
    )
    .with_default("")
    .declared_by(EC2),
    OptionDecl::new(
      EC2_CONTROLLER,
      OptionType::String,
      "URI of an Amazon EC2-compatible cloud controller web service, used to create and manage virtual machines.",
    )
    .with_default_text("\"https://ec2.<region>.amazonaws.com/\"")
    .declared_by(EC2),
    OptionDecl::new(
      EC2_ACCESS_KEY_ID,
      OptionType::String,
      "The AWS Access Key ID. If empty, it is taken from the environment.",
    )
    .with_default("")
    .declared_by(EC2),
    OptionDecl::new(
      EC2_KEY_PAIR,
      OptionType::String,
      "Name of the SSH key pair to be used to communicate securely with the instance.",
    )
    .declared_by(EC2),
    OptionDecl::new(
      EC2_PRIVATE_KEY,
      OptionType::String,
      "Path of the SSH private key file corresponding with `deployment.ec2.keyPair`.",
    )
    .with_default("")
    .declared_by(EC2),
    OptionDecl::new(EC2_INSTANCE_TYPE, OptionType::String, "EC2 instance type.")
      .with_default("m1.small")
      .declared_by(EC2),
    OptionDecl::new(
      EC2_AMI,
      OptionType::String,
      "EC2 identifier of the AMI disk image used in the virtual machine. \
       The default is looked up by region and system; unknown combinations leave it unresolved.",
    )
    .with_default_text("lookup by deployment.ec2.region and nixpkgs.system")
    .declared_by(EC2),
    OptionDecl::new(
      EC2_SECURITY_GROUPS,
      OptionType::ListOfString,
      "Security groups for the instance.",
    )
    .with_default(vec!["default".to_string()])
    .declared_by(EC2),
    OptionDecl::new(
      EC2_TAGS,
      OptionType::AttrsOfString,
      "EC2 tags assigned to the instance.",
    )
    .with_default(Value::Map(BTreeMap::new()))
    .declared_by(EC2),
    OptionDecl::new(
      EC2_ELASTIC_IPV4,
      OptionType::String,
      "Elastic IPv4 address to associate with the instance.",
    )
    .with_default("")
    .declared_by(EC2),
    OptionDecl::new(
      EC2_BLOCK_DEVICE_MAPPING,
      OptionType::AttrsOfString,
      "Block device mapping, from device name to ephemeral store. \
       Defaults to every ephemeral store the instance type provides.",
    )
    .with_default_text("ephemeral stores of deployment.ec2.instanceType")
    .declared_by(EC2),
  ]
}

fn virtualbox() -> Vec<OptionDecl> {
  vec![
    OptionDecl::new(
      VBOX_MEMORY_SIZE,
      OptionType::Int,
      "Memory size (M) of the VirtualBox VM.",
    )
    .with_default(512_i64)
    .declared_by(VIRTUALBOX),
    OptionDecl::new(
      VBOX_HEADLESS,
      OptionType::Bool,
      "If set, the VirtualBox instance is started in headless mode, i.e., without a visible display on the host's desktop.",
    )
    .with_default(false)
    .declared_by(VIRTUALBOX),
    OptionDecl::new(
      VBOX_BASE_IMAGE,
      OptionType::String,
      "Path or URL of the VDI base image used to initialise the VirtualBox VM disk.",
    )
    .with_default_text("prebuilt image for nixpkgs.system")
    .declared_by(VIRTUALBOX),
  ]
}

fn adhoc() -> Vec<OptionDecl> {
  vec![
    OptionDecl::new(
      ADHOC_CONTROLLER,
      OptionType::String,
      "SSH destination (user@host) of the controller machine of the ad hoc cloud.",
    )
    .declared_by(ADHOC),
    OptionDecl::new(
      ADHOC_CREATE_VM_COMMAND,
      OptionType::String,
      "Remote command to create a VM on the controller.",
    )
    .with_default("create-vm")
    .declared_by(ADHOC),
    OptionDecl::new(
      ADHOC_DESTROY_VM_COMMAND,
      OptionType::String,
      "Remote command to destroy a VM on the controller.",
    )
    .with_default("destroy-vm")
    .declared_by(ADHOC),
    OptionDecl::new(
      ADHOC_QUERY_VM_COMMAND,
      OptionType::String,
      "Remote command to query information about a VM.",
    )
    .with_default("query-vm")
    .declared_by(ADHOC),
  ]
}

fn container() -> Vec<OptionDecl> {
  vec![
    OptionDecl::new(
      CONTAINER_HOST,
      OptionType::String,
      "SSH destination of the host that runs the container.",
    )
    .with_default("localhost")
    .declared_by(CONTAINER),
  ]
}
