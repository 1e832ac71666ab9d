//! Typed per-profile view of a resolved configuration.
//!
//! Drivers read [`Deployment`] first: the variant says which environment
//! applies, and its payload holds only the options that environment uses.
//! A profile's options can't be read through another profile's variant.

use std::collections::BTreeMap;

use serde::Serialize;

use super::TargetEnv;
use crate::error::Result;
use crate::options::paths::*;
use crate::resolve::ResolvedConfig;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "targetEnv", rename_all = "kebab-case")]
pub enum Deployment {
  None,
  Ec2(Ec2Target),
  #[serde(rename = "virtualbox")]
  VirtualBox(VirtualBoxTarget),
  AdhocCloud(AdhocTarget),
  Container(ContainerTarget),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ec2Target {
  pub region: String,
  pub controller: String,
  pub access_key_id: String,
  pub key_pair: String,
  pub private_key: String,
  pub instance_type: String,
  /// `None` when no AMI is known for the region and system.
  pub ami: Option<String>,
  pub security_groups: Vec<String>,
  pub tags: BTreeMap<String, String>,
  pub elastic_ipv4: String,
  pub block_device_mapping: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualBoxTarget {
  pub memory_size: i64,
  pub headless: bool,
  /// `None` when no prebuilt image exists for the machine's system.
  pub base_image: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdhocTarget {
  pub controller: String,
  pub create_vm_command: String,
  pub destroy_vm_command: String,
  pub query_vm_command: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerTarget {
  pub host: String,
}

impl Deployment {
  /// Extract the payload for the profile `config` was resolved under.
  pub fn from_resolved(config: &ResolvedConfig) -> Result<Self> {
    Ok(match config.profile() {
      TargetEnv::None => Deployment::None,
      TargetEnv::Ec2 => Deployment::Ec2(Ec2Target {
        region: config.get_str(EC2_REGION)?.to_string(),
        controller: config.get_str(EC2_CONTROLLER)?.to_string(),
        access_key_id: config.get_str(EC2_ACCESS_KEY_ID)?.to_string(),
        key_pair: config.get_str(EC2_KEY_PAIR)?.to_string(),
        private_key: config.get_str(EC2_PRIVATE_KEY)?.to_string(),
        instance_type: config.get_str(EC2_INSTANCE_TYPE)?.to_string(),
        ami: config.get_known_str(EC2_AMI)?.map(str::to_string),
        security_groups: config.get_list(EC2_SECURITY_GROUPS)?.to_vec(),
        tags: config.get_map(EC2_TAGS)?.clone(),
        elastic_ipv4: config.get_str(EC2_ELASTIC_IPV4)?.to_string(),
        block_device_mapping: config.get_map(EC2_BLOCK_DEVICE_MAPPING)?.clone(),
      }),
      TargetEnv::VirtualBox => Deployment::VirtualBox(VirtualBoxTarget {
        memory_size: config.get_int(VBOX_MEMORY_SIZE)?,
        headless: config.get_bool(VBOX_HEADLESS)?,
        base_image: config.get_known_str(VBOX_BASE_IMAGE)?.map(str::to_string),
      }),
      TargetEnv::AdhocCloud => Deployment::AdhocCloud(AdhocTarget {
        controller: config.get_str(ADHOC_CONTROLLER)?.to_string(),
        create_vm_command: config.get_str(ADHOC_CREATE_VM_COMMAND)?.to_string(),
        destroy_vm_command: config.get_str(ADHOC_DESTROY_VM_COMMAND)?.to_string(),
        query_vm_command: config.get_str(ADHOC_QUERY_VM_COMMAND)?.to_string(),
      }),
      TargetEnv::Container => Deployment::Container(ContainerTarget {
        host: config.get_str(CONTAINER_HOST)?.to_string(),
      }),
    })
  }

  pub fn target_env(&self) -> TargetEnv {
    match self {
      Deployment::None => TargetEnv::None,
      Deployment::Ec2(_) => TargetEnv::Ec2,
      Deployment::VirtualBox(_) => TargetEnv::VirtualBox,
      Deployment::AdhocCloud(_) => TargetEnv::AdhocCloud,
      Deployment::Container(_) => TargetEnv::Container,
    }
  }
}
