use serde::Deserialize;
use std::path::PathBuf;
use super::{gateway::parse_env_var, SettingsError};

#[derive(Clone, Debug, Deserialize)]
pub struct InventorySettings {
    /// VM 인벤토리 (`vms` 배열)
    #[serde(default = "default_vm_config")]
    pub vm_config: PathBuf,

    /// LXC 컨테이너 인벤토리 (`lxc_containers` 배열)
    #[serde(default = "default_lxc_config")]
    pub lxc_config: PathBuf,

    /// 전역 설정 (도메인 이름 포함)
    #[serde(default = "default_global_config")]
    pub global_config: PathBuf,

    /// 전역 설정에서 도메인 이름을 읽을 경로 (예: `domain_name`, `network.domain`)
    #[serde(default = "default_domain_key")]
    pub domain_key: String,
}

fn default_vm_config() -> PathBuf { PathBuf::from("etc/phoenix_vm_configs.json") }
fn default_lxc_config() -> PathBuf { PathBuf::from("etc/phoenix_lxc_configs.json") }
fn default_global_config() -> PathBuf { PathBuf::from("etc/phoenix_hypervisor_config.json") }
fn default_domain_key() -> String { "domain_name".to_string() }

impl InventorySettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            vm_config: parse_env_var("GATEWAY_VM_CONFIG", default_vm_config)?,
            lxc_config: parse_env_var("GATEWAY_LXC_CONFIG", default_lxc_config)?,
            global_config: parse_env_var("GATEWAY_GLOBAL_CONFIG", default_global_config)?,
            domain_key: parse_env_var("GATEWAY_DOMAIN_KEY", default_domain_key)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        let key = self.domain_key.trim().trim_start_matches('.');
        if key.is_empty() {
            return Err(SettingsError::InvalidConfig(
                "도메인 키가 비어 있습니다".to_string()
            ));
        }
        if key.split('.').any(|segment| segment.is_empty()) {
            return Err(SettingsError::InvalidConfig(
                format!("잘못된 도메인 키 경로: {}", self.domain_key)
            ));
        }
        Ok(())
    }
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            vm_config: default_vm_config(),
            lxc_config: default_lxc_config(),
            global_config: default_global_config(),
            domain_key: default_domain_key(),
        }
    }
}
