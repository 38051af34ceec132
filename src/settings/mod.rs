use std::{env, path::{Path, PathBuf}};
use serde::Deserialize;
use tracing::debug;

mod gateway;
mod inventory;
pub mod logging;
mod error;

pub use gateway::{GatewaySettings, parse_env_var};
pub use inventory::InventorySettings;
pub use logging::LogSettings;
pub use error::SettingsError;

pub type Result<T> = std::result::Result<T, SettingsError>;

/// 하이퍼바이저 설치 루트. 상대 경로는 모두 이 디렉토리 기준으로 해석합니다.
pub const DEFAULT_ROOT: &str = "/usr/local/phoenix_hypervisor";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    // 설치 루트
    #[serde(default = "default_root")]
    pub root: PathBuf,

    // 인벤토리 설정
    #[serde(default)]
    pub inventory: InventorySettings,

    // 템플릿/출력 설정
    #[serde(default)]
    pub gateway: GatewaySettings,

    // 로깅 설정
    #[serde(default)]
    pub logging: LogSettings,
}

fn default_root() -> PathBuf {
    PathBuf::from(DEFAULT_ROOT)
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            root: default_root(),
            inventory: InventorySettings::default(),
            gateway: GatewaySettings::default(),
            logging: LogSettings::default(),
        }
    }
}

impl Settings {
    pub async fn load() -> Result<Self> {
        if let Ok(config_path) = env::var("GATEWAY_CONFIG_FILE") {
            Self::from_toml_file(&config_path).await
        } else {
            Self::from_env().await
        }
    }

    pub async fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| SettingsError::FileError {
            path: path.as_ref().to_string_lossy().to_string(),
            error: e,
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| SettingsError::ParseError { source: e })?;

        settings.validate()?;
        debug!(path = %path.as_ref().display(), "TOML 설정 파일 로드 완료");
        Ok(settings)
    }

    pub async fn from_env() -> Result<Self> {
        let settings = Self {
            root: parse_env_var("GATEWAY_ROOT", default_root)?,
            inventory: InventorySettings::from_env()?,
            gateway: GatewaySettings::from_env()?,
            logging: LogSettings::from_env()?,
        };

        // 설정 생성 시점에 바로 검증
        settings.validate()?;
        Ok(settings)
    }

    /// 설정 유효성 검증
    pub fn validate(&self) -> Result<()> {
        self.inventory.validate()?;
        self.gateway.validate()?;

        if self.template_path() == self.output_path() {
            return Err(SettingsError::InvalidConfig(format!(
                "템플릿과 출력 파일이 같은 경로입니다: {}",
                self.output_path().display()
            )));
        }

        Ok(())
    }

    /// 상대 경로를 설치 루트 기준으로 해석합니다.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn vm_config_path(&self) -> PathBuf {
        self.resolve(&self.inventory.vm_config)
    }

    pub fn lxc_config_path(&self) -> PathBuf {
        self.resolve(&self.inventory.lxc_config)
    }

    pub fn global_config_path(&self) -> PathBuf {
        self.resolve(&self.inventory.global_config)
    }

    pub fn template_path(&self) -> PathBuf {
        self.resolve(&self.gateway.template)
    }

    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.gateway.output)
    }
}
