use serde::Deserialize;
use std::{env, path::PathBuf};
use super::SettingsError;
use crate::routing_map::FallbackUpstream;

#[derive(Clone, Debug, Deserialize)]
pub struct GatewaySettings {
    /// 맵 블록 자리에 마커가 들어간 템플릿 경로
    #[serde(default = "default_template")]
    pub template: PathBuf,

    /// 렌더링된 NGINX 게이트웨이 설정 경로
    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// 매칭되지 않는 호스트가 향하는 기본 업스트림
    #[serde(default = "default_fallback_upstream")]
    pub fallback_upstream: String,
}

fn default_template() -> PathBuf { PathBuf::from("etc/nginx/sites-available/gateway.template") }
fn default_output() -> PathBuf { PathBuf::from("etc/nginx/sites-available/gateway") }
fn default_fallback_upstream() -> String { "http://127.0.0.1:8080".to_string() }

pub fn parse_env_var<T: std::str::FromStr, F: FnOnce() -> T>(name: &str, default: F) -> Result<T, SettingsError>
where
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(val) => val.parse().map_err(|e: T::Err| SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: val,
            reason: e.to_string(),
        }),
        Err(env::VarError::NotPresent) => Ok(default()),
        Err(e) => Err(SettingsError::EnvVarInvalid {
            var_name: name.to_string(),
            value: "".to_string(),
            reason: e.to_string(),
        }),
    }
}

impl GatewaySettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        let settings = Self {
            template: parse_env_var("GATEWAY_TEMPLATE", default_template)?,
            output: parse_env_var("GATEWAY_OUTPUT", default_output)?,
            fallback_upstream: parse_env_var("GATEWAY_FALLBACK_UPSTREAM", default_fallback_upstream)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if self.template.as_os_str().is_empty() {
            return Err(SettingsError::InvalidConfig("템플릿 경로가 비어 있습니다".to_string()));
        }
        if self.output.as_os_str().is_empty() {
            return Err(SettingsError::InvalidConfig("출력 경로가 비어 있습니다".to_string()));
        }

        self.fallback()?;
        Ok(())
    }

    /// 검증된 기본 업스트림을 반환합니다.
    pub fn fallback(&self) -> Result<FallbackUpstream, SettingsError> {
        FallbackUpstream::parse(&self.fallback_upstream)
            .map_err(|e| SettingsError::InvalidConfig(e.to_string()))
    }
}

impl Default for GatewaySettings {
    fn default() -> Self {
        Self {
            template: default_template(),
            output: default_output(),
            fallback_upstream: default_fallback_upstream(),
        }
    }
}
