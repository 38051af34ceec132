use serde::{de, Deserialize, Deserializer};
use std::convert::Infallible;
use std::str::FromStr;
use tracing::Level;
use super::{gateway::parse_env_var, SettingsError};

/// 환경 변수와 TOML 모두 `FromStr`을 거쳐 같은 규칙으로 해석됩니다.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            _ => Err(format!("Invalid log format: {}", s)),
        }
    }
}

impl TryFrom<String> for LogFormat {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `stdout`(대소문자 무시) 외의 값은 모두 로그 파일 경로입니다.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "String")]
pub enum LogOutput {
    #[default]
    Stdout,
    File(String),
}

impl From<String> for LogOutput {
    fn from(value: String) -> Self {
        if value.eq_ignore_ascii_case("stdout") {
            LogOutput::Stdout
        } else {
            LogOutput::File(value)
        }
    }
}

impl FromStr for LogOutput {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(LogOutput::from(s.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    #[serde(default)]
    pub format: LogFormat,
    // 파일 설정의 레벨 오류는 조용히 넘기지 않음
    #[serde(default = "default_log_level", deserialize_with = "deserialize_log_level")]
    pub level: Level,
    #[serde(default)]
    pub output: LogOutput,
}

impl LogSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Ok(Self {
            format: parse_env_var("GATEWAY_LOG_FORMAT", LogFormat::default)?,
            level: parse_env_var("GATEWAY_LOG_LEVEL", default_log_level)?,
            output: parse_env_var("GATEWAY_LOG_OUTPUT", LogOutput::default)?,
        })
    }
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
            output: LogOutput::default(),
        }
    }
}

fn default_log_level() -> Level {
    Level::INFO
}

fn deserialize_log_level<'de, D>(deserializer: D) -> Result<Level, D::Error>
where
    D: Deserializer<'de>,
{
    let level = String::deserialize(deserializer)?;
    level.parse().map_err(|e| de::Error::custom(format!("{}: {}", level, e)))
}
