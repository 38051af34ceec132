use std::fmt;
use url::Url;

use crate::routing_map::domain::is_config_delimiter;
use crate::routing_map::error::RoutingMapError;

/// `map` 블록의 `default` 값으로 쓰이는 업스트림 URL.
///
/// NGINX 설정에 그대로 들어가므로 입력 문자열을 정규화하지 않고 보존합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackUpstream(String);

impl FallbackUpstream {
    pub fn parse(value: &str) -> Result<Self, RoutingMapError> {
        let invalid = |reason: &str| RoutingMapError::InvalidFallback {
            upstream: value.to_string(),
            reason: reason.to_string(),
        };

        if value.chars().any(is_config_delimiter) {
            return Err(invalid("공백이나 NGINX 구분 문자를 포함할 수 없습니다"));
        }

        let url = Url::parse(value).map_err(|e| invalid(&e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid("http 또는 https 스킴이어야 합니다"));
        }
        if url.host_str().map_or(true, str::is_empty) {
            return Err(invalid("호스트가 없습니다"));
        }

        Ok(FallbackUpstream(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FallbackUpstream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
