use std::path::Path;
use serde_json::Value;
use tracing::debug;

use super::error::InventoryError;
use super::source::read_json_file;

/// 하이퍼바이저 전역 설정.
///
/// 실행당 한 번만 읽고, 필요한 값은 경로 접근자로 꺼냅니다.
#[derive(Debug, Clone)]
pub struct GlobalConfig {
    origin: String,
    value: Value,
}

impl GlobalConfig {
    pub fn new(origin: impl Into<String>, value: Value) -> Self {
        Self { origin: origin.into(), value }
    }

    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, InventoryError> {
        let path = path.as_ref();
        let value = read_json_file(path).await?;
        debug!(path = %path.display(), "전역 설정 로드 완료");
        Ok(Self::new(path.display().to_string(), value))
    }

    /// 점으로 구분된 경로로 값을 조회합니다 (`domain_name`, `.network.domain`, `zfs.pools.0`).
    pub fn get(&self, path: &str) -> Option<&Value> {
        let path = path.trim().trim_start_matches('.');
        if path.is_empty() {
            return Some(&self.value);
        }

        path.split('.').try_fold(&self.value, |current, segment| match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        })
    }

    /// 문자열 값을 조회합니다. 없거나 문자열이 아니면 에러입니다.
    pub fn get_str(&self, path: &str) -> Result<&str, InventoryError> {
        match self.get(path) {
            Some(Value::String(s)) => Ok(s.as_str()),
            Some(other) => Err(InventoryError::InvalidValue {
                path: self.origin.clone(),
                key: path.to_string(),
                reason: format!("문자열이 아닙니다: {}", other),
            }),
            None => Err(InventoryError::KeyMissing {
                path: self.origin.clone(),
                key: path.to_string(),
            }),
        }
    }
}
