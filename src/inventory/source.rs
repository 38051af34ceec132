use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info};

use super::error::InventoryError;
use super::record::{Inventory, InventoryKind, ServiceRecord};
use super::schema::InventoryValidator;

/// 인벤토리를 제공하는 소스.
///
/// 매 실행마다 새로 읽으며, 소스 데이터를 수정하지 않습니다.
#[async_trait]
pub trait InventorySource: Send + Sync {
    fn kind(&self) -> InventoryKind;

    /// 로그와 에러 메시지에 쓰이는 소스 이름
    fn describe(&self) -> String;

    async fn load(&self) -> Result<Inventory, InventoryError>;
}

/// JSON 파일에서 읽는 인벤토리 소스
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
    kind: InventoryKind,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>, kind: InventoryKind) -> Self {
        Self { path: path.into(), kind }
    }
}

/// 파일을 읽어 JSON 값으로 반환합니다. 파일이 없으면 `FileMissing`.
pub(crate) async fn read_json_file(path: &Path) -> Result<Value, InventoryError> {
    let display = path.to_string_lossy().to_string();
    let content = tokio::fs::read_to_string(path).await.map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            InventoryError::FileMissing { path: display.clone() }
        } else {
            InventoryError::FileError { path: display.clone(), error: e }
        }
    })?;

    serde_json::from_str(&content).map_err(|e| InventoryError::JsonParseError {
        path: display,
        source: e,
    })
}

/// 이미 파싱된 JSON 문서에서 인벤토리를 추출합니다.
pub fn inventory_from_value(
    kind: InventoryKind,
    value: &Value,
    origin: &str,
) -> Result<Inventory, InventoryError> {
    let validator = InventoryValidator::new(kind)?;
    validator.validate(value).map_err(|errors| InventoryError::SchemaViolations {
        path: origin.to_string(),
        errors,
    })?;

    let entries = value.get(kind.key()).ok_or_else(|| InventoryError::KeyMissing {
        path: origin.to_string(),
        key: kind.key().to_string(),
    })?;

    let records: Vec<ServiceRecord> = serde_json::from_value(entries.clone())
        .map_err(|e| InventoryError::InvalidValue {
            path: origin.to_string(),
            key: kind.key().to_string(),
            reason: e.to_string(),
        })?;

    Ok(Inventory::new(kind, records))
}

#[async_trait]
impl InventorySource for JsonFileSource {
    fn kind(&self) -> InventoryKind {
        self.kind
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn load(&self) -> Result<Inventory, InventoryError> {
        debug!(path = %self.path.display(), kind = %self.kind, "인벤토리 파일 로드");

        let value = read_json_file(&self.path).await?;
        let inventory = inventory_from_value(self.kind, &value, &self.describe())?;

        info!(
            path = %self.path.display(),
            kind = %self.kind,
            records = inventory.records.len(),
            routed = inventory.routed().count(),
            "인벤토리 로드 완료"
        );
        Ok(inventory)
    }
}
