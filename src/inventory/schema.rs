//! 인벤토리 JSON 스키마 정의
//!
//! VM/컨테이너 인벤토리 파일을 타입으로 역직렬화하기 전에 JSON Schema Draft 7로
//! 구조를 검증합니다. 최상위 배열 키만 인벤토리 종류에 따라 달라집니다.

use jsonschema::{Draft, JSONSchema};
use serde_json::{json, Map, Value};
use tracing::debug;

use super::error::InventoryError;
use super::record::InventoryKind;

/// 레코드 하나의 스키마. 라우팅과 무관한 필드는 자유롭게 허용합니다.
fn record_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "vmid": {"type": ["integer", "string"], "minimum": 0},
            "ctid": {"type": ["integer", "string"], "minimum": 0},
            "traefik_service": {
                "type": "object",
                "required": ["name", "port"],
                "properties": {
                    "name": {"type": "string", "minLength": 1},
                    "port": {"type": "integer", "minimum": 1, "maximum": 65535}
                }
            },
            "network_config": {
                "type": "object",
                "properties": {
                    "ip": {"type": "string"}
                }
            }
        }
    })
}

/// 인벤토리 종류에 맞는 전체 스키마를 생성합니다.
pub fn inventory_schema(kind: InventoryKind) -> Value {
    let mut properties = Map::new();
    properties.insert(
        kind.key().to_string(),
        json!({
            "type": "array",
            "items": record_schema()
        }),
    );

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "required": [kind.key()],
        "properties": properties
    })
}

/// 인벤토리 JSON 검증을 위한 구조체
pub struct InventoryValidator {
    schema: JSONSchema,
}

impl InventoryValidator {
    pub fn new(kind: InventoryKind) -> Result<Self, InventoryError> {
        let schema_value = inventory_schema(kind);
        let schema = JSONSchema::options()
            .with_draft(Draft::Draft7)
            .compile(&schema_value)
            .map_err(|e| InventoryError::SchemaCompileError {
                reason: format!("{} 스키마 컴파일 오류: {}", kind, e),
            })?;

        debug!(kind = %kind, "인벤토리 스키마 컴파일 성공");
        Ok(Self { schema })
    }

    /// 검증 실패 시 `경로: 메시지` 목록을 반환합니다.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<String>> {
        if let Err(errors) = self.schema.validate(value) {
            let messages = errors
                .map(|error| {
                    let path = error.instance_path.to_string();
                    let path = if path.is_empty() { "/".to_string() } else { path };
                    format!("{}: {}", path, error)
                })
                .collect::<Vec<_>>();
            return Err(messages);
        }
        Ok(())
    }
}
