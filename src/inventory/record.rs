use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::fmt;

/// 인벤토리 종류. JSON 최상위 배열 키와 레코드 식별 필드를 결정합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InventoryKind {
    Vm,
    Lxc,
}

impl InventoryKind {
    /// 최상위 배열 키
    pub fn key(&self) -> &'static str {
        match self {
            InventoryKind::Vm => "vms",
            InventoryKind::Lxc => "lxc_containers",
        }
    }

    fn id_label(&self) -> &'static str {
        match self {
            InventoryKind::Vm => "vmid",
            InventoryKind::Lxc => "ctid",
        }
    }
}

impl fmt::Display for InventoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InventoryKind::Vm => write!(f, "vm"),
            InventoryKind::Lxc => write!(f, "lxc"),
        }
    }
}

/// `vmid`/`ctid` 값. 인벤토리에 따라 숫자 또는 문자열로 기록됩니다.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl From<u64> for RecordId {
    fn from(id: u64) -> Self {
        RecordId::Number(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        RecordId::Text(id.to_string())
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{}", id),
            RecordId::Text(id) => write!(f, "{}", id),
        }
    }
}

/// 레코드 `name`은 표시용이므로 문자열이 아닌 스칼라 값도 문자열로 받습니다.
fn deserialize_label<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(value @ (Value::Number(_) | Value::Bool(_))) => Ok(Some(value.to_string())),
        Some(other) => Err(de::Error::custom(format!("name은 스칼라 값이어야 합니다: {}", other))),
    }
}

/// 게이트웨이로 노출할 서비스 선언
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraefikService {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub port: Option<u16>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// `a.b.c.d/nn` 형식
    #[serde(default)]
    pub ip: Option<String>,
}

/// VM 또는 컨테이너 한 개의 인벤토리 항목.
///
/// 알 수 없는 필드는 무시합니다. `traefik_service`가 없으면 라우팅 대상이 아닙니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vmid: Option<RecordId>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ctid: Option<RecordId>,

    #[serde(default, deserialize_with = "deserialize_label", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub traefik_service: Option<TraefikService>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_config: Option<NetworkConfig>,
}

impl ServiceRecord {
    /// 에러 메시지용 레코드 식별자 (예: `vms[0] (vmid 9001, name app1)`)
    pub fn describe(&self, kind: InventoryKind, index: usize) -> String {
        let id = match kind {
            InventoryKind::Vm => self.vmid.as_ref(),
            InventoryKind::Lxc => self.ctid.as_ref(),
        };

        let mut details = Vec::new();
        if let Some(id) = id {
            details.push(format!("{} {}", kind.id_label(), id));
        }
        if let Some(name) = &self.name {
            details.push(format!("name {}", name));
        }

        if details.is_empty() {
            format!("{}[{}]", kind.key(), index)
        } else {
            format!("{}[{}] ({})", kind.key(), index, details.join(", "))
        }
    }

    pub fn is_routed(&self) -> bool {
        self.traefik_service.is_some()
    }

    pub fn ip(&self) -> Option<&str> {
        self.network_config.as_ref().and_then(|n| n.ip.as_deref())
    }
}

/// 한 인벤토리 파일에서 읽은 레코드 목록 (파일 순서 유지)
#[derive(Debug, Clone, PartialEq)]
pub struct Inventory {
    pub kind: InventoryKind,
    pub records: Vec<ServiceRecord>,
}

impl Inventory {
    pub fn new(kind: InventoryKind, records: Vec<ServiceRecord>) -> Self {
        Self { kind, records }
    }

    pub fn empty(kind: InventoryKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// 라우팅 대상 레코드를 원래 인덱스와 함께 순서대로 반환합니다.
    pub fn routed(&self) -> impl Iterator<Item = (usize, &ServiceRecord)> {
        self.records.iter().enumerate().filter(|(_, r)| r.is_routed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_record() {
        let record = ServiceRecord {
            vmid: Some(RecordId::Number(9001)),
            name: Some("app1".to_string()),
            ..Default::default()
        };
        assert_eq!(record.describe(InventoryKind::Vm, 0), "vms[0] (vmid 9001, name app1)");
        // LXC 인벤토리는 ctid를 사용
        assert_eq!(record.describe(InventoryKind::Lxc, 2), "lxc_containers[2] (name app1)");
        assert_eq!(ServiceRecord::default().describe(InventoryKind::Lxc, 1), "lxc_containers[1]");
    }

    #[test]
    fn test_deserialize_ignores_unknown_fields() {
        let json = r#"{
            "ctid": 950,
            "name": "Nginx-Phoenix",
            "memory_mb": 2048,
            "network_config": { "name": "eth0", "ip": "10.0.0.153/24", "gw": "10.0.0.1" },
            "traefik_service": { "name": "nginx", "port": 443 }
        }"#;
        let record: ServiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.ctid, Some(RecordId::Number(950)));
        assert_eq!(record.ip(), Some("10.0.0.153/24"));
        assert_eq!(record.traefik_service.unwrap().port, Some(443));
    }

    #[test]
    fn test_deserialize_loose_identity_fields() {
        let json = r#"{
            "vmid": "vm-9001",
            "name": 42,
            "traefik_service": { "name": "app1", "port": 8080 }
        }"#;
        let record: ServiceRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.vmid, Some(RecordId::from("vm-9001")));
        assert_eq!(record.describe(InventoryKind::Vm, 0), "vms[0] (vmid vm-9001, name 42)");

        let record: ServiceRecord = serde_json::from_str(r#"{"ctid": 951, "name": null}"#).unwrap();
        assert_eq!(record.describe(InventoryKind::Lxc, 3), "lxc_containers[3] (ctid 951)");

        assert!(serde_json::from_str::<ServiceRecord>(r#"{"name": ["a"]}"#).is_err());
    }

    #[test]
    fn test_routed_keeps_order_and_index() {
        let routed = ServiceRecord {
            traefik_service: Some(TraefikService::default()),
            ..Default::default()
        };
        let inventory = Inventory::new(
            InventoryKind::Vm,
            vec![ServiceRecord::default(), routed.clone(), ServiceRecord::default(), routed],
        );
        let indices: Vec<usize> = inventory.routed().map(|(i, _)| i).collect();
        assert_eq!(indices, vec![1, 3]);
    }
}
