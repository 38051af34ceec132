use std::collections::HashMap;
use tracing::{debug, info};

use crate::inventory::Inventory;
use crate::routing_map::{
    DomainName,
    FallbackUpstream,
    RoutingMapEntry,
    RoutingMapError,
};

/// `map` 지시어 첫 줄
pub const MAP_HEADER: &str = "map $host $upstream_service {";
/// `map` 블록 닫는 줄
pub const MAP_FOOTER: &str = "}";
const ENTRY_INDENT: &str = "    ";

/// 생성된 라우팅 맵. 기본 업스트림과 항목 목록을 보관합니다.
#[derive(Debug, Clone, PartialEq)]
pub struct MapBlock {
    pub fallback: FallbackUpstream,
    pub entries: Vec<RoutingMapEntry>,
}

impl MapBlock {
    /// 블록을 줄 단위로 렌더링합니다. 들여쓰기는 템플릿 쪽에서 덧붙입니다.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::with_capacity(self.entries.len() + 3);
        lines.push(MAP_HEADER.to_string());
        lines.push(format!("{}default {};", ENTRY_INDENT, self.fallback));
        for entry in &self.entries {
            lines.push(format!("{}{}", ENTRY_INDENT, entry));
        }
        lines.push(MAP_FOOTER.to_string());
        lines
    }
}

/// 인벤토리에서 `map $host $upstream_service` 블록을 만드는 순수 변환기.
///
/// 도메인 이름은 실행당 한 번 읽어 주입합니다.
#[derive(Debug, Clone)]
pub struct MapBlockBuilder {
    domain: DomainName,
    fallback: FallbackUpstream,
}

impl MapBlockBuilder {
    pub fn new(domain: DomainName, fallback: FallbackUpstream) -> Self {
        Self { domain, fallback }
    }

    /// 인벤토리 순서대로 블록을 만듭니다. 앞의 인벤토리가 먼저 나옵니다 (VM → 컨테이너).
    ///
    /// 같은 FQDN이 두 번 나오면 두 레코드를 모두 밝혀 거부합니다.
    /// 호스트 이름 비교는 NGINX와 같이 대소문자를 구분하지 않습니다.
    pub fn build(&self, inventories: &[&Inventory]) -> Result<MapBlock, RoutingMapError> {
        let mut entries: Vec<RoutingMapEntry> = Vec::new();
        let mut seen: HashMap<String, usize> = HashMap::new();

        for inventory in inventories {
            for (index, record) in inventory.routed() {
                let entry = match RoutingMapEntry::from_record(record, inventory.kind, index, &self.domain)? {
                    Some(entry) => entry,
                    None => continue,
                };

                let key = entry.fqdn.to_ascii_lowercase();
                if let Some(&existing) = seen.get(&key) {
                    return Err(RoutingMapError::DuplicateHost {
                        fqdn: entry.fqdn,
                        first: entries[existing].origin.clone(),
                        second: entry.origin,
                    });
                }

                debug!(
                    fqdn = %entry.fqdn,
                    target = %entry.target(),
                    record = %entry.origin,
                    "라우팅 항목 추가"
                );
                seen.insert(key, entries.len());
                entries.push(entry);
            }
        }

        info!(entries = entries.len(), domain = %self.domain, "라우팅 맵 생성 완료");
        Ok(MapBlock {
            fallback: self.fallback.clone(),
            entries,
        })
    }
}
