use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::inventory::{InventoryKind, ServiceRecord};
use crate::routing_map::domain::{check_service_name, DomainName};
use crate::routing_map::error::RoutingMapError;

/// `map` 블록의 한 줄: 호스트 이름 → HTTPS 업스트림.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingMapEntry {
    pub fqdn: String,
    pub upstream: SocketAddr,
    /// 이 항목을 만든 레코드 (중복 보고용)
    pub origin: String,
}

impl RoutingMapEntry {
    /// 레코드에서 항목을 만듭니다. `traefik_service`가 없으면 `None`.
    pub fn from_record(
        record: &ServiceRecord,
        kind: InventoryKind,
        index: usize,
        domain: &DomainName,
    ) -> Result<Option<Self>, RoutingMapError> {
        let service = match &record.traefik_service {
            Some(service) => service,
            None => return Ok(None),
        };

        let origin = record.describe(kind, index);
        let invalid = |reason: String| RoutingMapError::InvalidRecord {
            record: origin.clone(),
            reason,
        };

        let name = service.name.as_deref().map(str::trim).unwrap_or("");
        check_service_name(name)
            .map_err(|reason| invalid(format!("traefik_service.name: {}", reason)))?;

        let port = match service.port {
            Some(port) if port > 0 => port,
            Some(_) => return Err(invalid("traefik_service.port는 0일 수 없습니다".to_string())),
            None => return Err(invalid("traefik_service.port가 없습니다".to_string())),
        };

        let ip = match record.ip() {
            Some(ip) => parse_cidr_address(ip).map_err(|reason| invalid(format!("network_config.ip: {}", reason)))?,
            None => return Err(invalid("network_config.ip가 없습니다".to_string())),
        };

        Ok(Some(Self {
            fqdn: domain.qualify(name),
            upstream: SocketAddr::new(ip, port),
            origin,
        }))
    }

    /// `https://{ip}:{port}` (IPv6는 대괄호 포함)
    pub fn target(&self) -> String {
        format!("https://{}", self.upstream)
    }
}

impl fmt::Display for RoutingMapEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {};", self.fqdn, self.target())
    }
}

/// `a.b.c.d/nn`에서 주소 부분만 추출합니다. 접두사가 있으면 범위를 확인합니다.
pub fn parse_cidr_address(value: &str) -> Result<IpAddr, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err("주소가 비어 있습니다".to_string());
    }

    let (addr, prefix) = match value.split_once('/') {
        Some((addr, prefix)) => (addr, Some(prefix)),
        None => (value, None),
    };

    let ip: IpAddr = addr
        .parse()
        .map_err(|_| format!("잘못된 IP 주소 {:?}", value))?;

    if let Some(prefix) = prefix {
        let max = if ip.is_ipv4() { 32 } else { 128 };
        match prefix.parse::<u8>() {
            Ok(bits) if bits <= max => {}
            _ => return Err(format!("잘못된 접두사 길이 {:?}", value)),
        }
    }

    Ok(ip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inventory::{NetworkConfig, RecordId, TraefikService};

    fn record(name: Option<&str>, port: Option<u16>, ip: Option<&str>) -> ServiceRecord {
        ServiceRecord {
            vmid: Some(RecordId::Number(9001)),
            name: Some("app1".to_string()),
            traefik_service: Some(TraefikService {
                name: name.map(str::to_string),
                port,
            }),
            network_config: Some(NetworkConfig { ip: ip.map(str::to_string) }),
            ..Default::default()
        }
    }

    fn domain() -> DomainName {
        DomainName::parse("phoenix.local").unwrap()
    }

    #[test]
    fn test_entry_line() {
        let entry = RoutingMapEntry::from_record(
            &record(Some("app1"), Some(8080), Some("10.0.0.5/24")),
            InventoryKind::Vm,
            0,
            &domain(),
        ).unwrap().unwrap();

        assert_eq!(entry.fqdn, "app1.phoenix.local");
        assert_eq!(entry.target(), "https://10.0.0.5:8080");
        assert_eq!(entry.to_string(), "app1.phoenix.local https://10.0.0.5:8080;");
    }

    #[test]
    fn test_non_dns_service_name_is_accepted() {
        let entry = RoutingMapEntry::from_record(
            &record(Some("n8n_app"), Some(5678), Some("10.0.0.160/24")),
            InventoryKind::Lxc,
            0,
            &domain(),
        ).unwrap().unwrap();
        assert_eq!(entry.to_string(), "n8n_app.phoenix.local https://10.0.0.160:5678;");
    }

    #[test]
    fn test_ipv6_target_is_bracketed() {
        let entry = RoutingMapEntry::from_record(
            &record(Some("vllm"), Some(8000), Some("fd00::10/64")),
            InventoryKind::Lxc,
            0,
            &domain(),
        ).unwrap().unwrap();
        assert_eq!(entry.target(), "https://[fd00::10]:8000");
    }

    #[test]
    fn test_unrouted_record_is_skipped() {
        let record = ServiceRecord { vmid: Some(RecordId::Number(1)), ..Default::default() };
        assert_eq!(RoutingMapEntry::from_record(&record, InventoryKind::Vm, 0, &domain()), Ok(None));
    }

    #[test]
    fn test_invalid_records_name_the_record() {
        let cases = vec![
            record(Some("app1"), Some(8080), None),
            record(Some("app1"), None, Some("10.0.0.5/24")),
            record(Some("app1"), Some(0), Some("10.0.0.5/24")),
            record(None, Some(8080), Some("10.0.0.5/24")),
            record(Some("app 1"), Some(8080), Some("10.0.0.5/24")),
            record(Some("app;"), Some(8080), Some("10.0.0.5/24")),
            record(Some("app1"), Some(8080), Some("10.0.0/24")),
        ];

        for case in cases {
            match RoutingMapEntry::from_record(&case, InventoryKind::Vm, 3, &domain()) {
                Err(RoutingMapError::InvalidRecord { record, .. }) => {
                    assert_eq!(record, "vms[3] (vmid 9001, name app1)");
                }
                other => panic!("Expected InvalidRecord error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_parse_cidr_address() {
        assert_eq!(parse_cidr_address("10.0.0.5/24").unwrap().to_string(), "10.0.0.5");
        assert_eq!(parse_cidr_address("10.0.0.5").unwrap().to_string(), "10.0.0.5");
        assert!(parse_cidr_address("10.0.0.5/33").is_err());
        assert!(parse_cidr_address("10.0.0.5/").is_err());
        assert!(parse_cidr_address("").is_err());
        assert!(parse_cidr_address("dhcp").is_err());
    }
}
