//! NGINX 게이트웨이의 `map $host $upstream_service` 블록을 하이퍼바이저 인벤토리에서 생성합니다.
//!
//! # 동작 순서
//!
//! 1. 템플릿이 없으면 현재 게이트웨이 설정의 첫 `map` 블록을 `##MAP_BLOCK##` 마커로 바꿔 템플릿을 만듭니다.
//! 2. VM 인벤토리(`vms`)와 컨테이너 인벤토리(`lxc_containers`)에서 `traefik_service`가 있는 항목을 골라
//!    `{name}.{domain_name} https://{ip}:{port};` 줄을 만듭니다. VM이 먼저 나옵니다.
//! 3. 템플릿의 마커 줄을 생성한 블록으로 바꿔 설정 파일을 원자적으로 교체합니다.
//!
//! # 예제
//!
//! ```
//! use gateway_mapgen::inventory::{Inventory, InventoryKind, NetworkConfig, ServiceRecord, TraefikService};
//! use gateway_mapgen::routing_map::{DomainName, FallbackUpstream, MapBlockBuilder};
//!
//! let vms = Inventory::new(InventoryKind::Vm, vec![ServiceRecord {
//!     name: Some("app1".to_string()),
//!     traefik_service: Some(TraefikService { name: Some("app1".to_string()), port: Some(8080) }),
//!     network_config: Some(NetworkConfig { ip: Some("10.0.0.5/24".to_string()) }),
//!     ..Default::default()
//! }]);
//! let lxcs = Inventory::empty(InventoryKind::Lxc);
//!
//! let builder = MapBlockBuilder::new(
//!     DomainName::parse("phoenix.local").unwrap(),
//!     FallbackUpstream::parse("http://127.0.0.1:8080").unwrap(),
//! );
//! let block = builder.build(&[&vms, &lxcs]).unwrap();
//! assert_eq!(block.entries[0].to_string(), "app1.phoenix.local https://10.0.0.5:8080;");
//! ```

pub mod error;
pub mod generator;
pub mod inventory;
pub mod logging;
pub mod output;
pub mod routing_map;
pub mod settings;
pub mod template;

pub use error::GeneratorError;
pub use generator::{GenerationReport, Generator};
