//! 인벤토리에서 NGINX `map $host $upstream_service` 블록을 생성하는 모듈입니다.

mod builder;
mod domain;
mod entry;
mod error;
mod upstream;

pub use builder::{MapBlock, MapBlockBuilder, MAP_FOOTER, MAP_HEADER};
pub use domain::{check_dns_name, check_service_name, DomainName};
pub use entry::{parse_cidr_address, RoutingMapEntry};
pub use error::RoutingMapError;
pub use upstream::FallbackUpstream;
