//! VM/컨테이너 인벤토리와 전역 설정을 읽어들이는 모듈입니다.

mod error;
mod global;
mod record;
mod schema;
mod source;

pub use error::InventoryError;
pub use global::GlobalConfig;
pub use record::{Inventory, InventoryKind, NetworkConfig, RecordId, ServiceRecord, TraefikService};
pub use schema::{inventory_schema, InventoryValidator};
pub use source::{inventory_from_value, InventorySource, JsonFileSource};
