#![allow(dead_code)]

use async_trait::async_trait;
use gateway_mapgen::inventory::{
    Inventory, InventoryError, InventoryKind, InventorySource, NetworkConfig, ServiceRecord,
    TraefikService,
};
use gateway_mapgen::settings::Settings;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

// 메모리 인벤토리 소스 (로드 횟수만 기록)
pub struct StaticSource {
    pub inventory: Inventory,
    pub loads: Arc<AtomicUsize>,
}

impl StaticSource {
    pub fn new(kind: InventoryKind, records: Vec<ServiceRecord>) -> Self {
        Self {
            inventory: Inventory::new(kind, records),
            loads: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl InventorySource for StaticSource {
    fn kind(&self) -> InventoryKind {
        self.inventory.kind
    }

    fn describe(&self) -> String {
        format!("static:{}", self.inventory.kind)
    }

    async fn load(&self) -> Result<Inventory, InventoryError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.inventory.clone())
    }
}

// 라우팅 대상 레코드 생성 헬퍼
pub fn routed(name: &str, ip: &str, port: u16) -> ServiceRecord {
    ServiceRecord {
        name: Some(name.to_string()),
        traefik_service: Some(TraefikService {
            name: Some(name.to_string()),
            port: Some(port),
        }),
        network_config: Some(NetworkConfig { ip: Some(ip.to_string()) }),
        ..Default::default()
    }
}

pub const VM_INVENTORY: &str = r#"{
    "vms": [
        {
            "vmid": 8000,
            "name": "ubuntu-2404-template",
            "network_config": { "ip": "10.0.0.200/24", "gw": "10.0.0.1" }
        },
        {
            "vmid": 9001,
            "name": "app1",
            "traefik_service": { "name": "app1", "port": 8080 },
            "network_config": { "ip": "10.0.0.5/24", "gw": "10.0.0.1" }
        }
    ]
}"#;

pub const LXC_INVENTORY: &str = r#"{
    "lxc_containers": [
        {
            "ctid": 951,
            "name": "vllm-granite",
            "traefik_service": { "name": "granite", "port": 8000 },
            "network_config": { "ip": "10.0.0.151/24" }
        },
        {
            "ctid": 952,
            "name": "qdrant",
            "traefik_service": { "name": "qdrant", "port": 6333 },
            "network_config": { "ip": "10.0.0.152/24" }
        },
        {
            "ctid": 953,
            "name": "nginx-gateway",
            "network_config": { "ip": "10.0.0.153/24" }
        }
    ]
}"#;

pub const GLOBAL_CONFIG: &str = r#"{
    "domain_name": "phoenix.local",
    "network": { "gateway": "10.0.0.1" }
}"#;

pub const GATEWAY_CONFIG: &str = "\
server_names_hash_bucket_size 128;

map $host $upstream_service {
    default http://127.0.0.1:8080;
    stale.phoenix.local https://10.0.0.99:1;
}

server {
    listen 443 ssl;
    server_name *.phoenix.local;

    location / {
        proxy_pass $upstream_service;
    }
}
";

// 임시 설치 루트에 인벤토리/전역 설정/게이트웨이 설정을 만들고 Settings를 반환
pub fn install_root(root: &Path) -> Settings {
    let etc = root.join("etc");
    let sites = etc.join("nginx").join("sites-available");
    std::fs::create_dir_all(&sites).unwrap();

    std::fs::write(etc.join("phoenix_vm_configs.json"), VM_INVENTORY).unwrap();
    std::fs::write(etc.join("phoenix_lxc_configs.json"), LXC_INVENTORY).unwrap();
    std::fs::write(etc.join("phoenix_hypervisor_config.json"), GLOBAL_CONFIG).unwrap();
    std::fs::write(sites.join("gateway"), GATEWAY_CONFIG).unwrap();

    Settings {
        root: root.to_path_buf(),
        ..Settings::default()
    }
}
