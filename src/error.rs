use std::fmt;

use crate::inventory::InventoryError;
use crate::routing_map::RoutingMapError;
use crate::settings::SettingsError;
use crate::template::TemplateError;

/// 게이트웨이 설정 생성 한 번의 실행에서 발생하는 모든 에러.
///
/// 재시도는 없으며 어떤 에러든 해당 실행을 종료시킵니다.
#[derive(Debug)]
pub enum GeneratorError {
    Settings(SettingsError),
    Inventory(InventoryError),
    RoutingMap(RoutingMapError),
    Template(TemplateError),
    Output {
        path: String,
        error: std::io::Error,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(e) => write!(f, "설정 오류: {}", e),
            Self::Inventory(e) => write!(f, "인벤토리 오류: {}", e),
            Self::RoutingMap(e) => write!(f, "라우팅 맵 오류: {}", e),
            Self::Template(e) => write!(f, "템플릿 오류: {}", e),
            Self::Output { path, error } => write!(f, "출력 파일 {} 쓰기 실패: {}", path, error),
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Settings(e) => Some(e),
            Self::Inventory(e) => Some(e),
            Self::RoutingMap(e) => Some(e),
            Self::Template(e) => Some(e),
            Self::Output { error, .. } => Some(error),
        }
    }
}

impl From<SettingsError> for GeneratorError {
    fn from(e: SettingsError) -> Self {
        Self::Settings(e)
    }
}

impl From<InventoryError> for GeneratorError {
    fn from(e: InventoryError) -> Self {
        Self::Inventory(e)
    }
}

impl From<RoutingMapError> for GeneratorError {
    fn from(e: RoutingMapError) -> Self {
        Self::RoutingMap(e)
    }
}

impl From<TemplateError> for GeneratorError {
    fn from(e: TemplateError) -> Self {
        Self::Template(e)
    }
}
