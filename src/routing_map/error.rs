use std::fmt;

/// 라우팅 맵 생성 중 발생하는 에러를 표현하는 열거형입니다.
#[derive(Debug, PartialEq)]
pub enum RoutingMapError {
    /// 필수 필드가 없거나 잘못된 인벤토리 레코드
    InvalidRecord {
        record: String,
        reason: String,
    },
    /// 유효하지 않은 도메인 이름
    InvalidDomain {
        domain: String,
        reason: String,
    },
    /// 유효하지 않은 기본 업스트림
    InvalidFallback {
        upstream: String,
        reason: String,
    },
    /// 두 레코드가 같은 호스트 이름으로 해석됨
    DuplicateHost {
        fqdn: String,
        first: String,
        second: String,
    },
}

impl fmt::Display for RoutingMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoutingMapError::InvalidRecord { record, reason } =>
                write!(f, "잘못된 인벤토리 레코드 {}: {}", record, reason),
            RoutingMapError::InvalidDomain { domain, reason } =>
                write!(f, "유효하지 않은 도메인 {:?}: {}", domain, reason),
            RoutingMapError::InvalidFallback { upstream, reason } =>
                write!(f, "유효하지 않은 기본 업스트림 {:?}: {}", upstream, reason),
            RoutingMapError::DuplicateHost { fqdn, first, second } =>
                write!(f, "호스트 {}가 중복됨: {}와 {}", fqdn, first, second),
        }
    }
}

impl std::error::Error for RoutingMapError {}
