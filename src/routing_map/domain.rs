use std::fmt;
use std::sync::OnceLock;
use regex_lite as regex;

use crate::routing_map::error::RoutingMapError;

const MAX_NAME_LEN: usize = 253;

fn label_pattern() -> &'static regex::Regex {
    static LABEL: OnceLock<regex::Regex> = OnceLock::new();
    LABEL.get_or_init(|| {
        regex::Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]{0,61}[A-Za-z0-9])?$")
            .expect("label pattern is valid")
    })
}

/// 점으로 구분된 DNS 이름을 검증합니다. 실패 시 사유를 반환합니다.
pub fn check_dns_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("이름이 비어 있습니다".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("이름이 {}자를 넘습니다", MAX_NAME_LEN));
    }
    for label in name.split('.') {
        if !label_pattern().is_match(label) {
            return Err(format!("잘못된 레이블 {:?}", label));
        }
    }
    Ok(())
}

/// NGINX 설정에서 토큰을 끊거나 따옴표, 주석, 이스케이프로 해석되는 문자
pub(crate) fn is_config_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, ';' | '{' | '}' | '"' | '\'' | '#' | '\\')
}

/// `map` 키의 앞부분이 될 서비스 이름을 검증합니다.
///
/// `n8n_app`처럼 DNS 레이블 규칙을 벗어나는 이름도 NGINX 호스트 키로는 쓸 수 있으므로
/// 설정 문법을 깨는 문자만 거부합니다. `~`로 시작하면 정규식 키가 되므로 거부합니다.
pub fn check_service_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("이름이 비어 있습니다".to_string());
    }
    if let Some(c) = name.chars().find(|c| is_config_delimiter(*c)) {
        return Err(format!("공백이나 NGINX 구분 문자 {:?}를 포함할 수 없습니다", c));
    }
    if name.starts_with('~') {
        return Err("'~'로 시작할 수 없습니다".to_string());
    }
    Ok(())
}

/// 검증된 도메인 접미사 (예: `phoenix.local`).
///
/// 한 번 생성되면 실행 내내 바뀌지 않으며, 빌더에 명시적으로 주입됩니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainName(String);

impl DomainName {
    pub fn parse(value: &str) -> Result<Self, RoutingMapError> {
        let trimmed = value.trim();
        check_dns_name(trimmed).map_err(|reason| RoutingMapError::InvalidDomain {
            domain: value.to_string(),
            reason,
        })?;
        Ok(DomainName(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 서비스 이름과 결합해 FQDN을 만듭니다.
    pub fn qualify(&self, service_name: &str) -> String {
        format!("{}.{}", service_name, self.0)
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_domains() {
        for domain in ["phoenix.local", "internal", "a-b.example.com", "  lab.home  "] {
            assert!(DomainName::parse(domain).is_ok(), "{} should be valid", domain);
        }
        assert_eq!(DomainName::parse(" lab.home ").unwrap().as_str(), "lab.home");
    }

    #[test]
    fn test_invalid_domains() {
        for domain in ["", ".local", "phoenix..local", "-bad.local", "bad-.local", "under_score.local", "phoenix.local."] {
            assert!(
                matches!(DomainName::parse(domain), Err(RoutingMapError::InvalidDomain { .. })),
                "{:?} should be rejected",
                domain
            );
        }
    }

    #[test]
    fn test_qualify() {
        let domain = DomainName::parse("phoenix.local").unwrap();
        assert_eq!(domain.qualify("app1"), "app1.phoenix.local");
    }

    #[test]
    fn test_service_names() {
        for name in ["app1", "n8n_app", "Open-WebUI", "svc.internal"] {
            assert!(check_service_name(name).is_ok(), "{} should be valid", name);
        }
        for name in ["", "app 1", "app;", "a{b", "a}b", "\"app\"", "'app'", "#app", "a\\b", "~^app"] {
            assert!(check_service_name(name).is_err(), "{:?} should be rejected", name);
        }
    }

    #[test]
    fn test_label_length_limit() {
        let long_label = "a".repeat(64);
        assert!(check_dns_name(&long_label).is_err());
        assert!(check_dns_name(&"a".repeat(63)).is_ok());
    }
}
