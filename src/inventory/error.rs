use std::fmt;

#[derive(Debug)]
pub enum InventoryError {
    /// 필요한 파일이 존재하지 않음
    FileMissing {
        path: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    JsonParseError {
        path: String,
        source: serde_json::Error,
    },
    SchemaCompileError {
        reason: String,
    },
    /// 스키마 위반 (경로: 메시지 형식으로 모아서 보고)
    SchemaViolations {
        path: String,
        errors: Vec<String>,
    },
    KeyMissing {
        path: String,
        key: String,
    },
    InvalidValue {
        path: String,
        key: String,
        reason: String,
    },
}

impl fmt::Display for InventoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileMissing { path } =>
                write!(f, "필수 파일이 없습니다: {}", path),
            Self::FileError { path, error } =>
                write!(f, "파일 {} 읽기 오류: {}", path, error),
            Self::JsonParseError { path, source } =>
                write!(f, "JSON 파싱 오류 ({}): {}", path, source),
            Self::SchemaCompileError { reason } =>
                write!(f, "스키마 컴파일 오류: {}", reason),
            Self::SchemaViolations { path, errors } =>
                write!(f, "스키마 검증 실패 ({}): {}", path, errors.join("; ")),
            Self::KeyMissing { path, key } =>
                write!(f, "{}에 키 {}가 없습니다", path, key),
            Self::InvalidValue { path, key, reason } =>
                write!(f, "{}의 {} 값 오류: {}", path, key, reason),
        }
    }
}

impl std::error::Error for InventoryError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileError { error, .. } => Some(error),
            Self::JsonParseError { source, .. } => Some(source),
            _ => None,
        }
    }
}
