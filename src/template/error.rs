use std::fmt;

/// 템플릿 생성/렌더링 에러
#[derive(Debug)]
pub enum TemplateError {
    /// 템플릿도, 템플릿을 만들 출력 파일도 없음
    MissingFile {
        template: String,
        output: String,
    },
    FileError {
        path: String,
        error: std::io::Error,
    },
    /// 기존 설정에 `map $host $upstream_service` 블록이 없음
    MapBlockNotFound {
        path: String,
    },
    /// 블록의 중괄호가 닫히지 않음 (여는 줄 번호, 1부터)
    UnbalancedBlock {
        path: String,
        line: usize,
    },
    PlaceholderMissing {
        path: String,
    },
    PlaceholderDuplicated {
        path: String,
        lines: Vec<usize>,
    },
}

impl fmt::Display for TemplateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingFile { template, output } =>
                write!(f, "템플릿 {}이 없고 템플릿을 만들 설정 파일 {}도 없습니다", template, output),
            Self::FileError { path, error } =>
                write!(f, "파일 {} 오류: {}", path, error),
            Self::MapBlockNotFound { path } =>
                write!(f, "{}에서 map $host $upstream_service 블록을 찾을 수 없습니다", path),
            Self::UnbalancedBlock { path, line } =>
                write!(f, "{}:{}에서 시작한 map 블록이 닫히지 않았습니다", path, line),
            Self::PlaceholderMissing { path } =>
                write!(f, "템플릿 {}에 플레이스홀더가 없습니다", path),
            Self::PlaceholderDuplicated { path, lines } =>
                write!(f, "템플릿 {}에 플레이스홀더가 여러 번 있습니다 (줄: {:?})", path, lines),
        }
    }
}

impl std::error::Error for TemplateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::FileError { error, .. } => Some(error),
            _ => None,
        }
    }
}
