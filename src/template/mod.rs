//! NGINX 게이트웨이 설정 템플릿의 생성과 렌더링을 담당하는 모듈입니다.

mod document;
mod error;
mod materializer;

use std::path::Path;

pub use document::{excise_map_block, TemplateDocument};
pub use error::TemplateError;
pub use materializer::{Materialized, TemplateMaterializer};

/// 템플릿에서 `map` 블록 자리를 표시하는 마커
pub const PLACEHOLDER: &str = "##MAP_BLOCK##";

/// 템플릿 파일을 읽어 파싱합니다.
pub async fn load_template(path: &Path) -> Result<TemplateDocument, TemplateError> {
    let text = tokio::fs::read_to_string(path).await.map_err(|e| TemplateError::FileError {
        path: path.display().to_string(),
        error: e,
    })?;

    TemplateDocument::parse(&text, path)
}
