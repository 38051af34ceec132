use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::output::write_atomic;
use super::document::excise_map_block;
use super::error::TemplateError;

/// 템플릿 생성 결과
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Materialized {
    /// 이미 템플릿이 있어 건드리지 않음
    Existing,
    /// 현재 설정에서 새로 만듦
    Created,
}

/// 현재 렌더링된 설정을 템플릿으로 한 번만 고정합니다.
///
/// 템플릿이 이미 있으면 아무것도 하지 않습니다. 원본 설정은 복사만 하고 그대로 둡니다.
#[derive(Debug, Clone)]
pub struct TemplateMaterializer {
    template: PathBuf,
    output: PathBuf,
}

impl TemplateMaterializer {
    pub fn new(template: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            template: template.into(),
            output: output.into(),
        }
    }

    pub fn template_path(&self) -> &Path {
        &self.template
    }

    pub async fn ensure(&self) -> Result<Materialized, TemplateError> {
        let exists = tokio::fs::try_exists(&self.template).await.map_err(|e| TemplateError::FileError {
            path: self.template.display().to_string(),
            error: e,
        })?;
        if exists {
            debug!(template = %self.template.display(), "기존 템플릿 사용");
            return Ok(Materialized::Existing);
        }

        let current = tokio::fs::read_to_string(&self.output).await.map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                TemplateError::MissingFile {
                    template: self.template.display().to_string(),
                    output: self.output.display().to_string(),
                }
            } else {
                TemplateError::FileError {
                    path: self.output.display().to_string(),
                    error: e,
                }
            }
        })?;

        let template = excise_map_block(&current, &self.output)?;
        write_atomic(&self.template, &template).await.map_err(|e| TemplateError::FileError {
            path: self.template.display().to_string(),
            error: e,
        })?;

        info!(
            template = %self.template.display(),
            source = %self.output.display(),
            "기존 설정에서 템플릿 생성"
        );
        Ok(Materialized::Created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CONFIG: &str = "server_names_hash_bucket_size 128;\nmap $host $upstream_service {\n    default http://127.0.0.1:8080;\n}\nserver { listen 80; }\n";

    #[tokio::test]
    async fn test_creates_template_and_keeps_output() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("gateway.template");
        let output = dir.path().join("gateway");
        std::fs::write(&output, CONFIG).unwrap();

        let materializer = TemplateMaterializer::new(&template, &output);
        assert_eq!(materializer.ensure().await.unwrap(), Materialized::Created);

        assert_eq!(
            std::fs::read_to_string(&template).unwrap(),
            "server_names_hash_bucket_size 128;\n##MAP_BLOCK##\nserver { listen 80; }\n"
        );
        // 원본은 이동되지 않고 그대로
        assert_eq!(std::fs::read_to_string(&output).unwrap(), CONFIG);
    }

    #[tokio::test]
    async fn test_existing_template_untouched() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("gateway.template");
        let output = dir.path().join("gateway");
        std::fs::write(&template, "custom\n##MAP_BLOCK##\n").unwrap();
        std::fs::write(&output, CONFIG).unwrap();

        let materializer = TemplateMaterializer::new(&template, &output);
        assert_eq!(materializer.ensure().await.unwrap(), Materialized::Existing);
        assert_eq!(materializer.ensure().await.unwrap(), Materialized::Existing);
        assert_eq!(std::fs::read_to_string(&template).unwrap(), "custom\n##MAP_BLOCK##\n");
    }

    #[tokio::test]
    async fn test_missing_both_files() {
        let dir = tempdir().unwrap();
        let materializer = TemplateMaterializer::new(dir.path().join("t"), dir.path().join("o"));
        match materializer.ensure().await {
            Err(TemplateError::MissingFile { template, output }) => {
                assert!(template.ends_with("t"));
                assert!(output.ends_with("o"));
            }
            other => panic!("Expected MissingFile error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_no_template_written_on_failure() {
        let dir = tempdir().unwrap();
        let template = dir.path().join("gateway.template");
        let output = dir.path().join("gateway");
        std::fs::write(&output, "server { listen 80; }\n").unwrap();

        let materializer = TemplateMaterializer::new(&template, &output);
        assert!(matches!(materializer.ensure().await, Err(TemplateError::MapBlockNotFound { .. })));
        assert!(!template.exists());
    }
}
