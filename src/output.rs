//! 설정 파일 쓰기.
//!
//! 중간에 중단되어도 반쯤 쓰인 설정이 남지 않도록 같은 디렉토리의 임시 파일에
//! 쓴 뒤 rename으로 교체합니다.

use std::io;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use uuid::Uuid;

pub async fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidInput, format!("파일 이름이 없는 경로: {}", path.display()))
    })?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let tmp_path = dir.join(format!(
        ".{}.{}.tmp",
        file_name.to_string_lossy(),
        Uuid::new_v4().simple()
    ));

    let result = async {
        let mut file = tokio::fs::File::create(&tmp_path).await?;
        file.write_all(contents.as_bytes()).await?;
        file.sync_all().await?;
        drop(file);
        tokio::fs::rename(&tmp_path, path).await
    }
    .await;

    if result.is_err() {
        // 실패 시 임시 파일 정리, 정리 실패는 원래 에러를 가리지 않음
        let _ = tokio::fs::remove_file(&tmp_path).await;
    } else {
        debug!(path = %path.display(), bytes = contents.len(), "파일 교체 완료");
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_write_atomic_replaces_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new contents\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents\n");
        // 임시 파일이 남지 않아야 함
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn test_write_atomic_missing_directory() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("missing").join("gateway");
        assert!(write_atomic(&path, "x").await.is_err());
        assert!(!path.exists());
    }
}
