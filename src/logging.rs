use std::path::Path;
use time::format_description::well_known::Rfc3339;
use tracing::level_filters::LevelFilter;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::{time::UtcTime, writer::BoxMakeWriter};
use tracing_subscriber::EnvFilter;

use crate::settings::logging::{LogFormat, LogOutput};
use crate::settings::LogSettings;

/// 전역 로거를 초기화합니다.
///
/// 파일 출력이면 non-blocking writer를 사용하므로, 반환된 guard를 프로세스 종료까지
/// 유지해야 마지막 로그가 기록됩니다. `RUST_LOG`가 있으면 설정 레벨보다 우선합니다.
pub fn init_logging(settings: &LogSettings) -> Result<Option<WorkerGuard>, String> {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(settings.level).into())
        .from_env_lossy();

    let (writer, guard, ansi) = match &settings.output {
        LogOutput::Stdout => (BoxMakeWriter::new(std::io::stdout), None, true),
        LogOutput::File(path) => {
            let path = Path::new(path);
            let dir = match path.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent,
                _ => Path::new("."),
            };
            let file_name = path
                .file_name()
                .ok_or_else(|| format!("잘못된 로그 파일 경로: {}", path.display()))?;

            let appender = RollingFileAppender::builder()
                .rotation(Rotation::NEVER)
                .filename_prefix(file_name.to_string_lossy())
                .build(dir)
                .map_err(|e| format!("로그 파일 열기 실패 ({}): {}", path.display(), e))?;
            let (non_blocking, guard) = tracing_appender::non_blocking(appender);
            (BoxMakeWriter::new(non_blocking), Some(guard), false)
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_timer(UtcTime::new(Rfc3339))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true);

    let result = match settings.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Text => builder.try_init(),
    };
    result.map_err(|e| format!("로거 초기화 실패: {}", e))?;

    Ok(guard)
}
