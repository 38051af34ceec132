use std::process::ExitCode;
use tracing::{error, info};

use gateway_mapgen::logging::init_logging;
use gateway_mapgen::settings::Settings;
use gateway_mapgen::Generator;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // 로거보다 설정이 먼저 필요하므로 설정 오류는 stderr로 출력
    let settings = match Settings::load().await {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("설정 로드 실패: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match init_logging(&settings.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    info!(root = %settings.root.display(), "게이트웨이 설정 생성 시작");

    let generator = match Generator::from_settings(&settings) {
        Ok(generator) => generator,
        Err(e) => {
            error!(error = %e, "생성기 초기화 실패");
            return ExitCode::FAILURE;
        }
    };

    match generator.run().await {
        Ok(report) => {
            info!(
                output = %report.output.display(),
                entries = report.entries,
                template = ?report.template,
                "완료"
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "게이트웨이 설정 생성 실패");
            ExitCode::FAILURE
        }
    }
}
