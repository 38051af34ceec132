use std::path::PathBuf;
use tracing::{info, instrument};

use crate::error::GeneratorError;
use crate::inventory::{GlobalConfig, InventoryKind, InventorySource, JsonFileSource};
use crate::output::write_atomic;
use crate::routing_map::{DomainName, FallbackUpstream, MapBlock, MapBlockBuilder};
use crate::settings::{Settings, SettingsError};
use crate::template::{load_template, Materialized, TemplateMaterializer};

/// 한 번의 실행 결과
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationReport {
    pub template: Materialized,
    pub entries: usize,
    pub output: PathBuf,
}

/// 템플릿 생성 → 맵 블록 생성 → 렌더링 → 원자적 쓰기를 수행하는 파이프라인.
pub struct Generator {
    vm_source: Box<dyn InventorySource>,
    lxc_source: Box<dyn InventorySource>,
    global_config: PathBuf,
    domain_key: String,
    fallback: FallbackUpstream,
    materializer: TemplateMaterializer,
    output: PathBuf,
}

impl Generator {
    /// 설정에 지정된 JSON 파일들을 소스로 사용합니다.
    pub fn from_settings(settings: &Settings) -> Result<Self, GeneratorError> {
        Self::with_sources(
            settings,
            Box::new(JsonFileSource::new(settings.vm_config_path(), InventoryKind::Vm)),
            Box::new(JsonFileSource::new(settings.lxc_config_path(), InventoryKind::Lxc)),
        )
    }

    pub fn with_sources(
        settings: &Settings,
        vm_source: Box<dyn InventorySource>,
        lxc_source: Box<dyn InventorySource>,
    ) -> Result<Self, GeneratorError> {
        settings.validate()?;

        for (source, expected) in [(&vm_source, InventoryKind::Vm), (&lxc_source, InventoryKind::Lxc)] {
            if source.kind() != expected {
                return Err(SettingsError::InvalidConfig(format!(
                    "{} 인벤토리 자리에 {} 소스가 지정됨: {}",
                    expected,
                    source.kind(),
                    source.describe()
                ))
                .into());
            }
        }

        Ok(Self {
            vm_source,
            lxc_source,
            global_config: settings.global_config_path(),
            domain_key: settings.inventory.domain_key.clone(),
            fallback: settings.gateway.fallback()?,
            materializer: TemplateMaterializer::new(settings.template_path(), settings.output_path()),
            output: settings.output_path(),
        })
    }

    /// 도메인 이름을 읽고 두 인벤토리에서 맵 블록을 만듭니다.
    pub async fn build_map(&self) -> Result<MapBlock, GeneratorError> {
        let global = GlobalConfig::from_file(&self.global_config).await?;
        let domain = DomainName::parse(global.get_str(&self.domain_key)?)?;

        let vms = self.vm_source.load().await?;
        let lxcs = self.lxc_source.load().await?;

        let builder = MapBlockBuilder::new(domain, self.fallback.clone());
        Ok(builder.build(&[&vms, &lxcs])?)
    }

    /// 최종 설정 텍스트를 만듭니다. 필요하면 템플릿을 먼저 생성합니다.
    pub async fn render(&self) -> Result<(Materialized, MapBlock, String), GeneratorError> {
        let materialized = self.materializer.ensure().await?;
        let block = self.build_map().await?;
        let template = load_template(self.materializer.template_path()).await?;
        let rendered = template.render(&block.lines());
        Ok((materialized, block, rendered))
    }

    #[instrument(skip(self), fields(output = %self.output.display()))]
    pub async fn run(&self) -> Result<GenerationReport, GeneratorError> {
        let (template, block, rendered) = self.render().await?;

        write_atomic(&self.output, &rendered).await.map_err(|e| GeneratorError::Output {
            path: self.output.display().to_string(),
            error: e,
        })?;

        info!(
            entries = block.entries.len(),
            vm_source = %self.vm_source.describe(),
            lxc_source = %self.lxc_source.describe(),
            "게이트웨이 설정 생성 완료"
        );

        Ok(GenerationReport {
            template,
            entries: block.entries.len(),
            output: self.output.clone(),
        })
    }
}
