use crate::core::Pipeline;
use crate::report::Statistics;
use crate::utils::error::Result;

/// What a finished run wrote, plus the statistics it was rendered from.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: String,
    pub statistics: Statistics,
}

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<RunOutcome> {
        tracing::info!("🚀 Starting CSS extraction...");

        // Extract
        let registry = self.pipeline.extract().await?;
        let metadata = registry.metadata();
        tracing::info!(
            "📂 Extracted {} components ({} with styles)",
            metadata.total_components,
            metadata.components_with_styles
        );

        // Transform
        let result = self.pipeline.transform(registry).await?;
        tracing::info!(
            "🔄 Pivoted {} CSS properties",
            result.statistics.metadata.total_css_properties
        );

        // Load
        let statistics = result.statistics.clone();
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("💾 Output saved to: {}", output_path);

        Ok(RunOutcome {
            output_path,
            statistics,
        })
    }
}
