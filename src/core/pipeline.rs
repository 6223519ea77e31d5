use crate::core::pivot::PivotMatrices;
use crate::core::{ConfigProvider, Pipeline, Storage, TransformResult};
use crate::domain::model::SourceFile;
use crate::domain::registry::Registry;
use crate::report::csv_export::render_csv_files;
use crate::report::json::render_results;
use crate::report::markdown::{render_summary, MarkdownOptions};
use crate::report::{CsvData, Statistics};
use crate::utils::error::Result;
use chrono::Utc;

/// Reads component files from `source`, writes reports to `output`.
pub struct CssPipeline<S: Storage, O: Storage, C: ConfigProvider> {
    source: S,
    output: O,
    config: C,
}

impl<S: Storage, O: Storage, C: ConfigProvider> CssPipeline<S, O, C> {
    pub fn new(source: S, output: O, config: C) -> Self {
        Self {
            source,
            output,
            config,
        }
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// 找出所有元件檔案 (相對於 components_path)
    pub async fn discover(&self) -> Result<Vec<SourceFile>> {
        let files = self.source.list_files(self.config.extensions()).await?;
        Ok(files
            .iter()
            .map(|relative| SourceFile::new(self.config.components_path(), relative))
            .collect())
    }
}

#[async_trait::async_trait]
impl<S: Storage, O: Storage, C: ConfigProvider> Pipeline for CssPipeline<S, O, C> {
    async fn extract(&self) -> Result<Registry> {
        let sources = self.discover().await?;
        tracing::info!(
            "🔍 Found {} component files in {}",
            sources.len(),
            self.config.components_path()
        );
        if sources.is_empty() {
            tracing::warn!(
                "No files with extensions [{}] found",
                self.config.extensions().join(", ")
            );
        }

        // 逐一處理，單一檔案失敗不影響其他檔案
        let mut registry = Registry::new();
        for source in &sources {
            let contents = self.source.read_file(&source.relative_path).await;
            let record = registry.add_source(source, contents);
            tracing::debug!(
                "{} -> {} ({} rules)",
                source.relative_path,
                record.name,
                record.rule_count()
            );
        }

        Ok(registry)
    }

    async fn transform(&self, registry: Registry) -> Result<TransformResult> {
        let matrices = PivotMatrices::from_registry(&registry);
        let csv_data = CsvData::from_matrices(&registry, &matrices);
        let statistics = Statistics::from_registry(&registry);

        tracing::debug!(
            "Property matrix: {} rows, component matrix: {} rows",
            csv_data.property_rows.len(),
            csv_data.component_rows.len()
        );

        Ok(TransformResult {
            registry,
            matrices,
            csv_data,
            statistics,
        })
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let generated_at = Utc::now();
        let mut written = Vec::new();

        if self.config.wants_format("json") {
            let data = render_results(
                &result.registry,
                &result.statistics.metadata,
                &result.csv_data,
                generated_at,
            )?;
            let name = self.config.results_filename();
            self.output.write_file(name, &data).await?;
            written.push(name.to_string());
        }

        if self.config.wants_format("csv") {
            let files = render_csv_files(
                &result.registry,
                &result.csv_data,
                &self.config.csv_filenames(),
            )?;
            for (name, data) in files {
                self.output.write_file(&name, &data).await?;
                written.push(name);
            }
        }

        if self.config.wants_format("markdown") {
            let options = MarkdownOptions {
                title: self.config.report_title().to_string(),
                top_properties: self.config.top_properties(),
                top_components: self.config.top_components(),
            };
            let summary = render_summary(&result.statistics, &options, generated_at);
            let name = self.config.summary_filename();
            self.output.write_file(name, summary.as_bytes()).await?;
            written.push(name.to_string());
        }

        tracing::info!("📝 Wrote {} files: {}", written.len(), written.join(", "));
        Ok(self.config.output_path().to_string())
    }
}
