use crate::domain::model::TransformResult;
use crate::domain::registry::Registry;
use crate::report::CsvFilenames;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Relative paths (sorted) of the files whose extension is in `extensions`.
    fn list_files(
        &self,
        extensions: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<String>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn components_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn extensions(&self) -> &[String];
    fn output_formats(&self) -> &[String];
    fn top_properties(&self) -> usize;
    fn top_components(&self) -> usize;

    fn report_title(&self) -> &str {
        "Components CSS Analysis Report"
    }

    fn results_filename(&self) -> &str {
        "css_extraction_results.json"
    }

    fn summary_filename(&self) -> &str {
        "CSS_Analysis_Summary.md"
    }

    fn csv_filenames(&self) -> CsvFilenames {
        CsvFilenames::default()
    }

    fn wants_format(&self, format: &str) -> bool {
        self.output_formats().iter().any(|f| f == format)
    }
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Registry>;
    async fn transform(&self, registry: Registry) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
