use crate::core::ConfigProvider;
use crate::report::CsvFilenames;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid env var regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub project: Option<ProjectConfig>,
    pub source: SourceConfig,
    pub load: LoadConfig,
    pub report: Option<ReportConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub components_path: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    #[serde(default = "default_output_formats")]
    pub output_formats: Vec<String>,
    pub filenames: Option<FilenameConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub results: Option<String>,
    pub summary: Option<String>,
    pub property_matrix: Option<String>,
    pub component_matrix: Option<String>,
    pub component_summary: Option<String>,
    pub detailed_rules: Option<String>,
    pub custom_properties: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub title: Option<String>,
    pub top_properties: Option<usize>,
    pub top_components: Option<usize>,
}

fn default_extensions() -> Vec<String> {
    vec!["svelte".to_string()]
}

fn default_output_formats() -> Vec<String> {
    vec!["json".to_string(), "csv".to_string(), "markdown".to_string()]
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        Ok(toml::from_str(&processed_content)?)
    }

    /// 替換環境變數 (例如 ${COMPONENTS_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR_RE
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    fn filenames(&self) -> FilenameConfig {
        self.load.filenames.clone().unwrap_or_default()
    }

    pub fn project_name(&self) -> &str {
        self.project
            .as_ref()
            .map(|project| project.name.as_str())
            .unwrap_or("components")
    }

    pub fn project_description(&self) -> Option<&str> {
        self.project
            .as_ref()
            .and_then(|project| project.description.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("source.components_path", &self.source.components_path)?;
        validation::validate_extensions("source.extensions", &self.source.extensions)?;
        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(report) = &self.report {
            if let Some(top) = report.top_properties {
                validation::validate_positive_number("report.top_properties", top, 1)?;
            }
            if let Some(top) = report.top_components {
                validation::validate_positive_number("report.top_components", top, 1)?;
            }
            if let Some(title) = &report.title {
                validation::validate_non_empty_string("report.title", title)?;
            }
        }

        Ok(())
    }
}

impl ConfigProvider for TomlConfig {
    fn components_path(&self) -> &str {
        &self.source.components_path
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn extensions(&self) -> &[String] {
        &self.source.extensions
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn top_properties(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|report| report.top_properties)
            .unwrap_or(20)
    }

    fn top_components(&self) -> usize {
        self.report
            .as_ref()
            .and_then(|report| report.top_components)
            .unwrap_or(15)
    }

    fn report_title(&self) -> &str {
        self.report
            .as_ref()
            .and_then(|report| report.title.as_deref())
            .unwrap_or("Components CSS Analysis Report")
    }

    fn results_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|names| names.results.as_deref())
            .unwrap_or("css_extraction_results.json")
    }

    fn summary_filename(&self) -> &str {
        self.load
            .filenames
            .as_ref()
            .and_then(|names| names.summary.as_deref())
            .unwrap_or("CSS_Analysis_Summary.md")
    }

    fn csv_filenames(&self) -> CsvFilenames {
        let names = self.filenames();
        let defaults = CsvFilenames::default();
        CsvFilenames {
            property_matrix: names.property_matrix.unwrap_or(defaults.property_matrix),
            component_matrix: names.component_matrix.unwrap_or(defaults.component_matrix),
            summary: names.component_summary.unwrap_or(defaults.summary),
            detailed: names.detailed_rules.unwrap_or(defaults.detailed),
            tokens: names.custom_properties.unwrap_or(defaults.tokens),
        }
    }
}
