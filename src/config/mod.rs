pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "css-etl")]
#[command(about = "Extract component styles into CSS property matrices and reports")]
pub struct CliConfig {
    /// Directory scanned recursively for component files
    #[arg(long, default_value = "src/lib/components")]
    pub components_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    /// Component file extensions, without the leading dot
    #[arg(long, value_delimiter = ',', default_value = "svelte")]
    pub extensions: Vec<String>,

    /// Outputs to write: json, csv, markdown
    #[arg(long, value_delimiter = ',', default_value = "json,csv,markdown")]
    pub formats: Vec<String>,

    /// Number of most used properties listed in reports
    #[arg(long, default_value = "20")]
    pub top: usize,

    #[arg(long, default_value = "15")]
    pub top_components: usize,

    /// TOML configuration file; replaces the path/format options above
    #[arg(short, long)]
    pub config: Option<String>,

    /// Show discovered files and settings without writing anything
    #[arg(long)]
    pub dry_run: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("components_path", &self.components_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_extensions("extensions", &self.extensions)?;
        validation::validate_output_formats("formats", &self.formats)?;
        validation::validate_range("top", self.top, 1, 1000)?;
        validation::validate_range("top_components", self.top_components, 1, 1000)?;
        Ok(())
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn components_path(&self) -> &str {
        &self.components_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn extensions(&self) -> &[String] {
        &self.extensions
    }

    fn output_formats(&self) -> &[String] {
        &self.formats
    }

    fn top_properties(&self) -> usize {
        self.top
    }

    fn top_components(&self) -> usize {
        self.top_components
    }
}
