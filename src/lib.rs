pub mod config;
pub mod core;
pub mod domain;
pub mod report;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{etl::EtlEngine, pipeline::CssPipeline, pivot::PivotMatrices};
pub use domain::registry::Registry;
pub use utils::error::{EtlError, Result};
