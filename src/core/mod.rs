pub mod builder;
pub mod css;
pub mod etl;
pub mod pipeline;
pub mod pivot;

pub use crate::domain::model::{ComponentRecord, Rule, SourceFile, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
