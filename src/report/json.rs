use crate::domain::model::{ComponentRecord, Metadata};
use crate::domain::registry::Registry;
use crate::report::tables::CsvData;
use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Serialize)]
pub struct ResultsMetadata<'a> {
    #[serde(flatten)]
    pub summary: &'a Metadata,
    pub generated_at: DateTime<Utc>,
}

/// Layout of `css_extraction_results.json`.
#[derive(Debug, Serialize)]
pub struct ResultsDocument<'a> {
    pub metadata: ResultsMetadata<'a>,
    pub components: &'a BTreeMap<String, ComponentRecord>,
    pub csv_data: &'a CsvData,
}

pub fn render_results(
    registry: &Registry,
    metadata: &Metadata,
    csv_data: &CsvData,
    generated_at: DateTime<Utc>,
) -> Result<Vec<u8>> {
    let document = ResultsDocument {
        metadata: ResultsMetadata {
            summary: metadata,
            generated_at,
        },
        components: registry.components(),
        csv_data,
    };
    Ok(serde_json::to_vec_pretty(&document)?)
}
