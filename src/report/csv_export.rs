use crate::domain::registry::Registry;
use crate::report::tables::{
    custom_properties_table, detailed_rules_table, summary_table, CsvData, Table,
};
use crate::utils::error::{EtlError, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvFilenames {
    pub property_matrix: String,
    pub component_matrix: String,
    pub summary: String,
    pub detailed: String,
    pub tokens: String,
}

impl Default for CsvFilenames {
    fn default() -> Self {
        Self {
            property_matrix: "css_properties_by_component.csv".to_string(),
            component_matrix: "components_by_css_properties.csv".to_string(),
            summary: "component_summary.csv".to_string(),
            detailed: "detailed_css_rules.csv".to_string(),
            tokens: "css_custom_properties.csv".to_string(),
        }
    }
}

pub fn table_to_csv(table: &Table) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&table.headers)?;
    for row in &table.data {
        writer.write_record(row)?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))
}

/// Every CSV export as `(filename, contents)`, in a fixed order.
pub fn render_csv_files(
    registry: &Registry,
    csv_data: &CsvData,
    filenames: &CsvFilenames,
) -> Result<Vec<(String, Vec<u8>)>> {
    let tables = [
        (&filenames.property_matrix, csv_data.property_rows.clone()),
        (&filenames.component_matrix, csv_data.component_rows.clone()),
        (&filenames.summary, summary_table(registry)),
        (&filenames.detailed, detailed_rules_table(registry)),
        (&filenames.tokens, custom_properties_table(registry)),
    ];

    tables
        .into_iter()
        .map(|(name, table)| -> Result<(String, Vec<u8>)> {
            tracing::debug!("Rendering {} ({} rows)", name, table.len());
            Ok((name.clone(), table_to_csv(&table)?))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::pivot::PivotMatrices;
    use crate::domain::model::SourceFile;

    #[test]
    fn test_table_to_csv_quotes_fields() {
        let mut table = Table::new(["Component", "Selector"]);
        table.push_row(vec!["Nav".to_string(), ".a, .b".to_string()]);

        let csv = String::from_utf8(table_to_csv(&table).unwrap()).unwrap();
        assert_eq!(csv, "Component,Selector\nNav,\".a, .b\"\n");
    }

    #[test]
    fn test_render_csv_files() {
        let mut registry = Registry::new();
        registry.add_source(
            &SourceFile::new("/c", "Tag.svelte"),
            Ok(b"<style>.tag { color: red; }</style>".to_vec()),
        );
        let matrices = PivotMatrices::from_registry(&registry);
        let csv_data = CsvData::from_matrices(&registry, &matrices);

        let files = render_csv_files(&registry, &csv_data, &CsvFilenames::default()).unwrap();
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "css_properties_by_component.csv",
                "components_by_css_properties.csv",
                "component_summary.csv",
                "detailed_css_rules.csv",
                "css_custom_properties.csv",
            ]
        );

        let property_csv = String::from_utf8(files[0].1.clone()).unwrap();
        assert_eq!(property_csv, "CSS Property,Tag\ncolor,.tag: red\n");
    }
}
