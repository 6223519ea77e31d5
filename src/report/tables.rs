use crate::core::pivot::PivotMatrices;
use crate::domain::registry::Registry;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::LazyLock;

/// `var(--name` references inside a value.
static VAR_REFERENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"var\((--[^,)]+)").expect("valid var() regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    pub data: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            data: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.data.push(row);
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The two matrix tables, in the shape stored in the JSON results.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CsvData {
    pub property_rows: Table,
    pub component_rows: Table,
}

impl CsvData {
    pub fn from_matrices(registry: &Registry, matrices: &PivotMatrices) -> Self {
        Self {
            property_rows: property_table(registry, matrices),
            component_rows: component_table(registry, matrices),
        }
    }
}

/// Properties as rows, every component as a column.
pub fn property_table(registry: &Registry, matrices: &PivotMatrices) -> Table {
    let mut table = Table::new(
        std::iter::once("CSS Property".to_string()).chain(registry.components().keys().cloned()),
    );

    for property in registry.all_properties() {
        let mut row = vec![property.clone()];
        for component in registry.components().keys() {
            row.push(
                matrices
                    .by_property(property, component)
                    .map(|cell| cell.render())
                    .unwrap_or_default(),
            );
        }
        table.push_row(row);
    }
    table
}

/// Styled components as rows, every property as a column.
pub fn component_table(registry: &Registry, matrices: &PivotMatrices) -> Table {
    let mut table = Table::new(
        std::iter::once("Component".to_string()).chain(registry.all_properties().iter().cloned()),
    );

    for record in registry.styled_components() {
        let mut row = vec![record.name.clone()];
        for property in registry.all_properties() {
            row.push(
                matrices
                    .by_component(&record.name, property)
                    .map(|cell| cell.render())
                    .unwrap_or_default(),
            );
        }
        table.push_row(row);
    }
    table
}

pub fn summary_table(registry: &Registry) -> Table {
    let mut table = Table::new([
        "Component",
        "File Path",
        "Has Styles",
        "CSS Rules Count",
        "Unique Properties Count",
    ]);

    for record in registry.components().values() {
        table.push_row(vec![
            record.name.clone(),
            record.relative_path.clone(),
            record.has_styles.to_string(),
            record.rule_count().to_string(),
            record.property_names().len().to_string(),
        ]);
    }
    table
}

pub fn detailed_rules_table(registry: &Registry) -> Table {
    let mut table = Table::new(["Component", "Selector", "Property", "Value", "File Path"]);

    for record in registry.styled_components() {
        for (selector, declaration) in record.declarations() {
            table.push_row(vec![
                record.name.clone(),
                selector.to_string(),
                declaration.property.clone(),
                declaration.value.clone(),
                record.relative_path.clone(),
            ]);
        }
    }
    table
}

/// One row per `var(--x)` reference, or per value that is itself a `--` token.
pub fn custom_properties_table(registry: &Registry) -> Table {
    let mut table = Table::new([
        "Component",
        "Selector",
        "Property",
        "Custom Property Used",
        "Full Value",
        "File Path",
    ]);

    for record in registry.styled_components() {
        for (selector, declaration) in record.declarations() {
            let value = &declaration.value;
            let mut used = var_references(value);
            if used.is_empty() && value.starts_with("--") {
                used.push(value.as_str());
            }

            for custom_property in used {
                table.push_row(vec![
                    record.name.clone(),
                    selector.to_string(),
                    declaration.property.clone(),
                    custom_property.to_string(),
                    value.clone(),
                    record.relative_path.clone(),
                ]);
            }
        }
    }
    table
}

pub fn var_references(value: &str) -> Vec<&str> {
    if !value.contains("var(") {
        return Vec::new();
    }
    VAR_REFERENCE_RE
        .captures_iter(value)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Distinct custom properties referenced anywhere through `var()`.
pub fn referenced_custom_properties(registry: &Registry) -> BTreeSet<String> {
    registry
        .styled_components()
        .flat_map(|record| record.declarations())
        .flat_map(|(_, declaration)| var_references(&declaration.value))
        .map(str::to_string)
        .collect()
}
