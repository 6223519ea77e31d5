use crate::core::builder::build_component;
use crate::domain::model::{ComponentRecord, Metadata, SourceFile};
use crate::utils::error::Result;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Every component seen during one run, keyed by component name, plus the
/// union of the property names found in their rules.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Registry {
    components: BTreeMap<String, ComponentRecord>,
    all_properties: BTreeSet<String>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the record for one file and adds it. Read or decode failures
    /// end up in the record's `error` field.
    pub fn add_source(&mut self, source: &SourceFile, contents: Result<Vec<u8>>) -> &ComponentRecord {
        let record = build_component(source, contents, &mut self.all_properties);
        let name = record.name.clone();
        self.replace(record);
        &self.components[&name]
    }

    /// 同名元件後者覆蓋前者，屬性集合只增不減
    fn replace(&mut self, record: ComponentRecord) {
        if let Some(previous) = self.components.insert(record.name.clone(), record) {
            tracing::warn!(
                "⚠️ Component name collision: '{}' ({}) was replaced",
                previous.name,
                previous.relative_path
            );
        }
    }

    pub fn components(&self) -> &BTreeMap<String, ComponentRecord> {
        &self.components
    }

    pub fn get(&self, name: &str) -> Option<&ComponentRecord> {
        self.components.get(name)
    }

    pub fn all_properties(&self) -> &BTreeSet<String> {
        &self.all_properties
    }

    pub fn styled_components(&self) -> impl Iterator<Item = &ComponentRecord> {
        self.components.values().filter(|record| record.has_styles)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn metadata(&self) -> Metadata {
        Metadata {
            total_components: self.components.len(),
            components_with_styles: self.styled_components().count(),
            total_css_properties: self.all_properties.len(),
            css_properties: self.all_properties.iter().cloned().collect(),
        }
    }
}
