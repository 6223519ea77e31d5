use crate::core::pivot::PivotMatrices;
use crate::domain::registry::Registry;
use crate::report::statistics::Statistics;
use crate::report::tables::CsvData;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// A component file handed to the extractor by discovery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub relative_path: String,
    pub file_path: String,
    pub base_name: String,
}

impl SourceFile {
    pub fn new(root: &str, relative_path: &str) -> Self {
        let base_name = Path::new(relative_path)
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| relative_path.to_string());

        Self {
            relative_path: relative_path.to_string(),
            file_path: Path::new(root).join(relative_path).to_string_lossy().into_owned(),
            base_name,
        }
    }

    /// 所在目錄 (相對路徑)，位於根目錄時為 `None`
    pub fn directory(&self) -> Option<String> {
        directory_of(&self.relative_path)
    }
}

pub fn directory_of(relative_path: &str) -> Option<String> {
    let normalized = relative_path.replace('\\', "/");
    normalized
        .rsplit_once('/')
        .map(|(dir, _)| dir.to_string())
        .filter(|dir| !dir.is_empty())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Declaration {
    pub property: String,
    pub value: String,
}

/// One `selector { ... }` block. Property names are unique within a rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub selector: String,
    pub declarations: Vec<Declaration>,
}

impl Rule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    /// Sets `property`; a repeated property keeps its slot and takes the new value.
    pub fn set(&mut self, property: &str, value: &str) {
        match self
            .declarations
            .iter_mut()
            .find(|declaration| declaration.property == property)
        {
            Some(existing) => existing.value = value.to_string(),
            None => self.declarations.push(Declaration {
                property: property.to_string(),
                value: value.to_string(),
            }),
        }
    }

    pub fn get(&self, property: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|declaration| declaration.property == property)
            .map(|declaration| declaration.value.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.declarations.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentRecord {
    pub name: String,
    pub relative_path: String,
    pub file_path: String,
    pub has_styles: bool,
    pub rules: Vec<Rule>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ComponentRecord {
    pub fn without_styles(source: &SourceFile) -> Self {
        Self {
            name: source.base_name.clone(),
            relative_path: source.relative_path.clone(),
            file_path: source.file_path.clone(),
            has_styles: false,
            rules: Vec::new(),
            raw_style: None,
            error: None,
        }
    }

    pub fn with_styles(source: &SourceFile, raw_style: &str, rules: Vec<Rule>) -> Self {
        Self {
            has_styles: true,
            rules,
            raw_style: Some(raw_style.to_string()),
            ..Self::without_styles(source)
        }
    }

    pub fn failed(source: &SourceFile, error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::without_styles(source)
        }
    }

    /// `(selector, declaration)` in source order.
    pub fn declarations(&self) -> impl Iterator<Item = (&str, &Declaration)> {
        self.rules.iter().flat_map(|rule| {
            rule.declarations
                .iter()
                .map(move |declaration| (rule.selector.as_str(), declaration))
        })
    }

    pub fn property_names(&self) -> BTreeSet<&str> {
        self.declarations()
            .map(|(_, declaration)| declaration.property.as_str())
            .collect()
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    pub fn directory(&self) -> Option<String> {
        directory_of(&self.relative_path)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub total_components: usize,
    pub components_with_styles: usize,
    pub total_css_properties: usize,
    pub css_properties: Vec<String>,
}

impl Metadata {
    pub fn components_without_styles(&self) -> usize {
        self.total_components - self.components_with_styles
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub registry: Registry,
    pub matrices: PivotMatrices,
    pub csv_data: CsvData,
    pub statistics: Statistics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_file_names() {
        let source = SourceFile::new("/app/components", "layout/Header.svelte");
        assert_eq!(source.base_name, "Header");
        assert_eq!(source.relative_path, "layout/Header.svelte");
        assert!(source.file_path.ends_with("Header.svelte"));
        assert_eq!(source.directory().as_deref(), Some("layout"));

        let root_level = SourceFile::new("/app/components", "Button.svelte");
        assert_eq!(root_level.directory(), None);
    }

    #[test]
    fn test_rule_set_keeps_position_and_last_value() {
        let mut rule = Rule::new(".a");
        rule.set("color", "red");
        rule.set("margin", "0");
        rule.set("color", "blue");

        assert_eq!(rule.declarations.len(), 2);
        assert_eq!(rule.declarations[0].property, "color");
        assert_eq!(rule.get("color"), Some("blue"));
    }

    #[test]
    fn test_failed_record_has_no_styles() {
        let source = SourceFile::new(".", "Broken.svelte");
        let record = ComponentRecord::failed(&source, "boom");
        assert!(!record.has_styles);
        assert!(record.rules.is_empty());
        assert!(record.raw_style.is_none());
        assert_eq!(record.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_record_serialization_omits_absent_fields() {
        let source = SourceFile::new(".", "Plain.svelte");
        let json = serde_json::to_value(ComponentRecord::without_styles(&source)).unwrap();
        assert!(json.get("raw_style").is_none());
        assert!(json.get("error").is_none());
        assert_eq!(json["has_styles"], false);
        assert_eq!(json["name"], "Plain");
    }
}
