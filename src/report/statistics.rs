use crate::domain::model::Metadata;
use crate::domain::registry::Registry;
use crate::report::tables::referenced_custom_properties;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

pub const VENDOR_PREFIXES: [&str; 3] = ["-webkit-", "-moz-", "-ms-"];

const LAYOUT_PROPERTIES: [&str; 12] = [
    "display", "position", "top", "right", "bottom", "left", "z-index", "float", "clear",
    "overflow", "overflow-x", "overflow-y",
];

const FLEXBOX_PROPERTIES: [&str; 11] = [
    "flex",
    "flex-direction",
    "flex-wrap",
    "flex-flow",
    "justify-content",
    "align-items",
    "align-content",
    "align-self",
    "flex-grow",
    "flex-shrink",
    "flex-basis",
];

const SPACING_PREFIXES: [&str; 3] = ["margin", "padding", "gap"];

const TYPOGRAPHY_PREFIXES: [&str; 5] = ["font", "text", "line-height", "letter-spacing", "word-spacing"];

const COLOR_PROPERTIES: [&str; 5] = [
    "color",
    "background",
    "background-color",
    "border-color",
    "outline-color",
];

/// Design-token category for a custom property name.
pub fn token_category(token: &str) -> &'static str {
    if token.starts_with("--bg-") {
        "Background"
    } else if token.starts_with("--fg-") {
        "Foreground/Text"
    } else if token.starts_with("--fs-") {
        "Font Size"
    } else if token.starts_with("--fw-") {
        "Font Weight"
    } else if token.starts_with("--font-") {
        "Font Family"
    } else if token.starts_with("--bdr-") {
        "Border"
    } else if token.starts_with("--spc-") || token.starts_with("--space-") {
        "Spacing"
    } else {
        "Other"
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PropertyCategories {
    pub layout: Vec<String>,
    pub flexbox: Vec<String>,
    pub spacing: Vec<String>,
    pub typography: Vec<String>,
    pub color: Vec<String>,
}

impl PropertyCategories {
    fn classify<'a>(properties: impl Iterator<Item = &'a String>) -> Self {
        let mut categories = Self::default();
        for property in properties {
            let name = property.as_str();
            if LAYOUT_PROPERTIES.contains(&name) {
                categories.layout.push(property.clone());
            }
            if FLEXBOX_PROPERTIES.contains(&name) {
                categories.flexbox.push(property.clone());
            }
            if SPACING_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
                categories.spacing.push(property.clone());
            }
            if TYPOGRAPHY_PREFIXES.iter().any(|prefix| name.starts_with(prefix)) {
                categories.typography.push(property.clone());
            }
            if COLOR_PROPERTIES.contains(&name) {
                categories.color.push(property.clone());
            }
        }
        categories
    }

    /// `(label, properties)` pairs that have at least one property.
    pub fn non_empty(&self) -> Vec<(&'static str, &[String])> {
        [
            ("Layout Properties", self.layout.as_slice()),
            ("Flexbox Properties", self.flexbox.as_slice()),
            ("Spacing Properties", self.spacing.as_slice()),
            ("Typography Properties", self.typography.as_slice()),
            ("Color Properties", self.color.as_slice()),
        ]
        .into_iter()
        .filter(|(_, properties)| !properties.is_empty())
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    pub component: String,
    pub has_styles: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Statistics {
    pub metadata: Metadata,
    /// Number of styled components using each property, most used first.
    pub property_usage: Vec<(String, usize)>,
    /// Custom properties referenced through `var()`, grouped by category.
    pub design_tokens: BTreeMap<String, Vec<String>>,
    pub custom_property_count: usize,
    pub vendor_prefixed_count: usize,
    /// Components ranked by rule count.
    pub complexity: Vec<(String, usize)>,
    /// Components ranked by distinct property count.
    pub diversity: Vec<(String, usize)>,
    pub components_without_styles: Vec<String>,
    pub categories: PropertyCategories,
    /// Directory (or `root`) to the components it contains.
    pub directories: BTreeMap<String, Vec<DirectoryEntry>>,
}

impl Statistics {
    pub fn from_registry(registry: &Registry) -> Self {
        let metadata = registry.metadata();

        let mut usage: BTreeMap<&str, usize> = BTreeMap::new();
        for record in registry.styled_components() {
            for property in record.property_names() {
                *usage.entry(property).or_default() += 1;
            }
        }
        let property_usage = ranked(usage.into_iter().map(|(p, n)| (p.to_string(), n)));

        let mut design_tokens: BTreeMap<String, Vec<String>> = BTreeMap::new();
        let referenced = referenced_custom_properties(registry);
        for token in &referenced {
            design_tokens
                .entry(token_category(token).to_string())
                .or_default()
                .push(token.clone());
        }

        let custom_property_count = registry
            .all_properties()
            .iter()
            .filter(|property| property.starts_with("--"))
            .count();
        let vendor_prefixed_count = registry
            .all_properties()
            .iter()
            .filter(|property| VENDOR_PREFIXES.iter().any(|prefix| property.starts_with(prefix)))
            .count();

        let complexity = ranked(
            registry
                .styled_components()
                .map(|record| (record.name.clone(), record.rule_count())),
        );
        let diversity = ranked(
            registry
                .styled_components()
                .map(|record| (record.name.clone(), record.property_names().len())),
        );

        let components_without_styles = registry
            .components()
            .values()
            .filter(|record| !record.has_styles)
            .map(|record| record.name.clone())
            .collect();

        // 只分類目前仍在 registry 中的元件所使用的屬性
        let used: BTreeSet<&String> = property_usage.iter().map(|(property, _)| property).collect();
        let categories = PropertyCategories::classify(used.into_iter());

        let mut directories: BTreeMap<String, Vec<DirectoryEntry>> = BTreeMap::new();
        for record in registry.components().values() {
            directories
                .entry(record.directory().unwrap_or_else(|| "root".to_string()))
                .or_default()
                .push(DirectoryEntry {
                    component: record.name.clone(),
                    has_styles: record.has_styles,
                });
        }

        Self {
            metadata,
            property_usage,
            design_tokens,
            custom_property_count,
            vendor_prefixed_count,
            complexity,
            diversity,
            components_without_styles,
            categories,
            directories,
        }
    }

    /// The `limit` most used properties with their component counts.
    pub fn top_properties(&self, limit: usize) -> &[(String, usize)] {
        &self.property_usage[..limit.min(self.property_usage.len())]
    }

    pub fn referenced_token_count(&self) -> usize {
        self.design_tokens.values().map(Vec::len).sum()
    }
}

/// Sorts by count descending; ties keep name order.
fn ranked(items: impl Iterator<Item = (String, usize)>) -> Vec<(String, usize)> {
    let mut items: Vec<(String, usize)> = items.collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    items
}
