//! Property-major and component-major views of a registry.
//!
//! Cells keep every `(selector, value)` occurrence; they are only joined into
//! a `" | "` separated string when rendered or serialized.

use crate::domain::registry::Registry;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const OCCURRENCE_SEPARATOR: &str = " | ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence {
    pub selector: String,
    pub value: String,
}

impl fmt::Display for Occurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.selector, self.value)
    }
}

/// All occurrences of one property within one component, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell(Vec<Occurrence>);

impl Cell {
    pub fn push(&mut self, selector: &str, value: &str) {
        self.0.push(Occurrence {
            selector: selector.to_string(),
            value: value.to_string(),
        });
    }

    pub fn occurrences(&self) -> &[Occurrence] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, occurrence) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(OCCURRENCE_SEPARATOR)?;
            }
            write!(f, "{}", occurrence)?;
        }
        Ok(())
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub type Matrix = BTreeMap<String, BTreeMap<String, Cell>>;

#[derive(Debug, Clone, Default, Serialize)]
pub struct PivotMatrices {
    /// `property -> component -> cell`
    pub property_major: Matrix,
    /// `component -> property -> cell`
    pub component_major: Matrix,
}

impl PivotMatrices {
    /// Both matrices are filled for every known (component, property) pair;
    /// a missing pair is an empty cell.
    pub fn from_registry(registry: &Registry) -> Self {
        let per_component: BTreeMap<&str, BTreeMap<&str, Cell>> = registry
            .components()
            .iter()
            .map(|(name, record)| {
                let mut cells: BTreeMap<&str, Cell> = BTreeMap::new();
                for (selector, declaration) in record.declarations() {
                    cells
                        .entry(declaration.property.as_str())
                        .or_default()
                        .push(selector, &declaration.value);
                }
                (name.as_str(), cells)
            })
            .collect();

        let lookup = |component: &str, property: &str| -> Cell {
            per_component
                .get(component)
                .and_then(|cells| cells.get(property))
                .cloned()
                .unwrap_or_default()
        };

        let mut property_major = Matrix::new();
        let mut component_major = Matrix::new();

        for property in registry.all_properties() {
            let row = property_major.entry(property.clone()).or_default();
            for component in registry.components().keys() {
                row.insert(component.clone(), lookup(component, property));
            }
        }

        for component in registry.components().keys() {
            let row = component_major.entry(component.clone()).or_default();
            for property in registry.all_properties() {
                row.insert(property.clone(), lookup(component, property));
            }
        }

        Self {
            property_major,
            component_major,
        }
    }

    pub fn by_property(&self, property: &str, component: &str) -> Option<&Cell> {
        self.property_major.get(property)?.get(component)
    }

    pub fn by_component(&self, component: &str, property: &str) -> Option<&Cell> {
        self.component_major.get(component)?.get(property)
    }
}
