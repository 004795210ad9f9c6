//! Schema registry mapping section names to their declared shape.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::definitions::create_jobfile_registry;
use super::types::{SchemaEntry, SectionSchema};
use crate::error::{JobfileError, Result};

static REGISTRY: LazyLock<SchemaRegistry> = LazyLock::new(create_jobfile_registry);

/// The process-wide registry of every legal section type.
///
/// Built once on first access and never mutated afterwards, so it can be
/// read from any number of threads without synchronisation.
#[must_use]
pub fn registry() -> &'static SchemaRegistry {
    &REGISTRY
}

/// Immutable table of section schemas in declared order.
#[derive(Debug)]
pub struct SchemaRegistry {
    sections: Vec<SectionSchema>,
    index: HashMap<&'static str, usize>,
}

impl SchemaRegistry {
    /// Build a registry from section schemas, keeping their order.
    #[must_use]
    pub fn new(sections: Vec<SectionSchema>) -> Self {
        let sections: Vec<SectionSchema> = sections
            .into_iter()
            .enumerate()
            .map(|(position, mut schema)| {
                schema.position = position;
                schema
            })
            .collect();
        let index = sections
            .iter()
            .map(|schema| (schema.name, schema.position))
            .collect();
        Self { sections, index }
    }

    /// Look up a section schema by name.
    pub fn lookup_section(&self, name: &str) -> Result<&SectionSchema> {
        self.index
            .get(name)
            .and_then(|&position| self.sections.get(position))
            .ok_or_else(|| JobfileError::UnknownSection(name.to_string()))
    }

    /// Look up an element schema within a section.
    pub fn lookup_element(&self, section: &str, element: &str) -> Result<&SchemaEntry> {
        self.lookup_section(section)?
            .element(element)
            .ok_or_else(|| JobfileError::UnknownElement {
                section: section.to_string(),
                element: element.to_string(),
            })
    }

    /// Section schemas in declared order.
    pub fn sections(&self) -> impl Iterator<Item = &SectionSchema> {
        self.sections.iter()
    }

    /// Section names in declared order.
    pub fn section_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.sections.iter().map(|s| s.name)
    }

    /// Check if a section name is registered.
    #[must_use]
    pub fn has_section(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Number of registered section types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Whether the registry holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}
