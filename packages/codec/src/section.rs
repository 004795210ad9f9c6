//! Section: a named block of elements bound to its schema.
//!
//! A section renders as
//!
//! ```text
//! START_SECTION <NAME>
//!    <ELEMENT>                                    <values>
//! END_SECTION
//! ```
//!
//! and parses back by walking the schema's elements in declared order over
//! a cursor into the body lines. Elements out of order are rejected.

use crate::config::{self, SECTION_END, SECTION_START};
use crate::element::Element;
use crate::error::{JobfileError, Result};
use crate::schema::{registry, SectionSchema};
use crate::types::{Scalar, ScalarType, Value};

/// One instance of a section type.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    schema: &'static SectionSchema,
    /// One element per schema entry, in declared order.
    elements: Vec<Element>,
}

impl Section {
    /// Create a section with every element set to its schema default.
    ///
    /// # Errors
    /// `UnknownSection` if `name` is not in the registry.
    pub fn new(name: &str) -> Result<Self> {
        let schema = registry().lookup_section(name)?;
        let elements = schema
            .elements
            .iter()
            .map(Element::new)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { schema, elements })
    }

    /// Section name.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.schema.name
    }

    /// Schema the section is bound to.
    #[must_use]
    pub fn schema(&self) -> &'static SectionSchema {
        self.schema
    }

    /// Elements in declared order, set or not.
    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.elements.iter()
    }

    /// Look up an element by name.
    pub fn element(&self, name: &str) -> Result<&Element> {
        self.elements
            .iter()
            .find(|e| e.name() == name)
            .ok_or_else(|| unknown_element(self.name(), name))
    }

    fn element_mut(&mut self, name: &str) -> Result<&mut Element> {
        let section = self.schema.name;
        self.elements
            .iter_mut()
            .find(|e| e.name() == name)
            .ok_or_else(|| unknown_element(section, name))
    }

    /// Set an element's value. See [`Element::set`] for the return value.
    pub fn set(&mut self, element: &str, value: impl Into<Value>) -> Result<bool> {
        self.element_mut(element)?.set(value)
    }

    /// Get an element's value; `Ok(None)` when the element is unset.
    pub fn get(&self, element: &str) -> Result<Option<&[Scalar]>> {
        Ok(self.element(element)?.get())
    }

    /// Whether every required element has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.elements
            .iter()
            .all(|e| e.schema().is_optional || e.is_set())
    }

    /// Current values of the id elements, in declared id order.
    pub fn id_values(&self) -> Vec<(&'static str, Option<&[Scalar]>)> {
        self.schema
            .id_elements
            .iter()
            .map(|&id| (id, self.element(id).ok().and_then(Element::get)))
            .collect()
    }

    /// Whether two sections cannot coexist in one document.
    ///
    /// Sections of different types never interfere. Two instances of a
    /// single-instance type always do. Otherwise they interfere when every
    /// id element holds the same value in both.
    #[must_use]
    pub fn interferes(a: &Section, b: &Section) -> bool {
        if a.name() != b.name() {
            return false;
        }
        if !a.schema.multiple_allowed {
            return true;
        }
        a.id_values() == b.id_values()
    }

    /// Render the section block. Unset elements are omitted.
    #[must_use]
    pub fn render(&self) -> String {
        let mut lines = vec![format!("{SECTION_START} {}", self.name())];
        lines.extend(self.elements.iter().filter_map(Element::render));
        lines.push(SECTION_END.to_string());
        lines.join("\n")
    }

    /// Parse a section body (the lines between the delimiters).
    pub fn parse_body(name: &str, body: &str) -> Result<Self> {
        let lines: Vec<&str> = if body.is_empty() {
            Vec::new()
        } else {
            body.split('\n').collect()
        };
        Self::parse_lines(name, &lines)
    }

    /// Parse a section body given as individual lines.
    ///
    /// Elements absent from the body stay unset. Matched elements start
    /// from their schema default, so a value rejected by its validator
    /// leaves the default in place. Without a default to fall back on the
    /// rejected value is a `RejectedValue` error.
    pub fn parse_lines(name: &str, lines: &[&str]) -> Result<Self> {
        let schema = registry().lookup_section(name)?;
        let mut elements: Vec<Element> = schema.elements.iter().map(Element::unset).collect();
        let continuation = config::continuation_prefix();
        let mut cursor = 0;

        for (slot, entry) in elements.iter_mut().zip(&schema.elements) {
            let prefix = config::element_prefix(entry.name);
            let Some(line) = lines.get(cursor).filter(|l| l.starts_with(&prefix)) else {
                if !entry.is_optional {
                    return Err(JobfileError::MissingElement {
                        section: schema.name.to_string(),
                        element: entry.name.to_string(),
                    });
                }
                continue;
            };

            let mut text = line[prefix.len()..].to_string();
            cursor += 1;
            if entry.scalar_type == ScalarType::Multiline {
                while let Some(next) = lines.get(cursor).filter(|l| l.starts_with(&continuation)) {
                    text.push('\n');
                    text.push_str(&next[continuation.len()..]);
                    cursor += 1;
                }
            }

            let mut element = Element::new(entry).map_err(|e| e.in_section(schema.name))?;
            let accepted = element
                .parse(&text)
                .map_err(|e| e.in_section(schema.name))?;
            if !accepted && !element.is_set() {
                return Err(JobfileError::RejectedValue {
                    element: entry.name.to_string(),
                    text: text.trim().to_string(),
                }
                .in_section(schema.name));
            }
            if !accepted {
                tracing::warn!(
                    section = schema.name,
                    element = entry.name,
                    value = %text.trim(),
                    "Value outside allowed values, keeping default"
                );
            }
            *slot = element;
        }

        if let Some(line) = lines.get(cursor) {
            // Also reached for duplicated or out-of-order elements
            return Err(JobfileError::UnreadLines {
                section: schema.name.to_string(),
                line: line.to_string(),
            });
        }

        Ok(Self { schema, elements })
    }

    /// Undo the vendor converter's angle-bracket wrapping on flagged
    /// elements (`<Default>` becomes `Default`).
    pub fn fix_delimiter_artifact(&mut self) {
        for element in &mut self.elements {
            if element.schema().fix_delimiter_bug && element.strip_angle_delimiters() {
                tracing::debug!(
                    section = self.schema.name,
                    element = element.name(),
                    "Stripped angle delimiters"
                );
            }
        }
    }
}

fn unknown_element(section: &str, element: &str) -> JobfileError {
    JobfileError::UnknownElement {
        section: section.to_string(),
        element: element.to_string(),
    }
}
