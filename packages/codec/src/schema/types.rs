//! Schema entries for sections and their elements.

use crate::types::{Scalar, ScalarType, Validator, Value};

/// Declared shape of one element (field) of a section.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaEntry {
    /// Element name as written in the jobfile.
    pub name: &'static str,
    /// Number of scalar values the element holds.
    pub arity: usize,
    /// Type of every scalar value.
    pub scalar_type: ScalarType,
    /// Whether the element may be left unset.
    pub is_optional: bool,
    /// Value applied when a section is created.
    pub default: Option<Vec<Scalar>>,
    /// List or range constraint on the values.
    pub validator: Option<Validator>,
    /// Section type whose instances define the legal values (informational).
    pub defined_in: Option<&'static str>,
    /// Values may be wrapped in stray `<...>` by the vendor converter.
    pub fix_delimiter_bug: bool,
}

impl SchemaEntry {
    /// Create an optional element with no default and no validator.
    #[must_use]
    pub fn new(name: &'static str, arity: usize, scalar_type: ScalarType) -> Self {
        Self {
            name,
            arity,
            scalar_type,
            is_optional: true,
            default: None,
            validator: None,
            defined_in: None,
            fix_delimiter_bug: false,
        }
    }

    /// Mark the element as required.
    #[must_use]
    pub fn required(mut self) -> Self {
        self.is_optional = false;
        self
    }

    /// Set the default value.
    #[must_use]
    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into().into_scalars());
        self
    }

    /// Restrict values to a fixed set.
    #[must_use]
    pub fn one_of<T: Into<Scalar>>(mut self, allowed: impl IntoIterator<Item = T>) -> Self {
        self.validator = Some(Validator::List(
            allowed.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Restrict values to an inclusive range.
    #[must_use]
    pub fn range(mut self, low: impl Into<Scalar>, high: impl Into<Scalar>) -> Self {
        self.validator = Some(Validator::Range(low.into(), high.into()));
        self
    }

    /// Record the section type that defines the legal values.
    #[must_use]
    pub fn defined_in(mut self, section: &'static str) -> Self {
        self.defined_in = Some(section);
        self
    }

    /// Flag the element for the angle-bracket delimiter fix.
    #[must_use]
    pub fn fix_delimiter_bug(mut self) -> Self {
        self.fix_delimiter_bug = true;
        self
    }
}

/// Declared shape of a section type.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSchema {
    /// Section name as written after `START_SECTION`.
    pub name: &'static str,
    /// Whether a document may omit the section entirely.
    pub is_optional: bool,
    /// Whether a document may hold more than one instance.
    pub multiple_allowed: bool,
    /// Elements whose combined values distinguish instances.
    pub id_elements: Vec<&'static str>,
    /// Elements in declared order. Parsing matches lines against this order.
    pub elements: Vec<SchemaEntry>,
    /// Position of the section in the registry, assigned on registration.
    pub(crate) position: usize,
}

impl SectionSchema {
    /// A section every document must contain.
    #[must_use]
    pub fn required(name: &'static str) -> Self {
        Self::new(name, false)
    }

    /// A section a document may omit.
    #[must_use]
    pub fn optional(name: &'static str) -> Self {
        Self::new(name, true)
    }

    fn new(name: &'static str, is_optional: bool) -> Self {
        Self {
            name,
            is_optional,
            multiple_allowed: true,
            id_elements: Vec::new(),
            elements: Vec::new(),
            position: 0,
        }
    }

    /// Allow at most one instance per document.
    #[must_use]
    pub fn single(mut self) -> Self {
        self.multiple_allowed = false;
        self
    }

    /// Set the id elements.
    #[must_use]
    pub fn identified_by(mut self, names: impl IntoIterator<Item = &'static str>) -> Self {
        self.id_elements = names.into_iter().collect();
        self
    }

    /// Set the elements, in declared order.
    #[must_use]
    pub fn with_elements(mut self, elements: Vec<SchemaEntry>) -> Self {
        self.elements = elements;
        self
    }

    /// Look up an element schema by name.
    #[must_use]
    pub fn element(&self, name: &str) -> Option<&SchemaEntry> {
        self.elements.iter().find(|e| e.name == name)
    }

    /// Element names in declared order.
    pub fn element_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.elements.iter().map(|e| e.name)
    }

    /// Whether `name` is one of the id elements.
    #[must_use]
    pub fn is_id_element(&self, name: &str) -> bool {
        self.id_elements.iter().any(|id| *id == name)
    }

    /// Position of the section type in registry order.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_builder() {
        let entry = SchemaEntry::new("EDGE_EXCLUSION", 1, ScalarType::Float)
            .default(3.0)
            .range(0.0, 5.0);
        assert!(entry.is_optional);
        assert_eq!(entry.default, Some(vec![Scalar::Float(3.0)]));
        assert_eq!(
            entry.validator,
            Some(Validator::Range(Scalar::Float(0.0), Scalar::Float(5.0)))
        );
        assert!(!entry.fix_delimiter_bug);
    }

    #[test]
    fn test_section_builder() {
        let schema = SectionSchema::optional("ALIGNMENT_MARK")
            .identified_by(["MARK_ID"])
            .with_elements(vec![
                SchemaEntry::new("MARK_ID", 1, ScalarType::String).required(),
                SchemaEntry::new("MARK_LOCATION", 2, ScalarType::Float).required(),
            ]);
        assert!(schema.multiple_allowed);
        assert!(schema.is_id_element("MARK_ID"));
        assert!(!schema.is_id_element("MARK_LOCATION"));
        assert_eq!(
            schema.element_names().collect::<Vec<_>>(),
            vec!["MARK_ID", "MARK_LOCATION"]
        );
        assert!(schema.element("IMAGE_ID").is_none());
    }
}
