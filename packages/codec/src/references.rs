//! Cross-reference report over `defined_in` tags.
//!
//! Elements such as `MARK_ALIGNMENT.MARK_ID` name a value that should be
//! defined by another section type (`ALIGNMENT_MARK`). Parsing never enforces
//! this; the report lists the references that point nowhere.

use serde::Serialize;

use crate::document::Document;
use crate::types::Scalar;

/// A value whose defining section is missing from the document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DanglingReference {
    /// Section holding the reference.
    pub section: &'static str,
    /// Referring element, also the element looked up in `defined_in`.
    pub element: &'static str,
    /// Section type expected to define the value.
    pub defined_in: &'static str,
    /// The unresolved value.
    pub value: Vec<Scalar>,
}

impl Document {
    /// List every reference whose value is not defined by any instance of
    /// the referenced section type. Order follows render order.
    #[must_use]
    pub fn dangling_references(&self) -> Vec<DanglingReference> {
        let mut dangling = Vec::new();
        for section in self.iter() {
            for element in section.elements() {
                let (Some(target), Some(value)) = (element.schema().defined_in, element.get())
                else {
                    continue;
                };
                if !self.defines(target, element.name(), value) {
                    dangling.push(DanglingReference {
                        section: section.name(),
                        element: element.name(),
                        defined_in: target,
                        value: value.to_vec(),
                    });
                }
            }
        }
        dangling
    }

    fn defines(&self, section: &str, element: &str, value: &[Scalar]) -> bool {
        self.sections(section)
            .map(|instances| {
                instances
                    .iter()
                    .any(|s| matches!(s.get(element), Ok(Some(v)) if v == value))
            })
            .unwrap_or(false)
    }
}
