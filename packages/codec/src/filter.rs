//! Id-element predicates for selecting section instances.

use crate::error::{JobfileError, Result};
use crate::schema::SectionSchema;
use crate::section::Section;
use crate::types::{Scalar, Value};

/// Ordered list of `(id element, expected value)` pairs.
///
/// A section matches when every listed id element holds exactly the expected
/// value. The empty filter matches every instance.
///
/// ```
/// use jobfile_codec::IdFilter;
///
/// let filter = IdFilter::new().with("LAYER_ID", "L1").with("IMAGE_ID", "CHIP");
/// assert_eq!(filter.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IdFilter {
    criteria: Vec<(String, Vec<Scalar>)>,
}

impl IdFilter {
    /// Filter matching every instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a criterion. Single scalars are treated as one-value lists.
    #[must_use]
    pub fn with(mut self, element: impl Into<String>, value: impl Into<Value>) -> Self {
        self.criteria
            .push((element.into(), value.into().into_scalars()));
        self
    }

    /// Number of criteria.
    #[must_use]
    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    /// Whether the filter has no criteria.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    /// Criteria in insertion order.
    pub fn criteria(&self) -> impl Iterator<Item = (&str, &[Scalar])> {
        self.criteria
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_slice()))
    }

    /// Reject criteria naming elements that do not identify `schema`.
    pub fn check(&self, schema: &SectionSchema) -> Result<()> {
        match self
            .criteria
            .iter()
            .find(|(name, _)| !schema.is_id_element(name))
        {
            Some((name, _)) => Err(JobfileError::InvalidIdElement {
                section: schema.name.to_string(),
                element: name.clone(),
            }),
            None => Ok(()),
        }
    }

    /// Whether `section` satisfies every criterion.
    #[must_use]
    pub fn matches(&self, section: &Section) -> bool {
        self.criteria.iter().all(|(name, expected)| {
            matches!(section.get(name), Ok(Some(actual)) if actual == expected.as_slice())
        })
    }
}
