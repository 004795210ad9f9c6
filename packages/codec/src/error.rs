//! Error types for the jobfile codec

use thiserror::Error;

/// Main error type for codec operations
///
/// Constraint (list/range) failures are not errors: setters report them
/// as `Ok(false)`.
#[derive(Error, Debug)]
pub enum JobfileError {
    /// Section name not present in the schema registry
    #[error("Unknown section: {0}")]
    UnknownSection(String),

    /// Element name not declared for the section type
    #[error("Unknown element {element} in section {section}")]
    UnknownElement { section: String, element: String },

    /// Query filter names an element that does not identify the section type
    #[error("{element} is not an id element of section {section}")]
    InvalidIdElement { section: String, element: String },

    /// Wrong number of values for an element
    #[error("{element} expects {expected} value(s), got {actual}")]
    ArityMismatch {
        element: String,
        expected: usize,
        actual: usize,
    },

    /// Value of the wrong scalar type for an element
    #[error("{element} expects {expected}, got {actual}")]
    TypeMismatch {
        element: String,
        expected: String,
        actual: String,
    },

    /// Required element missing from a section body
    #[error("Required element {element} not found in section {section}")]
    MissingElement { section: String, element: String },

    /// Section body lines left over after matching every schema element
    #[error("Unread lines in section {section}, starting at: {line:?}")]
    UnreadLines { section: String, line: String },

    /// Value text that cannot be read as the element's scalar type
    #[error("Malformed value for {element}: {text:?}")]
    MalformedValue { element: String, text: String },

    /// Parsed value fails its list/range constraint and the element has no
    /// default to fall back on
    #[error("Value for {element} is not allowed: {text:?}")]
    RejectedValue { element: String, text: String },

    /// START_SECTION / END_SECTION markers that do not pair up
    #[error("Unmatched section delimiter at line {line}: {detail}")]
    UnmatchedDelimiter { line: usize, detail: String },

    /// Error raised while reading a specific section body
    #[error("In section {section}: {source}")]
    InSection {
        section: String,
        #[source]
        source: Box<JobfileError>,
    },

    /// More instances of a single-instance section than allowed
    #[error("Job can only have one {section} section, found {count}")]
    MultiplicityViolation { section: String, count: usize },
}

impl JobfileError {
    /// Unknown section or element names.
    #[must_use]
    pub fn is_schema_error(&self) -> bool {
        match self {
            Self::UnknownSection(_) | Self::UnknownElement { .. } | Self::InvalidIdElement { .. } => {
                true
            }
            Self::InSection { source, .. } => source.is_schema_error(),
            _ => false,
        }
    }

    /// Arity and scalar type mismatches.
    #[must_use]
    pub fn is_structural_error(&self) -> bool {
        match self {
            Self::ArityMismatch { .. } | Self::TypeMismatch { .. } => true,
            Self::InSection { source, .. } => source.is_structural_error(),
            _ => false,
        }
    }

    /// Failures of the text grammar itself.
    #[must_use]
    pub fn is_parse_error(&self) -> bool {
        match self {
            Self::MissingElement { .. }
            | Self::UnreadLines { .. }
            | Self::MalformedValue { .. }
            | Self::RejectedValue { .. }
            | Self::UnmatchedDelimiter { .. } => true,
            Self::InSection { source, .. } => source.is_parse_error(),
            _ => false,
        }
    }

    pub(crate) fn in_section(self, section: &str) -> Self {
        match self {
            // Already carries its section
            Self::MissingElement { .. } | Self::UnreadLines { .. } | Self::InSection { .. } => self,
            other => Self::InSection {
                section: section.to_string(),
                source: Box::new(other),
            },
        }
    }
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, JobfileError>;
