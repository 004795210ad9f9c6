//! Jobfile Codec
//!
//! Schema-driven reader and writer for the fixed-column ASCII jobfiles
//! consumed by PAS5500 wafer steppers. This library provides:
//! - An immutable schema registry of every section and element type
//! - Typed, validated elements and sections built on that schema
//! - Whole-document parsing, rendering, merging and completeness checks
//!
//! # Example
//!
//! ```
//! use jobfile_codec::{new_section, parse_document, render_document, Document};
//!
//! let mut general = new_section("GENERAL")?;
//! general.set("CELL_SIZE", vec![12.5, 12.5])?;
//!
//! let mut doc = Document::new();
//! assert!(doc.push(general));
//!
//! let text = render_document(&doc, true);
//! let parsed = parse_document(&text)?;
//! assert_eq!(render_document(&parsed, true), text);
//! # Ok::<(), jobfile_codec::JobfileError>(())
//! ```
//!
//! # Architecture
//!
//! - [`schema`]: Section and element definitions, and the registry
//! - [`element`]: Single typed field
//! - [`section`]: Named block of elements
//! - [`document`]: Ordered collection of sections
//! - [`filter`]: Id-element predicates for queries
//! - [`config`]: Layout constants of the text format
//! - [`error`]: Error types and Result alias

pub mod config;
pub mod document;
pub mod element;
pub mod error;
mod export;
pub mod filter;
pub mod references;
pub mod schema;
pub mod section;
pub mod summary;
pub mod types;

// Re-export commonly used items
pub use config::RenderOptions;
pub use document::Document;
pub use element::Element;
pub use error::{JobfileError, Result};
pub use filter::IdFilter;
pub use references::DanglingReference;
pub use schema::{registry, SchemaEntry, SchemaRegistry, SectionSchema};
pub use section::Section;
pub use summary::{ImageDistribution, JobSummary, SectionCount};
pub use types::{Scalar, ScalarType, Validator, Value};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parse jobfile text into a document.
pub fn parse_document(text: &str) -> Result<Document> {
    Document::parse(text)
}

/// Render a document as jobfile text.
#[must_use]
pub fn render_document(document: &Document, fix_delimiters: bool) -> String {
    document.render(fix_delimiters)
}

/// Create a section of type `name` with schema defaults applied.
pub fn new_section(name: &str) -> Result<Section> {
    Section::new(name)
}
