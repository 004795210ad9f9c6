//! Schema registry describing every legal section and element.
//!
//! The registry is pure data: section schemas in declared order, each with
//! its elements in declared order. It is built once and only read after.

mod core;
mod definitions;
mod types;

pub use self::core::{registry, SchemaRegistry};
pub use definitions::create_jobfile_registry;
pub use types::{SchemaEntry, SectionSchema};
