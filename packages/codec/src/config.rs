//! Layout constants for the ASCII jobfile format
//!
//! The consuming equipment reads jobfiles positionally, so these values are
//! part of the format rather than tunables:
//! - element lines start with a fixed indent
//! - values start at a fixed alignment column
//! - floats carry a fixed number of decimals

/// Indentation of element lines, in spaces.
pub const ELEMENT_INDENT: usize = 3;

/// Column (measured from line start) at which element values begin.
///
/// Continuation lines of multiline elements are left-padded with this many
/// blanks.
pub const ELEMENT_ALIGN: usize = 49;

/// Digits written after the decimal point of float values.
pub const FLOAT_PRECISION: usize = 6;

/// Keyword opening a section block.
pub const SECTION_START: &str = "START_SECTION";

/// Keyword closing a section block.
pub const SECTION_END: &str = "END_SECTION";

/// Exact text an element line starts with: indent, name, padding up to
/// [`ELEMENT_ALIGN`].
///
/// Names longer than the padding width are written without padding.
#[must_use]
pub fn element_prefix(name: &str) -> String {
    format!(
        "{indent}{name:<width$}",
        indent = " ".repeat(ELEMENT_INDENT),
        width = ELEMENT_ALIGN - ELEMENT_INDENT
    )
}

/// Blank padding that starts every continuation line of a multiline element.
#[must_use]
pub fn continuation_prefix() -> String {
    " ".repeat(ELEMENT_ALIGN)
}

/// Options for rendering a whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Strip the stray angle brackets the vendor converter wraps around
    /// some instance ids before writing.
    pub fix_delimiter_bug: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fix_delimiter_bug: true,
        }
    }
}
