//! Document: every section instance of one jobfile, grouped by section type.
//!
//! Sections are kept in registry order between types and insertion order
//! within a type, which is also the order they render in.

use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::config::{RenderOptions, SECTION_END};
use crate::error::{JobfileError, Result};
use crate::filter::IdFilter;
use crate::schema::registry;
use crate::section::Section;

#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static SECTION_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^START_SECTION\s+(\S+)\s*$").expect("valid regex"));

/// An ordered collection of section instances.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    /// One list per registry section, indexed by schema position.
    sections: Vec<Vec<Section>>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create a document with no sections.
    #[must_use]
    pub fn new() -> Self {
        Self {
            sections: vec![Vec::new(); registry().len()],
        }
    }

    /// Add a section.
    ///
    /// With `check_interference`, the section is rejected when it interferes
    /// with an instance already present; the document is then unchanged and
    /// `false` is returned.
    pub fn append(&mut self, section: Section, check_interference: bool) -> bool {
        let slot = &mut self.sections[section.schema().position()];
        if check_interference && slot.iter().any(|s| Section::interferes(s, &section)) {
            return false;
        }
        slot.push(section);
        true
    }

    /// Add a section, rejecting it on interference.
    pub fn push(&mut self, section: Section) -> bool {
        self.append(section, true)
    }

    /// All instances of a section type, in insertion order.
    pub fn sections(&self, name: &str) -> Result<&[Section]> {
        let position = registry().lookup_section(name)?.position();
        Ok(&self.sections[position])
    }

    /// Every section, in render order.
    pub fn iter(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter().flatten()
    }

    /// Total number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    /// Whether the document holds no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Instances of `name` whose id elements match `filter`.
    ///
    /// # Errors
    /// `UnknownSection`, or `InvalidIdElement` when the filter names an
    /// element that does not identify `name`.
    pub fn query(&self, name: &str, filter: &IdFilter) -> Result<Vec<&Section>> {
        let schema = registry().lookup_section(name)?;
        filter.check(schema)?;
        Ok(self.sections[schema.position()]
            .iter()
            .filter(|s| filter.matches(s))
            .collect())
    }

    /// Remove every instance of `name` matching `filter`.
    ///
    /// Returns the number of removed sections.
    pub fn remove(&mut self, name: &str, filter: &IdFilter) -> Result<usize> {
        let schema = registry().lookup_section(name)?;
        filter.check(schema)?;
        let slot = &mut self.sections[schema.position()];
        let before = slot.len();
        slot.retain(|s| !filter.matches(s));
        Ok(before - slot.len())
    }

    /// Combine two documents.
    ///
    /// Starts from a copy of `base` and adds every section of `incoming`
    /// that does not interfere with what is already there. On conflict the
    /// `base` instance wins, so the operation is not commutative.
    #[must_use]
    pub fn merge(base: &Document, incoming: &Document) -> Document {
        let mut merged = base.clone();
        for section in incoming.iter() {
            if !merged.append(section.clone(), true) {
                tracing::debug!(
                    section = section.name(),
                    ids = ?section.id_values(),
                    "Dropped interfering section during merge"
                );
            }
        }
        merged
    }

    /// Whether the document can be handed to the equipment.
    ///
    /// # Returns
    /// * `Ok(true)` - every required section type is present and every
    ///   instance is complete
    /// * `Ok(false)` - a required section is missing or an instance is
    ///   incomplete
    ///
    /// # Errors
    /// `MultiplicityViolation` when a single-instance section type occurs
    /// more than once. This is checked first, for every section type.
    pub fn is_adequately_specified(&self) -> Result<bool> {
        for schema in registry().sections() {
            let count = self.sections[schema.position()].len();
            if !schema.multiple_allowed && count > 1 {
                return Err(JobfileError::MultiplicityViolation {
                    section: schema.name.to_string(),
                    count,
                });
            }
        }

        for schema in registry().sections() {
            let instances = &self.sections[schema.position()];
            if !schema.is_optional && instances.is_empty() {
                tracing::debug!(section = schema.name, "Required section missing");
                return Ok(false);
            }
            if let Some(incomplete) = instances.iter().find(|s| !s.is_complete()) {
                tracing::debug!(
                    section = incomplete.name(),
                    ids = ?incomplete.id_values(),
                    "Section is incomplete"
                );
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Render the document as jobfile text.
    ///
    /// Blocks are separated by exactly one blank line; there is no trailing
    /// newline. With `fix_delimiters`, the angle-bracket artifact is removed
    /// from the output without touching `self`.
    #[must_use]
    pub fn render(&self, fix_delimiters: bool) -> String {
        let blocks: Vec<String> = self
            .iter()
            .map(|section| {
                if fix_delimiters {
                    let mut fixed = section.clone();
                    fixed.fix_delimiter_artifact();
                    fixed.render()
                } else {
                    section.render()
                }
            })
            .collect();
        blocks.join("\n\n")
    }

    /// Render with explicit options.
    #[must_use]
    pub fn render_with(&self, options: &RenderOptions) -> String {
        self.render(options.fix_delimiter_bug)
    }

    /// Apply the delimiter fix to every section in place.
    pub fn fix_delimiter_artifacts(&mut self) {
        for section in self.sections.iter_mut().flatten() {
            section.fix_delimiter_artifact();
        }
    }

    /// Parse a whole jobfile.
    ///
    /// Blocks may appear in any order. Sections are appended without
    /// interference checking, so conflicting blocks in the text are kept.
    /// Any error aborts the parse; no partial document is returned.
    pub fn parse(text: &str) -> Result<Document> {
        let mut document = Document::new();
        let mut open: Option<(String, usize, Vec<&str>)> = None;

        for (index, line) in text.lines().enumerate() {
            let number = index + 1;
            let trimmed = line.trim_end();

            if let Some(caps) = SECTION_OPEN.captures(trimmed) {
                if let Some((name, start, _)) = &open {
                    return Err(JobfileError::UnmatchedDelimiter {
                        line: number,
                        detail: format!("section {name} opened at line {start} is not closed"),
                    });
                }
                open = Some((caps[1].to_string(), number, Vec::new()));
            } else if trimmed == SECTION_END {
                let Some((name, start, body)) = open.take() else {
                    return Err(JobfileError::UnmatchedDelimiter {
                        line: number,
                        detail: format!("{SECTION_END} without matching start"),
                    });
                };
                let section = Section::parse_lines(&name, &body)?;
                tracing::debug!(section = %name, start, lines = body.len(), "Parsed section");
                document.append(section, false);
            } else if let Some((_, _, body)) = &mut open {
                body.push(line);
            }
        }

        if let Some((name, start, _)) = open {
            return Err(JobfileError::UnmatchedDelimiter {
                line: start,
                detail: format!("section {name} is never closed"),
            });
        }

        tracing::debug!(sections = document.len(), "Parsed document");
        Ok(document)
    }
}

impl FromStr for Document {
    type Err = JobfileError;

    fn from_str(s: &str) -> Result<Self> {
        Document::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::element_prefix;
    use crate::types::Scalar;

    fn mark(id: &str, x: f64) -> Section {
        let mut s = Section::new("ALIGNMENT_MARK").unwrap();
        s.set("MARK_ID", id).unwrap();
        s.set("MARK_LOCATION", vec![x, 0.0]).unwrap();
        s
    }

    fn minimal() -> Document {
        let mut doc = Document::new();
        assert!(doc.push(Section::new("GENERAL").unwrap()));

        let mut image = Section::new("IMAGE_DEFINITION").unwrap();
        image.set("IMAGE_ID", "CHIP").unwrap();
        image.set("IMAGE_SIZE", vec![5.0, 5.0]).unwrap();
        assert!(doc.push(image));

        let mut layer = Section::new("LAYER_DEFINITION").unwrap();
        layer.set("LAYER_NO", 1).unwrap();
        layer.set("LAYER_ID", "L1").unwrap();
        assert!(doc.push(layer));
        doc
    }

    #[test]
    fn test_new_document_is_empty() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.len(), 0);
        assert!(doc.sections("GENERAL").unwrap().is_empty());
        assert_eq!(doc.render(true), "");
    }

    #[test]
    fn test_sections_unknown_name() {
        let doc = Document::new();
        assert!(doc.sections("WAFER_MAP").unwrap_err().is_schema_error());
    }

    #[test]
    fn test_single_instance_section_rejects_second() {
        let mut doc = Document::new();
        assert!(doc.append(Section::new("GENERAL").unwrap(), true));
        let mut other = Section::new("GENERAL").unwrap();
        other.set("EDGE_EXCLUSION", 1.0).unwrap();
        assert!(!doc.append(other, true));
        assert_eq!(doc.sections("GENERAL").unwrap().len(), 1);
    }

    #[test]
    fn test_alignment_marks_interfere_on_duplicate_id() {
        let mut doc = Document::new();
        assert!(doc.push(mark("M1", 1.0)));
        assert!(doc.push(mark("M2", 2.0)));
        assert!(!doc.push(mark("M1", 3.0)));
        assert!(doc.push(mark("M3", 1.0)));
        assert_eq!(doc.sections("ALIGNMENT_MARK").unwrap().len(), 3);
    }

    #[test]
    fn test_append_unchecked_keeps_conflicts() {
        let mut doc = Document::new();
        assert!(doc.append(mark("M1", 1.0), false));
        assert!(doc.append(mark("M1", 2.0), false));
        assert_eq!(doc.len(), 2);
    }

    #[test]
    fn test_adequately_specified() {
        let doc = minimal();
        assert!(doc.is_adequately_specified().unwrap());
    }

    #[test]
    fn test_missing_required_sections_is_inadequate() {
        let mut doc = Document::new();
        assert!(doc.push(mark("M1", 1.0)));
        assert!(!doc.is_adequately_specified().unwrap());
    }

    #[test]
    fn test_incomplete_section_is_inadequate() {
        let mut doc = minimal();
        doc.append(Section::new("ALIGNMENT_MARK").unwrap(), true);
        assert!(!doc.is_adequately_specified().unwrap());
    }

    #[test]
    fn test_multiplicity_violation_is_error() {
        let mut doc = minimal();
        doc.append(Section::new("GENERAL").unwrap(), false);
        let err = doc.is_adequately_specified().unwrap_err();
        assert!(matches!(
            err,
            JobfileError::MultiplicityViolation { ref section, count: 2 } if section == "GENERAL"
        ));
    }

    #[test]
    fn test_multiplicity_checked_before_presence() {
        // GENERAL is duplicated and IMAGE_DEFINITION missing: the breach wins
        let mut doc = Document::new();
        doc.append(Section::new("GENERAL").unwrap(), false);
        doc.append(Section::new("GENERAL").unwrap(), false);
        assert!(doc.is_adequately_specified().is_err());
    }

    #[test]
    fn test_query_by_id() {
        let mut doc = Document::new();
        doc.push(mark("M1", 1.0));
        doc.push(mark("M2", 2.0));

        let all = doc.query("ALIGNMENT_MARK", &IdFilter::new()).unwrap();
        assert_eq!(all.len(), 2);

        let found = doc
            .query("ALIGNMENT_MARK", &IdFilter::new().with("MARK_ID", "M2"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(
            found[0].get("MARK_LOCATION").unwrap(),
            Some(&[Scalar::Float(2.0), Scalar::Float(0.0)][..])
        );
    }

    #[test]
    fn test_query_rejects_non_id_element() {
        let doc = Document::new();
        let err = doc
            .query("ALIGNMENT_MARK", &IdFilter::new().with("WAFER_SIDE", "A"))
            .unwrap_err();
        assert!(matches!(err, JobfileError::InvalidIdElement { .. }));
    }

    #[test]
    fn test_remove_returns_count() {
        let mut doc = Document::new();
        doc.push(mark("M1", 1.0));
        doc.push(mark("M2", 2.0));
        let removed = doc
            .remove("ALIGNMENT_MARK", &IdFilter::new().with("MARK_ID", "M1"))
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc.remove("ALIGNMENT_MARK", &IdFilter::new().with("MARK_ID", "M9"))
                .unwrap(),
            0
        );
    }

    #[test]
    fn test_merge_keeps_base_on_conflict() {
        let mut a = Document::new();
        a.push(mark("M1", 1.0));
        let mut b = Document::new();
        b.push(mark("M1", 9.0));
        b.push(mark("M2", 2.0));

        let merged = Document::merge(&a, &b);
        let marks = merged.sections("ALIGNMENT_MARK").unwrap();
        assert_eq!(marks.len(), 2);
        assert_eq!(
            marks[0].get("MARK_LOCATION").unwrap(),
            Some(&[Scalar::Float(1.0), Scalar::Float(0.0)][..])
        );

        let reversed = Document::merge(&b, &a);
        let marks = reversed.sections("ALIGNMENT_MARK").unwrap();
        assert_eq!(
            marks[0].get("MARK_LOCATION").unwrap(),
            Some(&[Scalar::Float(9.0), Scalar::Float(0.0)][..])
        );
    }

    #[test]
    fn test_merge_does_not_touch_inputs() {
        let a = minimal();
        let b = minimal();
        let merged = Document::merge(&a, &b);
        assert_eq!(merged, a);
        assert_eq!(a.len(), 3);
    }

    #[test]
    fn test_render_uses_registry_order() {
        let mut doc = Document::new();
        let mut layer = Section::new("LAYER_DEFINITION").unwrap();
        layer.set("LAYER_NO", 2).unwrap();
        doc.push(layer);
        doc.push(Section::new("GENERAL").unwrap());

        let text = doc.render(false);
        assert!(text.starts_with("START_SECTION GENERAL\n"));
        assert!(text.contains("END_SECTION\n\nSTART_SECTION LAYER_DEFINITION\n"));
        assert!(text.ends_with("END_SECTION"));
    }

    #[test]
    fn test_render_fix_leaves_document_untouched() {
        let mut doc = Document::new();
        let mut instance = Section::new("INSTANCE_DEFINITION").unwrap();
        instance.set("INSTANCE_ID", "<Default>").unwrap();
        doc.push(instance);

        assert!(doc.render(true).contains("\"Default\""));
        assert!(doc.render(false).contains("\"<Default>\""));

        doc.fix_delimiter_artifacts();
        assert!(doc.render(false).contains("\"Default\""));
    }

    #[test]
    fn test_roundtrip() {
        let mut doc = minimal();
        doc.push(mark("M1", 1.0));
        doc.push(mark("M2", -2.5));

        let text = doc.render(false);
        let parsed = Document::parse(&text).unwrap();
        assert_eq!(parsed.render(false), text);
        assert_eq!(parsed.len(), doc.len());
    }

    #[test]
    fn test_parse_keeps_conflicting_sections() {
        let block = format!(
            "START_SECTION ALIGNMENT_MARK\n{}\"M1\"\n{}1.000000 2.000000\nEND_SECTION",
            element_prefix("MARK_ID"),
            element_prefix("MARK_LOCATION")
        );
        let text = format!("{block}\n\n{block}");
        let doc: Document = text.parse().unwrap();
        assert_eq!(doc.sections("ALIGNMENT_MARK").unwrap().len(), 2);
    }

    #[test]
    fn test_parse_ignores_text_outside_blocks() {
        let text = format!(
            "header junk\nSTART_SECTION INSTANCE_DEFINITION\n{}\"A\"\nEND_SECTION\ntrailer",
            element_prefix("INSTANCE_ID")
        );
        let doc = Document::parse(&text).unwrap();
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_parse_unmatched_delimiters() {
        let err = Document::parse("START_SECTION GENERAL\nSTART_SECTION GENERAL\nEND_SECTION")
            .unwrap_err();
        assert!(matches!(err, JobfileError::UnmatchedDelimiter { line: 2, .. }));

        let err = Document::parse("END_SECTION").unwrap_err();
        assert!(matches!(err, JobfileError::UnmatchedDelimiter { line: 1, .. }));

        let err = Document::parse("\nSTART_SECTION GENERAL").unwrap_err();
        assert!(matches!(err, JobfileError::UnmatchedDelimiter { line: 2, .. }));
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_parse_rejects_value_that_would_not_render() {
        let text = format!(
            "START_SECTION STRATEGY_SELECTION\n{}\"L1\"\n{}\"S1\"\n{}\"X\"\nEND_SECTION",
            element_prefix("LAYER_ID"),
            element_prefix("STRATEGY_ID"),
            element_prefix("STRATEGY_USAGE")
        );
        let err = Document::parse(&text).unwrap_err();
        assert!(err.is_parse_error());

        let valid = text.replace("\"X\"", "\"A\"");
        let doc = Document::parse(&valid).unwrap();
        assert_eq!(Document::parse(&doc.render(false)).unwrap(), doc);
    }

    #[test]
    fn test_parse_unknown_section_fails() {
        let err = Document::parse("START_SECTION WAFER_MAP\nEND_SECTION").unwrap_err();
        assert!(matches!(err, JobfileError::UnknownSection(_)));
    }

    #[test]
    fn test_parse_bad_body_fails_whole_document() {
        let text = format!(
            "START_SECTION INSTANCE_DEFINITION\n{}\"A\"\nEND_SECTION\n\nSTART_SECTION GENERAL\n{}1.000000\nEND_SECTION",
            element_prefix("INSTANCE_ID"),
            element_prefix("CELL_SIZE")
        );
        let err = Document::parse(&text).unwrap_err();
        assert!(err.is_structural_error());
        assert!(err.to_string().starts_with("In section GENERAL: "));
    }
}
