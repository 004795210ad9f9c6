//! Compact overview of a jobfile's contents.

use serde::Serialize;
use std::fmt;

use crate::document::Document;
use crate::schema::registry;
use crate::types::Scalar;

/// Instance count of one section type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionCount {
    pub section: &'static str,
    pub count: usize,
}

/// Number of distribution entries placing one image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageDistribution {
    pub image_id: String,
    pub count: usize,
}

/// Counts describing a job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JobSummary {
    /// Every section type present, in registry order.
    pub sections: Vec<SectionCount>,
    pub images: usize,
    pub instances: usize,
    pub layers: usize,
    /// Distribution entries grouped by image id, in first-seen order.
    pub distributions: Vec<ImageDistribution>,
}

impl Document {
    /// Summarise the document.
    #[must_use]
    pub fn summary(&self) -> JobSummary {
        let count = |name: &str| self.sections(name).map_or(0, <[_]>::len);

        let sections = registry()
            .section_names()
            .map(|section| SectionCount {
                section,
                count: count(section),
            })
            .filter(|c| c.count > 0)
            .collect();

        let mut distributions: Vec<ImageDistribution> = Vec::new();
        for section in self.sections("IMAGE_DISTRIBUTION").unwrap_or_default() {
            let image_id = match section.get("IMAGE_ID") {
                Ok(Some([Scalar::Text(id)])) => id.clone(),
                _ => continue,
            };
            match distributions.iter_mut().find(|d| d.image_id == image_id) {
                Some(entry) => entry.count += 1,
                None => distributions.push(ImageDistribution { image_id, count: 1 }),
            }
        }

        JobSummary {
            sections,
            images: count("IMAGE_DEFINITION"),
            instances: count("INSTANCE_DEFINITION"),
            layers: count("LAYER_DEFINITION"),
            distributions,
        }
    }
}

impl fmt::Display for JobSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Images:    {}", self.images)?;
        writeln!(f, "Instances: {}", self.instances)?;
        writeln!(f, "Layers:    {}", self.layers)?;
        for d in &self.distributions {
            writeln!(f, "  {} distributed {} time(s)", d.image_id, d.count)?;
        }
        writeln!(f, "Sections:")?;
        for c in &self.sections {
            writeln!(f, "  {:<24}{}", c.section, c.count)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::section::Section;

    fn distribution(image: &str, cell: &str) -> Section {
        let mut s = Section::new("IMAGE_DISTRIBUTION").unwrap();
        s.set("IMAGE_ID", image).unwrap();
        s.set("CELL_SELECTION", vec![cell, "0"]).unwrap();
        s
    }

    #[test]
    fn test_empty_document() {
        let summary = Document::new().summary();
        assert!(summary.sections.is_empty());
        assert_eq!(summary.images, 0);
        assert!(summary.distributions.is_empty());
    }

    #[test]
    fn test_counts_and_distributions() {
        let mut doc = Document::new();
        doc.push(Section::new("GENERAL").unwrap());
        doc.push(distribution("A", "0"));
        doc.push(distribution("B", "0"));
        doc.push(distribution("A", "1"));

        let summary = doc.summary();
        assert_eq!(
            summary.sections,
            vec![
                SectionCount {
                    section: "GENERAL",
                    count: 1
                },
                SectionCount {
                    section: "IMAGE_DISTRIBUTION",
                    count: 3
                },
            ]
        );
        assert_eq!(
            summary.distributions,
            vec![
                ImageDistribution {
                    image_id: "A".into(),
                    count: 2
                },
                ImageDistribution {
                    image_id: "B".into(),
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn test_display_lists_sections() {
        let mut doc = Document::new();
        doc.push(Section::new("GENERAL").unwrap());
        let text = doc.summary().to_string();
        assert!(text.contains("Images:    0"));
        assert!(text.contains("GENERAL"));
    }
}
