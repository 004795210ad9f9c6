//! Structured view of a document for JSON and other serde formats.
//!
//! A document serializes as a list of sections in render order:
//!
//! ```json
//! [{ "section": "GENERAL", "elements": { "CELL_SIZE": [10.0, 10.0] } }]
//! ```
//!
//! Unset elements are left out.

use serde::ser::{Serialize, SerializeMap, SerializeSeq, SerializeStruct, Serializer};

use crate::document::Document;
use crate::section::Section;

struct Elements<'a>(&'a Section);

impl Serialize for Elements<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let set: Vec<_> = self
            .0
            .elements()
            .filter_map(|e| e.get().map(|v| (e.name(), v)))
            .collect();
        let mut map = serializer.serialize_map(Some(set.len()))?;
        for (name, value) in set {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl Serialize for Section {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Section", 2)?;
        state.serialize_field("section", self.name())?;
        state.serialize_field("elements", &Elements(self))?;
        state.end()
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for section in self.iter() {
            seq.serialize_element(section)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_section_json_keeps_declared_order() {
        let mut s = Section::new("ALIGNMENT_MARK").unwrap();
        s.set("MARK_ID", "M1").unwrap();
        s.set("MARK_LOCATION", vec![1.5, -2.0]).unwrap();

        let text = serde_json::to_string(&s).unwrap();
        assert_eq!(
            text,
            r#"{"section":"ALIGNMENT_MARK","elements":{"MARK_ID":["M1"],"MARK_EDGE_CLEARANCE":["L"],"WAFER_SIDE":["A"],"MARK_LOCATION":[1.5,-2.0]}}"#
        );
    }

    #[test]
    fn test_document_json_is_ordered_list() {
        let mut doc = Document::new();
        let mut layer = Section::new("LAYER_DEFINITION").unwrap();
        layer.set("LAYER_NO", 3).unwrap();
        doc.push(layer);
        let mut instance = Section::new("INSTANCE_DEFINITION").unwrap();
        instance.set("INSTANCE_ID", "X").unwrap();
        doc.push(instance);

        let value = serde_json::to_value(&doc).unwrap();
        assert_eq!(
            value,
            json!([
                { "section": "INSTANCE_DEFINITION", "elements": { "INSTANCE_ID": ["X"] } },
                { "section": "LAYER_DEFINITION", "elements": { "LAYER_NO": [3], "WAFER_SIDE": ["A"] } }
            ])
        );
    }
}
