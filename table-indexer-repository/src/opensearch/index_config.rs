//! OpenSearch index creation bodies.
//!
//! Renders an `IndexDescriptor` as the settings and mappings document sent
//! with an index creation request.

use serde_json::{json, Value};

use crate::mapping::IndexDescriptor;

/// Get the creation body for an index.
///
/// Indexes are typeless: the field mapping goes directly under
/// `mappings.properties`.
///
/// # Example output
///
/// ```text
/// {
///   "settings": { "number_of_shards": 1, "number_of_replicas": 0 },
///   "mappings": { "properties": { "age": { "type": "integer" } } }
/// }
/// ```
pub fn creation_body(descriptor: &IndexDescriptor) -> Value {
    json!({
        "settings": {
            "number_of_shards": descriptor.settings.shards,
            "number_of_replicas": descriptor.settings.replicas
        },
        "mappings": {
            "properties": descriptor.mapping.to_properties()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::{FieldMapping, FieldType, IndexSettings};

    #[test]
    fn test_creation_body_structure() {
        let mapping: FieldMapping = vec![
            ("age", FieldType::Integer),
            ("name", FieldType::Keyword),
            ("joined", FieldType::Date),
        ]
        .into_iter()
        .collect();
        let descriptor = IndexDescriptor::new(mapping, IndexSettings { shards: 3, replicas: 2 });

        let body = creation_body(&descriptor);

        assert_eq!(body["settings"]["number_of_shards"], 3);
        assert_eq!(body["settings"]["number_of_replicas"], 2);
        assert_eq!(body["mappings"]["properties"]["age"]["type"], "integer");
        assert_eq!(body["mappings"]["properties"]["name"]["type"], "keyword");
        assert_eq!(body["mappings"]["properties"]["joined"]["type"], "date");
        assert_eq!(
            body["mappings"]["properties"].as_object().map(|p| p.len()),
            Some(3)
        );
    }

    #[test]
    fn test_creation_body_default_settings() {
        let mapping: FieldMapping = vec![("text", FieldType::Text)].into_iter().collect();
        let body = creation_body(&IndexDescriptor::new(mapping, IndexSettings::default()));

        assert_eq!(body["settings"]["number_of_shards"], 1);
        assert_eq!(body["settings"]["number_of_replicas"], 0);
    }
}
