//! Schema mapping: from dataset column types to search field types.
//!
//! The mapping decides how each column is indexed. Aggregator columns (the
//! ones used for grouping and exact-match filtering) are always stored as
//! `keyword`; every other column is mapped from its declared type.

use std::fmt;

use serde::Serialize;
use serde_json::{json, Map, Value as JsonValue};
use tracing::{debug, info};

use crate::errors::IndexAdapterError;
use table_indexer_shared::{Column, ColumnType, Dataset};

/// Search engine field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Integer,
    Float,
    Boolean,
    Date,
    /// Exact-match, aggregatable string.
    Keyword,
    /// Full-text analyzed string.
    Text,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Integer => "integer",
            FieldType::Float => "float",
            FieldType::Boolean => "boolean",
            FieldType::Date => "date",
            FieldType::Keyword => "keyword",
            FieldType::Text => "text",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered column name → field type mapping, one entry per column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMapping {
    fields: Vec<(String, FieldType)>,
}

impl FieldMapping {
    pub fn get(&self, name: &str) -> Option<FieldType> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, t)| *t)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldType)> {
        self.fields.iter().map(|(k, t)| (k.as_str(), *t))
    }

    /// Render as the `properties` object of an index mapping:
    /// `{"col": {"type": "integer"}, ...}`.
    pub fn to_properties(&self) -> JsonValue {
        let properties: Map<String, JsonValue> = self
            .fields
            .iter()
            .map(|(name, field_type)| (name.clone(), json!({ "type": field_type })))
            .collect();
        JsonValue::Object(properties)
    }
}

/// Human-readable form: `age: integer, name: keyword`.
impl fmt::Display for FieldMapping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (name, field_type)) in self.fields.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {}", name, field_type)?;
        }
        Ok(())
    }
}

impl<K: Into<String>> FromIterator<(K, FieldType)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (K, FieldType)>>(iter: I) -> Self {
        let mut fields: Vec<(String, FieldType)> = Vec::new();
        for (name, field_type) in iter {
            let name = name.into();
            match fields.iter_mut().find(|(k, _)| *k == name) {
                Some((_, slot)) => *slot = field_type,
                None => fields.push((name, field_type)),
            }
        }
        Self { fields }
    }
}

/// Shard and replica counts for a new index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexSettings {
    pub shards: u32,
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            shards: 1,
            replicas: 0,
        }
    }
}

/// Everything needed to create an index: its settings and field mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexDescriptor {
    pub settings: IndexSettings,
    pub mapping: FieldMapping,
}

impl IndexDescriptor {
    pub fn new(mapping: FieldMapping, settings: IndexSettings) -> Self {
        Self { settings, mapping }
    }
}

/// Field type for one column.
///
/// Aggregator membership is checked before the declared type, so an integer
/// aggregator column still becomes `keyword`.
pub fn field_type_for<S: AsRef<str>>(column: &Column, aggregators: &[S]) -> FieldType {
    if aggregators.iter().any(|a| a.as_ref() == column.name) {
        return FieldType::Keyword;
    }

    match column.dtype {
        ColumnType::Int64 | ColumnType::Int8 => FieldType::Integer,
        ColumnType::Float32 | ColumnType::Float64 => FieldType::Float,
        ColumnType::Bool => FieldType::Boolean,
        ColumnType::DateTime => FieldType::Date,
        ColumnType::Object | ColumnType::Other(_) => FieldType::Text,
    }
}

/// Derive a field mapping and index settings from a dataset.
///
/// # Arguments
///
/// * `dataset` - Source table; only its columns are read
/// * `aggregators` - Column names to store as `keyword`; unknown names are ignored
/// * `shards` - Number of primary shards
/// * `replicas` - Number of replicas per shard
///
/// # Returns
///
/// * `Ok((FieldMapping, IndexSettings))` - One mapping entry per column
/// * `Err(IndexAdapterError::ValidationError)` - If the dataset has no columns
pub fn derive_mapping<S: AsRef<str>>(
    dataset: &Dataset,
    aggregators: &[S],
    shards: u32,
    replicas: u32,
) -> Result<(FieldMapping, IndexSettings), IndexAdapterError> {
    if dataset.column_count() == 0 {
        return Err(IndexAdapterError::validation(
            "Cannot derive a mapping from a dataset without columns",
        ));
    }

    let mapping: FieldMapping = dataset
        .columns()
        .iter()
        .map(|column| {
            let field_type = field_type_for(column, aggregators);
            debug!(
                column = %column.name,
                dtype = %column.dtype,
                field_type = %field_type,
                "Mapped column"
            );
            (column.name.clone(), field_type)
        })
        .collect();

    let settings = IndexSettings { shards, replicas };

    info!(
        mapping = %mapping,
        fields = mapping.len(),
        shards = settings.shards,
        replicas = settings.replicas,
        "Derived index mapping"
    );

    Ok((mapping, settings))
}
