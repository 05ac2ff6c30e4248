//! Record sanitization.

use table_indexer_shared::{Document, Row};

/// Build a document from a row, dropping every field without usable data.
///
/// A field is dropped when its value is null, not-a-time, a NaN or infinite
/// float, or a list holding any of those. Surviving fields keep their order
/// and value.
pub fn sanitize(row: &Row) -> Document {
    row.iter()
        .filter(|(_, value)| !value.is_null_like() && !value.has_null_entry())
        .map(|(name, value)| (name, value.clone()))
        .collect()
}
