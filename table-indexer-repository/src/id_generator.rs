//! Content-derived document identifiers.

use sha2::{Digest, Sha256};

use crate::errors::IndexAdapterError;
use table_indexer_shared::Row;

const FIELD_SEPARATOR: &str = "+";

/// Derive a deterministic document id from selected row fields.
///
/// The canonical string forms of `id_fields` are joined with `+` in the
/// given order and hashed with SHA-256. The result is 64 lowercase hex
/// characters. Field order matters: `["x", "y"]` and `["y", "x"]` produce
/// different ids.
///
/// # Returns
///
/// * `Ok(String)` - The hex digest
/// * `Err(IndexAdapterError::KeyNotFound)` - If a field is absent from the row
pub fn generate_id<S: AsRef<str>>(row: &Row, id_fields: &[S]) -> Result<String, IndexAdapterError> {
    let parts = id_fields
        .iter()
        .map(|field| {
            let field = field.as_ref();
            row.get(field)
                .map(|value| value.to_string())
                .ok_or_else(|| IndexAdapterError::key_not_found(field))
        })
        .collect::<Result<Vec<String>, _>>()?;

    let digest = Sha256::digest(parts.join(FIELD_SEPARATOR).as_bytes());
    Ok(hex::encode(digest))
}
