//! Request and response types for bulk indexing.

use table_indexer_shared::Document;

/// One bulk "index" action: a sanitized document aimed at an index.
///
/// When `id` is `None` the backend assigns an identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct BulkAction {
    /// Target index name.
    pub index: String,
    /// Optional deterministic document id.
    pub id: Option<String>,
    /// The sanitized document body.
    pub document: Document,
}

/// Failure of a single item within a bulk request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkItemError {
    /// Document id, if the backend reported one.
    pub id: Option<String>,
    /// HTTP status reported for the item.
    pub status: u16,
    /// Reason reported by the backend.
    pub reason: String,
}

/// Summary of a bulk operation as reported by the backend.
///
/// Mirrors what bulk helpers usually return: the count of successful items
/// plus the list of item errors. Partial failures do not fail the call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BulkSummary {
    /// Number of items the backend accepted.
    pub succeeded: usize,
    /// Individual item failures.
    pub errors: Vec<BulkItemError>,
}

impl BulkSummary {
    /// Number of failed items.
    pub fn failed(&self) -> usize {
        self.errors.len()
    }

    /// Total number of items the backend reported on.
    pub fn total(&self) -> usize {
        self.succeeded + self.errors.len()
    }

    /// Fold the summary of another chunk into this one.
    pub fn merge(&mut self, other: BulkSummary) {
        self.succeeded += other.succeeded;
        self.errors.extend(other.errors);
    }
}
