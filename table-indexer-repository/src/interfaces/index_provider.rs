//! Index provider trait definition.
//!
//! This module defines the abstract interface for the search backend,
//! so the adapter can be tested with mock implementations.

use async_trait::async_trait;

use crate::errors::IndexAdapterError;
use crate::mapping::IndexDescriptor;
use crate::types::{BulkAction, BulkSummary};
use table_indexer_shared::Document;

/// A lazily produced stream of bulk actions.
///
/// Items are built on demand while the provider writes the request body; an
/// `Err` item aborts the bulk call before anything else is sent.
pub type BulkActions<'a> = Box<dyn Iterator<Item = Result<BulkAction, IndexAdapterError>> + Send + 'a>;

/// Abstracts the underlying search backend (OpenSearch, Elasticsearch, etc.).
///
/// Implementations are injected into `IndexAdapter`. The provider owns the
/// connection; it is opened when the provider is built and released when it
/// is dropped.
///
/// All methods return `Result<T, IndexAdapterError>` for consistent error handling.
#[async_trait]
pub trait IndexProvider: Send + Sync {
    /// Check whether an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` / `Ok(false)` - Whether the index exists
    /// * `Err(IndexAdapterError::AuthorizationError)` - If the check was denied
    /// * `Err(IndexAdapterError)` - If the request fails
    async fn index_exists(&self, index: &str) -> Result<bool, IndexAdapterError>;

    /// Create an index from a settings + mappings descriptor.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If the backend acknowledged the index
    /// * `Err(IndexAdapterError::IndexCreationError)` - If the descriptor was rejected
    async fn create_index(
        &self,
        index: &str,
        descriptor: &IndexDescriptor,
    ) -> Result<(), IndexAdapterError>;

    /// Delete an index. An index that is already gone counts as deleted.
    async fn delete_index(&self, index: &str) -> Result<(), IndexAdapterError>;

    /// Index a single document.
    ///
    /// With an `id`, an existing document with the same id is replaced.
    /// Without one, the backend assigns an id.
    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: &Document,
    ) -> Result<(), IndexAdapterError>;

    /// Submit a sequence of index actions in bulk.
    ///
    /// Chunking of large sequences is up to the implementation. Item-level
    /// failures are reported in the summary, not as an `Err`.
    ///
    /// # Returns
    ///
    /// * `Ok(BulkSummary)` - Success count and individual item errors
    /// * `Err(IndexAdapterError)` - If an action could not be built or a request failed entirely
    async fn bulk_index(&self, actions: BulkActions<'_>) -> Result<BulkSummary, IndexAdapterError>;
}
