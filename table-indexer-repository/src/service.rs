//! Index adapter implementation.
//!
//! This module provides the façade application code uses to move tabular
//! data into the search index: index lifecycle, single-row inserts and bulk
//! loads.
//!
//! # Note on Missing Indexes
//!
//! Writes against an index that does not exist are not errors. They log a
//! warning and return without doing any work (`Ok(false)`, `Ok(0)` or
//! `Ok(None)` depending on the operation).

use tracing::{debug, info, warn};

use crate::config::{AdapterConfig, ConnectionConfig};
use crate::errors::IndexAdapterError;
use crate::id_generator;
use crate::interfaces::{BulkActions, IndexProvider};
use crate::mapping::{derive_mapping, FieldMapping, IndexDescriptor, IndexSettings};
use crate::opensearch::OpenSearchProvider;
use crate::sanitizer::sanitize;
use crate::types::{BulkAction, BulkSummary};
use crate::utils::validate_index_name;
use table_indexer_shared::{Dataset, Row};

/// The main adapter for loading tabular data into the search index.
///
/// This is the high-level API that application code should use. It derives
/// mappings, sanitizes rows, generates ids and delegates to an
/// `IndexProvider` for actual backend operations. The adapter owns its
/// provider and therefore the connection; dropping the adapter (or calling
/// `shutdown`) releases it.
///
/// # Example
///
/// ```no_run
/// use table_indexer_repository::{AdapterConfig, ConnectionConfig, IndexAdapter};
/// use table_indexer_shared::{Column, ColumnType, Dataset, Row};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let adapter = IndexAdapter::connect(&ConnectionConfig::from_env(), AdapterConfig::default()).await?;
///
/// let mut people = Dataset::new(vec![
///     Column::new("age", ColumnType::Int64),
///     Column::new("name", ColumnType::Object),
/// ]);
/// people.push_row(Row::new().with("age", 36i64).with("name", "Ada"));
///
/// adapter
///     .create_index_from_dataset("people", &people, &["name"], 1, 0, true)
///     .await?;
/// let summary = adapter.insert_bulk("people", &people, true, &["name"]).await?;
/// # Ok(())
/// # }
/// ```
pub struct IndexAdapter {
    provider: Box<dyn IndexProvider>,
    config: AdapterConfig,
}

impl IndexAdapter {
    /// Create a new IndexAdapter with default configuration.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `IndexProvider` (e.g., `OpenSearchProvider`)
    pub fn new(provider: Box<dyn IndexProvider>) -> Self {
        Self {
            provider,
            config: AdapterConfig::default(),
        }
    }

    /// Create a new IndexAdapter with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `provider` - A boxed implementation of `IndexProvider`
    /// * `config` - Custom configuration for the adapter
    pub fn with_config(provider: Box<dyn IndexProvider>, config: AdapterConfig) -> Self {
        Self { provider, config }
    }

    /// Open a connection to an OpenSearch cluster and wrap it in an adapter.
    ///
    /// # Returns
    ///
    /// * `Ok(IndexAdapter)` - An adapter holding the new connection
    /// * `Err(IndexAdapterError::ConnectionError)` - If the connection cannot be set up
    pub async fn connect(
        connection: &ConnectionConfig,
        config: AdapterConfig,
    ) -> Result<Self, IndexAdapterError> {
        let provider = OpenSearchProvider::new(connection).await?;
        Ok(Self::with_config(Box::new(provider), config))
    }

    /// Release the connection.
    pub fn shutdown(self) {
        drop(self.provider);
        info!("Index adapter shut down");
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Check if batch size exceeds the configured limit.
    fn validate_batch_size(&self, size: usize) -> Result<(), IndexAdapterError> {
        if let Some(max) = self.config.max_batch_size {
            if size > max {
                return Err(IndexAdapterError::batch_size_exceeded(size, max));
            }
        }
        Ok(())
    }

    /// Reject id generation without any field to derive the id from.
    fn validate_id_fields<S: AsRef<str>>(
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<(), IndexAdapterError> {
        if generate_id && id_fields.is_empty() {
            return Err(IndexAdapterError::validation(
                "At least one id field is required to generate document ids",
            ));
        }
        Ok(())
    }

    /// Reject id fields that are not columns of the dataset, before any
    /// row is sent.
    fn validate_id_columns<S: AsRef<str>>(
        dataset: &Dataset,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<(), IndexAdapterError> {
        if !generate_id {
            return Ok(());
        }
        match id_fields
            .iter()
            .find(|field| dataset.column(field.as_ref()).is_none())
        {
            Some(missing) => Err(IndexAdapterError::key_not_found(missing.as_ref())),
            None => Ok(()),
        }
    }

    fn document_id<S: AsRef<str>>(
        row: &Row,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<Option<String>, IndexAdapterError> {
        if generate_id {
            id_generator::generate_id(row, id_fields).map(Some)
        } else {
            Ok(None)
        }
    }

    /// Check if an index exists.
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - Whether the index exists
    /// * `Err(IndexAdapterError::AuthorizationError)` - If the check was denied
    pub async fn index_exists(&self, name: &str) -> Result<bool, IndexAdapterError> {
        validate_index_name(name)?;
        self.provider.index_exists(name).await
    }

    /// Create an index from a field mapping and settings.
    ///
    /// When `persist` is false nothing is sent: the descriptor that would
    /// have been used is returned (dry run).
    ///
    /// # Returns
    ///
    /// * `Ok(IndexDescriptor)` - The settings and mapping of the index
    /// * `Err(IndexAdapterError::IndexCreationError)` - If the backend rejected the index
    pub async fn create_index(
        &self,
        name: &str,
        mapping: FieldMapping,
        settings: IndexSettings,
        persist: bool,
    ) -> Result<IndexDescriptor, IndexAdapterError> {
        validate_index_name(name)?;
        let descriptor = IndexDescriptor::new(mapping, settings);

        if !persist {
            debug!(index = %name, fields = descriptor.mapping.len(), "Dry run, index not created");
            return Ok(descriptor);
        }

        self.provider
            .create_index(name, &descriptor)
            .await
            .map_err(IndexAdapterError::into_creation_error)?;

        info!(index = %name, "Index created");
        Ok(descriptor)
    }

    /// Derive a mapping from a dataset and create the index from it.
    ///
    /// # Arguments
    ///
    /// * `aggregators` - Columns to store as `keyword`
    /// * `shards` / `replicas` - Index settings, used as given
    /// * `persist` - When false, only the descriptor is returned
    pub async fn create_index_from_dataset<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        dataset: &Dataset,
        aggregators: &[S],
        shards: u32,
        replicas: u32,
        persist: bool,
    ) -> Result<IndexDescriptor, IndexAdapterError> {
        let (mapping, settings) = derive_mapping(dataset, aggregators, shards, replicas)?;
        self.create_index(name, mapping, settings, persist).await
    }

    /// Delete an index.
    ///
    /// A missing index is not an error: a warning is logged and nothing is sent.
    pub async fn delete_index(&self, name: &str) -> Result<(), IndexAdapterError> {
        if !self.index_exists(name).await? {
            warn!(index = %name, "Index does not exist, nothing to delete");
            return Ok(());
        }

        self.provider.delete_index(name).await?;
        info!(index = %name, "Index deleted");
        Ok(())
    }

    /// Insert one row as a document.
    ///
    /// The row is sanitized first. With `generate_id`, the document id is
    /// derived from `id_fields`, so re-inserting the same row replaces the
    /// existing document.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the document was indexed
    /// * `Ok(false)` - If the index does not exist (nothing was sent)
    /// * `Err(IndexAdapterError::KeyNotFound)` - If an id field is missing from the row
    /// * `Err(IndexAdapterError)` - If the backend rejected the document
    pub async fn insert_one<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        row: &Row,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<bool, IndexAdapterError> {
        Self::validate_id_fields(generate_id, id_fields)?;

        if !self.index_exists(name).await? {
            warn!(index = %name, "Index does not exist, row not inserted");
            return Ok(false);
        }

        self.write_row(name, row, generate_id, id_fields).await?;
        Ok(true)
    }

    /// Insert every row of a dataset, one request per row.
    ///
    /// Existence of the index is checked once. The first failing row stops
    /// the load; rows before it stay indexed.
    ///
    /// # Returns
    ///
    /// * `Ok(usize)` - Number of rows written (0 if the index does not exist)
    /// * `Err(IndexAdapterError::KeyNotFound)` - If an id field is not a column
    pub async fn insert_rows<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        dataset: &Dataset,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<usize, IndexAdapterError> {
        Self::validate_id_fields(generate_id, id_fields)?;
        Self::validate_id_columns(dataset, generate_id, id_fields)?;

        if !self.index_exists(name).await? {
            warn!(index = %name, rows = dataset.row_count(), "Index does not exist, rows not inserted");
            return Ok(0);
        }

        let mut written = 0;
        for row in dataset.rows() {
            self.write_row(name, row, generate_id, id_fields).await?;
            written += 1;
        }

        info!(index = %name, count = written, "Rows inserted");
        Ok(written)
    }

    async fn write_row<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        row: &Row,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<(), IndexAdapterError> {
        let id = Self::document_id(row, generate_id, id_fields)?;
        let document = sanitize(row);
        self.provider
            .index_document(name, id.as_deref(), &document)
            .await
    }

    /// Load a whole dataset with one bulk call.
    ///
    /// Actions are produced lazily, one per row, while the provider builds
    /// its requests. Item failures do not fail the call; they are reported
    /// in the returned summary.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(BulkSummary))` - Success count and item errors
    /// * `Ok(None)` - If the index does not exist (nothing was sent)
    /// * `Err(IndexAdapterError::BatchSizeExceeded)` - If the dataset exceeds `max_batch_size`
    /// * `Err(IndexAdapterError::KeyNotFound)` - If an id field is not a column, or
    ///   is missing from a row
    pub async fn insert_bulk<S: AsRef<str> + Sync>(
        &self,
        name: &str,
        dataset: &Dataset,
        generate_id: bool,
        id_fields: &[S],
    ) -> Result<Option<BulkSummary>, IndexAdapterError> {
        validate_index_name(name)?;
        self.validate_batch_size(dataset.row_count())?;
        Self::validate_id_fields(generate_id, id_fields)?;
        Self::validate_id_columns(dataset, generate_id, id_fields)?;

        if !self.index_exists(name).await? {
            warn!(index = %name, rows = dataset.row_count(), "Index does not exist, bulk load skipped");
            return Ok(None);
        }

        let actions: BulkActions<'_> = Box::new(dataset.rows().iter().map(
            move |row| -> Result<BulkAction, IndexAdapterError> {
                Ok(BulkAction {
                    index: name.to_string(),
                    id: Self::document_id(row, generate_id, id_fields)?,
                    document: sanitize(row),
                })
            },
        ));

        let summary = self.provider.bulk_index(actions).await?;

        if summary.errors.is_empty() {
            info!(index = %name, count = summary.succeeded, "Bulk load completed");
        } else {
            warn!(
                index = %name,
                succeeded = summary.succeeded,
                failed = summary.failed(),
                "Bulk load completed with item errors"
            );
        }

        Ok(Some(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CreationFailure;
    use crate::mapping::FieldType;
    use crate::types::BulkItemError;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use std::sync::Arc;
    use table_indexer_shared::{Column, ColumnType, Document, Value};
    use tokio::sync::Mutex;

    const NO_FIELDS: &[&str] = &[];

    type IndexedDocs = Arc<Mutex<Vec<(String, Option<String>, Document)>>>;

    /// Mock provider for testing
    struct MockProvider {
        indexes: Arc<Mutex<HashSet<String>>>,
        created: Arc<Mutex<Vec<(String, IndexDescriptor)>>>,
        deleted: Arc<Mutex<Vec<String>>>,
        indexed: IndexedDocs,
        bulk_actions: Arc<Mutex<Vec<BulkAction>>>,
        creation_failure: Option<CreationFailure>,
        should_fail: bool,
        denied: bool,
    }

    impl MockProvider {
        fn new() -> Self {
            Self {
                indexes: Arc::new(Mutex::new(HashSet::new())),
                created: Arc::new(Mutex::new(Vec::new())),
                deleted: Arc::new(Mutex::new(Vec::new())),
                indexed: Arc::new(Mutex::new(Vec::new())),
                bulk_actions: Arc::new(Mutex::new(Vec::new())),
                creation_failure: None,
                should_fail: false,
                denied: false,
            }
        }

        fn with_index(name: &str) -> Self {
            let provider = Self::new();
            provider
                .indexes
                .try_lock()
                .unwrap()
                .insert(name.to_string());
            provider
        }

        fn denied(name: &str) -> Self {
            let mut provider = Self::with_index(name);
            provider.denied = true;
            provider
        }
    }

    #[async_trait]
    impl IndexProvider for MockProvider {
        async fn index_exists(&self, index: &str) -> Result<bool, IndexAdapterError> {
            if self.denied {
                return Err(IndexAdapterError::authorization("Mock denied"));
            }
            Ok(self.indexes.lock().await.contains(index))
        }

        async fn create_index(
            &self,
            index: &str,
            descriptor: &IndexDescriptor,
        ) -> Result<(), IndexAdapterError> {
            if let Some(cause) = self.creation_failure {
                return Err(IndexAdapterError::index_creation(cause, "Mock failure"));
            }
            if self.should_fail {
                return Err(IndexAdapterError::connection("Mock failure"));
            }
            self.indexes.lock().await.insert(index.to_string());
            self.created
                .lock()
                .await
                .push((index.to_string(), descriptor.clone()));
            Ok(())
        }

        async fn delete_index(&self, index: &str) -> Result<(), IndexAdapterError> {
            self.indexes.lock().await.remove(index);
            self.deleted.lock().await.push(index.to_string());
            Ok(())
        }

        async fn index_document(
            &self,
            index: &str,
            id: Option<&str>,
            document: &Document,
        ) -> Result<(), IndexAdapterError> {
            if self.should_fail {
                return Err(IndexAdapterError::index("Mock failure"));
            }
            self.indexed.lock().await.push((
                index.to_string(),
                id.map(str::to_string),
                document.clone(),
            ));
            Ok(())
        }

        async fn bulk_index(
            &self,
            actions: BulkActions<'_>,
        ) -> Result<BulkSummary, IndexAdapterError> {
            let mut summary = BulkSummary::default();
            for action in actions {
                let action = action?;
                if action.document.is_empty() {
                    summary.errors.push(BulkItemError {
                        id: action.id.clone(),
                        status: 400,
                        reason: "empty document".to_string(),
                    });
                } else {
                    summary.succeeded += 1;
                }
                self.bulk_actions.lock().await.push(action);
            }
            Ok(summary)
        }
    }

    fn people() -> Dataset {
        Dataset::with_rows(
            vec![
                Column::new("age", ColumnType::Int64),
                Column::new("name", ColumnType::Object),
                Column::new("score", ColumnType::Float64),
            ],
            vec![
                Row::new()
                    .with("age", 36i64)
                    .with("name", "Ada")
                    .with("score", f64::NAN),
                Row::new()
                    .with("age", 41i64)
                    .with("name", "Grace")
                    .with("score", 9.5f64),
            ],
        )
    }

    #[tokio::test]
    async fn test_insert_one_missing_index() {
        let provider = MockProvider::new();
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let row = Row::new().with("a", 1i64);
        let result = adapter.insert_one("missing", &row, false, NO_FIELDS).await;

        assert!(matches!(result, Ok(false)));
        assert!(indexed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_one_sanitizes_and_generates_id() {
        let provider = MockProvider::with_index("people");
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let row = Row::new()
            .with("x", "foo")
            .with("y", 5i64)
            .with("z", Value::Null);
        let inserted = adapter.insert_one("people", &row, true, &["x", "y"]).await.unwrap();

        assert!(inserted);
        let indexed = indexed.lock().await;
        assert_eq!(indexed.len(), 1);
        let (index, id, document) = &indexed[0];
        assert_eq!(index, "people");
        assert_eq!(
            id.as_deref(),
            Some(id_generator::generate_id(&row, &["x", "y"]).unwrap().as_str())
        );
        assert_eq!(document.len(), 2);
        assert!(!document.contains_key("z"));
    }

    #[tokio::test]
    async fn test_insert_one_without_id() {
        let provider = MockProvider::with_index("people");
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let row = Row::new().with("a", 1i64);
        assert!(adapter.insert_one("people", &row, false, &["a"]).await.unwrap());
        assert_eq!(indexed.lock().await[0].1, None);
    }

    #[tokio::test]
    async fn test_insert_one_missing_id_field() {
        let provider = MockProvider::with_index("people");
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let row = Row::new().with("a", 1i64);
        let result = adapter.insert_one("people", &row, true, &["b"]).await;

        assert!(matches!(result, Err(IndexAdapterError::KeyNotFound(_))));
        assert!(indexed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_id_requires_fields() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::with_index("people")));
        let row = Row::new().with("a", 1i64);

        let result = adapter.insert_one("people", &row, true, NO_FIELDS).await;
        assert!(matches!(result, Err(IndexAdapterError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_insert_one_propagates_failure() {
        let mut provider = MockProvider::with_index("people");
        provider.should_fail = true;
        let adapter = IndexAdapter::new(Box::new(provider));

        let row = Row::new().with("a", 1i64);
        let result = adapter.insert_one("people", &row, false, NO_FIELDS).await;
        assert!(matches!(result, Err(IndexAdapterError::IndexError(_))));
    }

    #[tokio::test]
    async fn test_insert_rows() {
        let provider = MockProvider::with_index("people");
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let written = adapter
            .insert_rows("people", &people(), true, &["name"])
            .await
            .unwrap();

        assert_eq!(written, 2);
        let indexed = indexed.lock().await;
        assert!(indexed.iter().all(|(_, id, _)| id.is_some()));
        assert!(!indexed[0].2.contains_key("score"));
        assert!(indexed[1].2.contains_key("score"));
    }

    #[tokio::test]
    async fn test_insert_rows_missing_index() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::new()));
        let written = adapter
            .insert_rows("missing", &people(), false, NO_FIELDS)
            .await
            .unwrap();
        assert_eq!(written, 0);
    }

    #[tokio::test]
    async fn test_insert_bulk() {
        let provider = MockProvider::with_index("people");
        let actions = provider.bulk_actions.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let summary = adapter
            .insert_bulk("people", &people(), true, &["age", "name"])
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed(), 0);

        let actions = actions.lock().await;
        assert_eq!(actions.len(), 2);
        assert!(actions.iter().all(|a| a.index == "people"));
        assert_ne!(actions[0].id, actions[1].id);
        assert!(!actions[0].document.contains_key("score"));
    }

    #[tokio::test]
    async fn test_insert_bulk_reports_item_errors() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::with_index("people")));
        let dataset = Dataset::with_rows(
            vec![Column::new("a", ColumnType::Float64)],
            vec![
                Row::new().with("a", 1.0f64),
                Row::new().with("a", f64::NAN),
            ],
        );

        let summary = adapter
            .insert_bulk("people", &dataset, false, NO_FIELDS)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed(), 1);
    }

    #[tokio::test]
    async fn test_insert_bulk_missing_index() {
        let provider = MockProvider::new();
        let actions = provider.bulk_actions.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let result = adapter
            .insert_bulk("missing", &people(), false, NO_FIELDS)
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(actions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_bulk_missing_id_field() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::with_index("people")));
        let result = adapter
            .insert_bulk("people", &people(), true, &["nope"])
            .await;
        assert!(matches!(result, Err(IndexAdapterError::KeyNotFound(_))));
    }

    #[tokio::test]
    async fn test_insert_bulk_id_field_not_a_column() {
        let provider = MockProvider::with_index("people");
        let actions = provider.bulk_actions.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let mut dataset = people();
        dataset.push_row(
            Row::new()
                .with("age", 50i64)
                .with("name", "Linus")
                .with("email", "l@x"),
        );
        let result = adapter
            .insert_bulk("people", &dataset, true, &["name", "email"])
            .await;

        assert!(matches!(result, Err(IndexAdapterError::KeyNotFound(ref f)) if f == "email"));
        assert!(actions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_insert_rows_id_field_not_a_column() {
        let provider = MockProvider::with_index("people");
        let indexed = provider.indexed.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let result = adapter
            .insert_rows("people", &people(), true, &["email"])
            .await;

        assert!(matches!(result, Err(IndexAdapterError::KeyNotFound(_))));
        assert!(indexed.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_denied_existence_check_reaches_callers() {
        let provider = MockProvider::denied("people");
        let indexed = provider.indexed.clone();
        let deleted = provider.deleted.clone();
        let actions = provider.bulk_actions.clone();
        let adapter = IndexAdapter::new(Box::new(provider));
        let row = Row::new().with("a", 1i64);

        assert!(matches!(
            adapter.index_exists("people").await,
            Err(IndexAdapterError::AuthorizationError(_))
        ));
        assert!(matches!(
            adapter.insert_one("people", &row, false, NO_FIELDS).await,
            Err(IndexAdapterError::AuthorizationError(_))
        ));
        assert!(matches!(
            adapter.insert_rows("people", &people(), false, NO_FIELDS).await,
            Err(IndexAdapterError::AuthorizationError(_))
        ));
        assert!(matches!(
            adapter.insert_bulk("people", &people(), false, NO_FIELDS).await,
            Err(IndexAdapterError::AuthorizationError(_))
        ));
        assert!(matches!(
            adapter.delete_index("people").await,
            Err(IndexAdapterError::AuthorizationError(_))
        ));

        assert!(indexed.lock().await.is_empty());
        assert!(deleted.lock().await.is_empty());
        assert!(actions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_size_limit() {
        let provider = MockProvider::with_index("people");
        let actions = provider.bulk_actions.clone();
        let config = AdapterConfig::with_max_batch_size(1);
        let adapter = IndexAdapter::with_config(Box::new(provider), config);

        let result = adapter.insert_bulk("people", &people(), false, NO_FIELDS).await;

        assert!(matches!(
            result,
            Err(IndexAdapterError::BatchSizeExceeded { provided: 2, max: 1 })
        ));
        assert!(actions.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_batch_size_unlimited() {
        let adapter = IndexAdapter::with_config(
            Box::new(MockProvider::with_index("people")),
            AdapterConfig::unlimited(),
        );
        let rows: Vec<Row> = (0..5000).map(|i| Row::new().with("n", i as i64)).collect();
        let dataset = Dataset::with_rows(vec![Column::new("n", ColumnType::Int64)], rows);

        let summary = adapter
            .insert_bulk("people", &dataset, true, &["n"])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(summary.succeeded, 5000);
    }

    #[tokio::test]
    async fn test_create_index_dry_run() {
        let provider = MockProvider::new();
        let created = provider.created.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        let descriptor = adapter
            .create_index_from_dataset("people", &people(), &["name"], 1, 0, false)
            .await
            .unwrap();

        assert_eq!(descriptor.mapping.get("name"), Some(FieldType::Keyword));
        assert_eq!(descriptor.mapping.get("age"), Some(FieldType::Integer));
        assert!(created.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_index_persists_with_replicas() {
        let provider = MockProvider::new();
        let created = provider.created.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        adapter
            .create_index_from_dataset("people", &people(), &["name"], 2, 3, true)
            .await
            .unwrap();

        let created = created.lock().await;
        assert_eq!(created.len(), 1);
        assert_eq!(created[0].0, "people");
        assert_eq!(created[0].1.settings, IndexSettings { shards: 2, replicas: 3 });
        assert!(adapter.index_exists("people").await.unwrap());
    }

    #[tokio::test]
    async fn test_create_index_errors_carry_cause() {
        let mut provider = MockProvider::new();
        provider.creation_failure = Some(CreationFailure::Conflict);
        let adapter = IndexAdapter::new(Box::new(provider));

        let result = adapter
            .create_index("people", FieldMapping::default(), IndexSettings::default(), true)
            .await;
        assert!(matches!(
            result,
            Err(IndexAdapterError::IndexCreationError {
                cause: CreationFailure::Conflict,
                ..
            })
        ));

        let mut provider = MockProvider::new();
        provider.should_fail = true;
        let adapter = IndexAdapter::new(Box::new(provider));

        let result = adapter
            .create_index("people", FieldMapping::default(), IndexSettings::default(), true)
            .await;
        assert!(matches!(
            result,
            Err(IndexAdapterError::IndexCreationError {
                cause: CreationFailure::Network,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_create_index_from_empty_dataset() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::new()));
        let result = adapter
            .create_index_from_dataset("people", &Dataset::default(), NO_FIELDS, 1, 0, true)
            .await;
        assert!(matches!(result, Err(IndexAdapterError::ValidationError(_))));
    }

    #[tokio::test]
    async fn test_delete_index() {
        let provider = MockProvider::with_index("people");
        let deleted = provider.deleted.clone();
        let adapter = IndexAdapter::new(Box::new(provider));

        adapter.delete_index("people").await.unwrap();
        adapter.delete_index("people").await.unwrap();

        assert_eq!(*deleted.lock().await, vec!["people".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_index_name_rejected() {
        let adapter = IndexAdapter::new(Box::new(MockProvider::new()));
        let result = adapter.index_exists("").await;
        assert!(matches!(result, Err(IndexAdapterError::ValidationError(_))));
    }
}
