//! OpenSearch provider implementation.
//!
//! This module provides the concrete implementation of `IndexProvider`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    cert::{Certificate, CertificateValidation},
    http::{
        request::JsonBody,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    BulkParts, IndexParts, OpenSearch,
};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};

use crate::config::ConnectionConfig;
use crate::errors::{CreationFailure, IndexAdapterError};
use crate::interfaces::{BulkActions, IndexProvider};
use crate::mapping::IndexDescriptor;
use crate::opensearch::index_config::creation_body;
use crate::types::{BulkAction, BulkItemError, BulkSummary};
use crate::utils;
use table_indexer_shared::Document;

/// OpenSearch provider implementation.
///
/// Holds one client bound to a single node. The connection lives as long
/// as the provider.
///
/// # Example
///
/// ```ignore
/// use table_indexer_repository::{ConnectionConfig, OpenSearchProvider};
///
/// let config = ConnectionConfig::new(["localhost"]).with_credentials("admin", "admin");
/// let provider = OpenSearchProvider::new(&config).await?;
/// ```
pub struct OpenSearchProvider {
    client: OpenSearch,
    bulk_chunk_size: usize,
}

impl OpenSearchProvider {
    /// Create a new OpenSearch provider from connection settings.
    ///
    /// Without a username the node is reached over `http` and certificates
    /// are not validated. With a username the node is reached over `https`
    /// with basic auth; certificates are checked against `ca_cert_path` when
    /// set, otherwise against the system roots.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchProvider)` - A new provider instance
    /// * `Err(IndexAdapterError::ConnectionError)` - If the host, CA file or transport is invalid
    pub async fn new(config: &ConnectionConfig) -> Result<Self, IndexAdapterError> {
        let secure = config.is_authenticated();

        let host = config
            .hosts
            .first()
            .ok_or_else(|| IndexAdapterError::connection("No hosts configured"))?;
        if config.hosts.len() > 1 {
            warn!(
                host = %host,
                ignored = ?&config.hosts[1..],
                "Multiple hosts configured, connecting to the first one only"
            );
        }
        let url = utils::parse_host_url(host, config.port, secure)?;

        let conn_pool = SingleNodeConnectionPool::new(url.clone());
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();

        builder = match &config.username {
            Some(username) => {
                let passkey = config.passkey.clone().unwrap_or_default();
                builder
                    .auth(Credentials::Basic(username.clone(), passkey))
                    .cert_validation(Self::cert_validation(config).await?)
            }
            None => builder.cert_validation(CertificateValidation::None),
        };

        let transport = builder
            .build()
            .map_err(|e| IndexAdapterError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %url,
            authenticated = secure,
            bulk_chunk_size = config.bulk_chunk_size,
            "Created OpenSearch provider"
        );

        Ok(Self {
            client,
            bulk_chunk_size: config.bulk_chunk_size.max(1),
        })
    }

    /// Certificate validation for authenticated connections.
    async fn cert_validation(
        config: &ConnectionConfig,
    ) -> Result<CertificateValidation, IndexAdapterError> {
        let Some(path) = &config.ca_cert_path else {
            return Ok(CertificateValidation::Default);
        };

        let pem = tokio::fs::read(path).await.map_err(|e| {
            IndexAdapterError::connection(format!(
                "Failed to read CA certificate {}: {}",
                path.display(),
                e
            ))
        })?;
        let certificate = Certificate::from_pem(&pem)
            .map_err(|e| IndexAdapterError::connection(format!("Invalid CA certificate: {}", e)))?;

        Ok(CertificateValidation::Full(certificate))
    }

    /// Action and source lines of one bulk item.
    fn bulk_lines(action: BulkAction) -> Result<[JsonBody<JsonValue>; 2], IndexAdapterError> {
        let meta = match &action.id {
            Some(id) => json!({ "index": { "_index": action.index, "_id": id } }),
            None => json!({ "index": { "_index": action.index } }),
        };
        let source = serde_json::to_value(&action.document)
            .map_err(|e| IndexAdapterError::serialization(e.to_string()))?;

        Ok([JsonBody::new(meta), JsonBody::new(source)])
    }
}

fn is_denied(status: u16) -> bool {
    status == 401 || status == 403
}

/// Interpret the status of an index existence check.
///
/// # Returns
///
/// * `Ok(true)` / `Ok(false)` - 200 / 404
/// * `Err(IndexAdapterError::AuthorizationError)` - 401 / 403
/// * `Err(IndexAdapterError::Unknown)` - Any other status
pub fn existence_from_status(
    index: &str,
    status: u16,
    body: &str,
) -> Result<bool, IndexAdapterError> {
    match status {
        200 => Ok(true),
        404 => Ok(false),
        code if is_denied(code) => Err(IndexAdapterError::authorization(format!(
            "Existence check for index '{}' denied with status {}",
            index, code
        ))),
        code => Err(IndexAdapterError::unknown(format!(
            "Existence check for index '{}' failed with status {}: {}",
            index, code, body
        ))),
    }
}

/// Interpret the status of an index deletion.
///
/// 404 and 400 mean the index is already gone, which is not an error.
///
/// # Returns
///
/// * `Ok(true)` - The index was deleted
/// * `Ok(false)` - The index was already gone
/// * `Err(IndexAdapterError::AuthorizationError)` - 401 / 403
/// * `Err(IndexAdapterError::DeleteError)` - Any other failure
pub fn deletion_from_status(
    index: &str,
    status: u16,
    body: &str,
) -> Result<bool, IndexAdapterError> {
    match status {
        200..=299 => Ok(true),
        400 | 404 => Ok(false),
        code if is_denied(code) => Err(IndexAdapterError::authorization(format!(
            "Delete of index '{}' denied with status {}",
            index, code
        ))),
        code => Err(IndexAdapterError::delete(format!(
            "Delete of index '{}' failed with status {}: {}",
            index, code, body
        ))),
    }
}

/// Classify a rejected index creation from the response status and body.
///
/// An existing index is a conflict; any other 400 means the settings or
/// mappings were refused.
pub fn classify_creation_failure(status: u16, body: &str) -> CreationFailure {
    let error_type = serde_json::from_str::<JsonValue>(body)
        .ok()
        .and_then(|json| json["error"]["type"].as_str().map(str::to_string));

    match (status, error_type.as_deref()) {
        (_, Some("resource_already_exists_exception")) => CreationFailure::Conflict,
        (400, _) => CreationFailure::Validation,
        _ => CreationFailure::Unknown,
    }
}

/// Fold a bulk response body into a summary.
///
/// # Returns
///
/// * `Ok(BulkSummary)` - Success count and per-item errors
/// * `Err(IndexAdapterError::ParseError)` - If the body has no `items` array
pub fn summarize_bulk_response(body: &JsonValue) -> Result<BulkSummary, IndexAdapterError> {
    let items = body["items"]
        .as_array()
        .ok_or_else(|| IndexAdapterError::parse("Bulk response without items"))?;

    let mut summary = BulkSummary::default();
    for item in items {
        // Each item is keyed by its action name ("index", "create", ...)
        let Some(result) = item.as_object().and_then(|o| o.values().next()) else {
            return Err(IndexAdapterError::parse(format!(
                "Unexpected bulk item: {}",
                item
            )));
        };

        let status = result["status"].as_u64().unwrap_or(0) as u16;
        let error = &result["error"];
        if (200..300).contains(&status) && error.is_null() {
            summary.succeeded += 1;
            continue;
        }

        let reason = error["reason"]
            .as_str()
            .or_else(|| error["type"].as_str())
            .map(str::to_string)
            .unwrap_or_else(|| error.to_string());
        summary.errors.push(BulkItemError {
            id: result["_id"].as_str().map(str::to_string),
            status,
            reason,
        });
    }

    Ok(summary)
}

#[async_trait]
impl IndexProvider for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, IndexAdapterError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexAdapterError::connection(e.to_string()))?;

        let status = response.status_code().as_u16();
        let body = if status == 200 || status == 404 {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };

        existence_from_status(index, status, &body).map_err(|e| {
            error!(index = %index, status = status, body = %body, "Index existence check failed");
            e
        })
    }

    /// Create an index with explicit settings and mappings.
    ///
    /// The body is sent as rendered by `creation_body`.
    async fn create_index(
        &self,
        index: &str,
        descriptor: &IndexDescriptor,
    ) -> Result<(), IndexAdapterError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(creation_body(descriptor))
            .send()
            .await
            .map_err(|e| IndexAdapterError::index_creation(CreationFailure::Network, e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let cause = classify_creation_failure(status.as_u16(), &error_body);
            error!(
                index = %index,
                status = %status,
                cause = %cause,
                body = %error_body,
                "Index creation failed"
            );
            return Err(IndexAdapterError::index_creation(
                cause,
                format!("Index creation failed with status {}: {}", status, error_body),
            ));
        }

        info!(
            index = %index,
            fields = descriptor.mapping.len(),
            shards = descriptor.settings.shards,
            replicas = descriptor.settings.replicas,
            "Created index"
        );
        Ok(())
    }

    /// Delete an index.
    ///
    /// 404 and 400 responses mean the index is already gone and are not errors.
    async fn delete_index(&self, index: &str) -> Result<(), IndexAdapterError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| IndexAdapterError::delete(e.to_string()))?;

        let status = response.status_code().as_u16();
        let body = if (200..300).contains(&status) {
            String::new()
        } else {
            response.text().await.unwrap_or_default()
        };

        match deletion_from_status(index, status, &body) {
            Ok(true) => info!(index = %index, "Deleted index"),
            Ok(false) => debug!(index = %index, status = status, "Index already gone"),
            Err(e) => {
                error!(index = %index, status = status, body = %body, "Delete index request failed");
                return Err(e);
            }
        }
        Ok(())
    }

    async fn index_document(
        &self,
        index: &str,
        id: Option<&str>,
        document: &Document,
    ) -> Result<(), IndexAdapterError> {
        let parts = match id {
            Some(id) => IndexParts::IndexId(index, id),
            None => IndexParts::Index(index),
        };

        let response = self
            .client
            .index(parts)
            .body(document)
            .send()
            .await
            .map_err(|e| IndexAdapterError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(index = %index, status = %status, body = %error_body, "Index request failed");
            return Err(IndexAdapterError::index(format!(
                "Index failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(index = %index, doc_id = ?id, fields = document.len(), "Document indexed");
        Ok(())
    }

    /// Send actions in bulk, `bulk_chunk_size` actions per request.
    ///
    /// Item failures are collected in the summary and logged; a request that
    /// fails as a whole aborts with `BulkIndexError`.
    async fn bulk_index(&self, mut actions: BulkActions<'_>) -> Result<BulkSummary, IndexAdapterError> {
        let mut summary = BulkSummary::default();

        loop {
            let mut body: Vec<JsonBody<JsonValue>> = Vec::new();
            for action in actions.by_ref().take(self.bulk_chunk_size) {
                body.extend(Self::bulk_lines(action?)?);
            }
            if body.is_empty() {
                break;
            }
            let chunk_len = body.len() / 2;

            let response = self
                .client
                .bulk(BulkParts::None)
                .body(body)
                .send()
                .await
                .map_err(|e| IndexAdapterError::bulk_index(e.to_string()))?;

            let status = response.status_code();
            if !status.is_success() {
                let error_body = response.text().await.unwrap_or_default();
                error!(status = %status, body = %error_body, "Bulk request failed");
                return Err(IndexAdapterError::bulk_index(format!(
                    "Bulk request failed with status {}: {}",
                    status, error_body
                )));
            }

            let response_body = response
                .json::<JsonValue>()
                .await
                .map_err(|e| IndexAdapterError::parse(e.to_string()))?;
            let chunk_summary = summarize_bulk_response(&response_body)?;

            for item in &chunk_summary.errors {
                warn!(
                    doc_id = ?item.id,
                    status = item.status,
                    reason = %item.reason,
                    "Bulk item failed"
                );
            }
            debug!(
                actions = chunk_len,
                succeeded = chunk_summary.succeeded,
                failed = chunk_summary.failed(),
                "Bulk chunk sent"
            );

            summary.merge(chunk_summary);
        }

        Ok(summary)
    }
}
