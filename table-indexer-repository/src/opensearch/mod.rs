//! OpenSearch implementation of the index provider.
//!
//! This module provides a concrete implementation of `IndexProvider`
//! using OpenSearch as the backend.

mod index_config;
mod provider;

pub use index_config::creation_body;
pub use provider::{
    classify_creation_failure, deletion_from_status, existence_from_status,
    summarize_bulk_response, OpenSearchProvider,
};
