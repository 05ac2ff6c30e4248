//! # Table Indexer Repository
//!
//! This crate loads tabular data into a search index. It derives field
//! mappings from column types, sanitizes rows into documents, generates
//! content-derived document ids, and talks to the backend through the
//! `IndexProvider` trait, with a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod id_generator;
pub mod interfaces;
pub mod mapping;
pub mod opensearch;
pub mod sanitizer;
pub mod service;
pub mod types;
pub mod utils;

pub use config::{AdapterConfig, ConnectionConfig};
pub use errors::{CreationFailure, IndexAdapterError};
pub use id_generator::generate_id;
pub use interfaces::{BulkActions, IndexProvider};
pub use mapping::{derive_mapping, FieldMapping, FieldType, IndexDescriptor, IndexSettings};
pub use opensearch::OpenSearchProvider;
pub use sanitizer::sanitize;
pub use service::IndexAdapter;
pub use types::{BulkAction, BulkItemError, BulkSummary};
pub use utils::parse_host_url;
