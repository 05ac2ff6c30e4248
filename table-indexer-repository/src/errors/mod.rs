//! Error types for the table indexer repository.
//!
//! This module provides a unified error type for all index adapter operations.

mod index_adapter_error;

pub use index_adapter_error::{CreationFailure, IndexAdapterError};
