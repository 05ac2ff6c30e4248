//! Interface definitions for the index provider.
//!
//! This module defines the abstract `IndexProvider` trait that allows
//! for dependency injection and swappable search backend implementations.

mod index_provider;

pub use index_provider::{BulkActions, IndexProvider};
