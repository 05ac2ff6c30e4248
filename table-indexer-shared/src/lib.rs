//! # Table Indexer Shared
//!
//! This crate defines the tabular data model used across the table indexer.
//! A [`Dataset`] is an ordered list of typed columns plus rows of [`Value`]s,
//! and a [`Document`] is the sanitized form of one row as it is sent to the
//! search engine.

pub mod types;

pub use types::dataset::{Column, ColumnType, Dataset};
pub use types::row::{Document, Row};
pub use types::value::Value;
