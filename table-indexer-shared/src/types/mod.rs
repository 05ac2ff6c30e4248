//! This module defines the core data structures used across the table indexer.
//! It re-exports the value, row and dataset types.

pub mod dataset;
pub mod row;
pub mod value;

pub use dataset::{Column, ColumnType, Dataset};
pub use row::{Document, Row};
pub use value::Value;
