//! Dataset types: typed columns and the rows that fill them.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use crate::types::row::Row;

/// Declared type of a column.
///
/// Parsed from the dtype names tabular tools report (`int64`,
/// `datetime64[ns]`, `object`, ...). Names that are not recognized are kept
/// verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int8,
    Int64,
    Float32,
    Float64,
    Bool,
    DateTime,
    /// Generic object/text column.
    Object,
    Other(String),
}

impl ColumnType {
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Int8 => "int8",
            ColumnType::Int64 => "int64",
            ColumnType::Float32 => "float32",
            ColumnType::Float64 => "float64",
            ColumnType::Bool => "bool",
            ColumnType::DateTime => "datetime64[ns]",
            ColumnType::Object => "object",
            ColumnType::Other(name) => name,
        }
    }
}

impl FromStr for ColumnType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "int8" => ColumnType::Int8,
            "int64" => ColumnType::Int64,
            "float32" => ColumnType::Float32,
            "float64" => ColumnType::Float64,
            "bool" => ColumnType::Bool,
            "datetime64[ns]" | "timedate64[ns]" => ColumnType::DateTime,
            "object" => ColumnType::Object,
            other => ColumnType::Other(other.to_string()),
        })
    }
}

impl From<&str> for ColumnType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(dtype) => dtype,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named, typed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub dtype: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, dtype: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
        }
    }
}

/// An ordered table: columns with a uniform declared type, and rows keyed by
/// column name.
///
/// The dataset is supplied by the caller and only read by the indexer.
///
/// # Example
///
/// ```
/// use table_indexer_shared::{Column, ColumnType, Dataset, Row};
///
/// let mut dataset = Dataset::new(vec![
///     Column::new("age", ColumnType::Int64),
///     Column::new("name", "object"),
/// ]);
/// dataset.push_row(Row::new().with("age", 36i64).with("name", "Ada"));
/// assert_eq!(dataset.row_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<Column>,
    rows: Vec<Row>,
}

impl Dataset {
    /// Create a dataset with the given columns and no rows.
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Create a dataset with columns and rows.
    pub fn with_rows(columns: Vec<Column>, rows: Vec<Row>) -> Self {
        Self { columns, rows }
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// True when the dataset has no rows (it may still have columns).
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
