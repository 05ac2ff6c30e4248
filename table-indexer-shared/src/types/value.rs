//! Cell values for tabular rows.
//!
//! A [`Value`] is one of a closed set of scalar variants. It knows two
//! renderings: the JSON form sent to the search engine (via `Serialize`) and
//! the canonical string form used when hashing rows into document ids (via
//! `Display`).

use std::fmt;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};

/// A single cell of a row.
///
/// # Variants
///
/// - `Null`: missing value
/// - `NotATime`: the null marker of datetime columns
/// - `Bool`, `Int`, `Float`, `Text`: plain scalars
/// - `Timestamp`: a UTC point in time
/// - `List`: a sequence cell (e.g. tags)
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    NotATime,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(DateTime<Utc>),
    List(Vec<Value>),
}

impl Value {
    /// Whether this value carries no data: `Null`, `NotATime` or a
    /// non-finite float. JSON has no NaN or infinity, so those floats would
    /// reach the search engine as `null`.
    pub fn is_null_like(&self) -> bool {
        match self {
            Value::Null | Value::NotATime => true,
            Value::Float(f) => !f.is_finite(),
            _ => false,
        }
    }

    /// Whether this is a list with at least one null-like entry.
    pub fn has_null_entry(&self) -> bool {
        match self {
            Value::List(items) => items.iter().any(Value::is_null_like),
            _ => false,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null | Value::NotATime => serializer.serialize_none(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            // serde_json writes non-finite floats as null
            Value::Float(f) => serializer.serialize_f64(*f),
            Value::Text(t) => serializer.serialize_str(t),
            Value::Timestamp(ts) => {
                serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
            Value::List(items) => serializer.collect_seq(items),
        }
    }
}

/// Decimal exponents outside `[-4, 16)` switch to scientific notation.
const SCIENTIFIC_MIN_EXPONENT: i32 = -4;
const SCIENTIFIC_MAX_EXPONENT: i32 = 16;

fn fmt_float(value: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if value.is_nan() {
        return f.write_str("nan");
    }
    if value.is_infinite() {
        return f.write_str(if value > 0.0 { "inf" } else { "-inf" });
    }

    // `{:e}` yields the shortest round-trip digits, e.g. "1.5e300"
    let scientific = format!("{:e}", value);
    let parts = scientific
        .split_once('e')
        .and_then(|(mantissa, exponent)| Some((mantissa, exponent.parse::<i32>().ok()?)));

    match parts {
        Some((mantissa, exponent))
            if !(SCIENTIFIC_MIN_EXPONENT..SCIENTIFIC_MAX_EXPONENT).contains(&exponent) =>
        {
            let sign = if exponent < 0 { '-' } else { '+' };
            write!(f, "{}e{}{:02}", mantissa, sign, exponent.abs())
        }
        _ if value.fract() == 0.0 => write!(f, "{:.1}", value),
        _ => write!(f, "{}", value),
    }
}

/// Canonical string form, stable across releases since document ids are
/// derived from it.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::NotATime => f.write_str("NaT"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(x) => fmt_float(*x, f),
            Value::Text(t) => f.write_str(t),
            Value::Timestamp(ts) => {
                if ts.timestamp_subsec_micros() == 0 {
                    write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S"))
                } else {
                    write!(f, "{}", ts.format("%Y-%m-%d %H:%M:%S%.6f"))
                }
            }
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(f64::from(value))
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Timestamp(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Value::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
