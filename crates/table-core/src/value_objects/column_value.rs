//! Column value - dynamically typed cell of a result row
//!
//! The queried table has no schema known at compile time, so every cell is
//! carried as a tagged union and serialized to the JSON form PostgreSQL's own
//! text output suggests.

use std::fmt::Write as _;

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// A single cell value decoded from the database
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    /// Arbitrary precision numeric, kept digit for digit
    Numeric(BigDecimal),
    Text(String),
    /// Timestamp with time zone, normalized to UTC
    Timestamp(DateTime<Utc>),
    /// Timestamp without time zone
    LocalTimestamp(NaiveDateTime),
    Date(NaiveDate),
    Time(NaiveTime),
    Json(serde_json::Value),
    Bytes(Vec<u8>),
    Uuid(Uuid),
    /// One-dimensional array; elements may be `Null`
    Array(Vec<ColumnValue>),
}

/// Positional notation with exactly the scale the value carries
///
/// `BigDecimal`'s `Display` may fall back to exponent notation, which
/// PostgreSQL never prints.
fn plain_decimal(value: &BigDecimal) -> String {
    let (int, scale) = value.as_bigint_and_exponent();
    let int = int.to_string();
    let (sign, digits) = match int.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", int.as_str()),
    };

    let mut out = String::with_capacity(digits.len() + 3);
    out.push_str(sign);
    match usize::try_from(scale) {
        Ok(0) => out.push_str(digits),
        Ok(scale) if digits.len() > scale => {
            let (whole, fraction) = digits.split_at(digits.len() - scale);
            out.push_str(whole);
            out.push('.');
            out.push_str(fraction);
        }
        Ok(scale) => {
            out.push_str("0.");
            out.push_str(&"0".repeat(scale - digits.len()));
            out.push_str(digits);
        }
        Err(_) => {
            out.push_str(digits);
            if digits != "0" {
                out.push_str(&"0".repeat(usize::try_from(scale.unsigned_abs()).unwrap_or(0)));
            }
        }
    }
    out
}

/// Render bytes the way PostgreSQL prints `bytea` in hex output mode
fn bytea_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("\\x");
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

impl Serialize for ColumnValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(v) => serializer.serialize_bool(*v),
            Self::Integer(v) => serializer.serialize_i64(*v),
            Self::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
            Self::Float(_) => serializer.serialize_unit(),
            Self::Numeric(v) => serializer.serialize_str(&plain_decimal(v)),
            Self::Text(v) => serializer.serialize_str(v),
            Self::Timestamp(v) => {
                serializer.serialize_str(&v.to_rfc3339_opts(SecondsFormat::AutoSi, true))
            }
            Self::LocalTimestamp(v) => {
                serializer.collect_str(&v.format("%Y-%m-%dT%H:%M:%S%.f"))
            }
            Self::Date(v) => serializer.collect_str(&v.format("%Y-%m-%d")),
            Self::Time(v) => serializer.collect_str(&v.format("%H:%M:%S%.f")),
            Self::Json(v) => v.serialize(serializer),
            Self::Bytes(v) => serializer.serialize_str(&bytea_hex(v)),
            Self::Uuid(v) => serializer.collect_str(v),
            Self::Array(v) => serializer.collect_seq(v),
        }
    }
}

impl From<bool> for ColumnValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for ColumnValue {
    fn from(v: i32) -> Self {
        Self::Integer(i64::from(v))
    }
}

impl From<i64> for ColumnValue {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for ColumnValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<&str> for ColumnValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for ColumnValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl<T: Into<ColumnValue>> From<Option<T>> for ColumnValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}
