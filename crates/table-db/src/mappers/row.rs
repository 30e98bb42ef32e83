//! Decoding of untyped PostgreSQL rows
//!
//! The queried table's schema is not known at compile time, so each column is
//! decoded by inspecting its PostgreSQL type and picking the matching Rust type.
//! Rows read over the simple query protocol arrive as PostgreSQL's text output;
//! a column with no dedicated mapping (intervals, network addresses, enums,
//! domains, geometric types and so on) is served as that text.

use bigdecimal::BigDecimal;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::{PgRow, PgValueFormat, PgValueRef};
use sqlx::{Column, Decode, Postgres, Row as _, Type, TypeInfo, ValueRef};
use uuid::Uuid;

use table_core::{ColumnValue, RepoResult, RepositoryError, Row};

/// Decode every row of a result set
pub fn decode_rows(rows: &[PgRow]) -> RepoResult<Vec<Row>> {
    rows.iter().map(decode_row).collect()
}

/// Decode one result row into a column-ordered [`Row`]
fn decode_row(row: &PgRow) -> RepoResult<Row> {
    let mut out = Row::with_capacity(row.len());
    for (idx, column) in row.columns().iter().enumerate() {
        let value = decode_column(row, idx).map_err(|reason| RepositoryError::Decode {
            column: column.name().to_string(),
            type_name: column.type_info().name().to_string(),
            reason,
        })?;
        out.insert(column.name(), value);
    }
    Ok(out)
}

fn get<T>(row: &PgRow, idx: usize) -> Result<T, String>
where
    T: for<'r> Decode<'r, Postgres> + Type<Postgres>,
{
    row.try_get::<T, _>(idx).map_err(|e| e.to_string())
}

fn decode_column(row: &PgRow, idx: usize) -> Result<ColumnValue, String> {
    let raw = row.try_get_raw(idx).map_err(|e| e.to_string())?;
    if raw.is_null() {
        return Ok(ColumnValue::Null);
    }

    let type_info = raw.type_info().into_owned();
    let type_name = type_info.name();

    if let Some(text) = non_finite(&raw, type_name)? {
        return Ok(ColumnValue::Text(text.to_string()));
    }

    let value = match type_name {
        "BOOL" => ColumnValue::Bool(get(row, idx)?),
        "INT2" => ColumnValue::Integer(get::<i16>(row, idx)?.into()),
        "INT4" => ColumnValue::Integer(get::<i32>(row, idx)?.into()),
        "INT8" => ColumnValue::Integer(get(row, idx)?),
        "FLOAT4" => ColumnValue::Float(get::<f32>(row, idx)?.into()),
        "FLOAT8" => ColumnValue::Float(get(row, idx)?),
        "NUMERIC" => ColumnValue::Numeric(numeric(row, idx, &raw)?),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" | "UNKNOWN" => ColumnValue::Text(get(row, idx)?),
        "TIMESTAMPTZ" => ColumnValue::Timestamp(get::<DateTime<Utc>>(row, idx)?),
        "TIMESTAMP" => ColumnValue::LocalTimestamp(get::<NaiveDateTime>(row, idx)?),
        "DATE" => ColumnValue::Date(get::<NaiveDate>(row, idx)?),
        "TIME" => ColumnValue::Time(get::<NaiveTime>(row, idx)?),
        "JSON" | "JSONB" => ColumnValue::Json(get::<serde_json::Value>(row, idx)?),
        "BYTEA" => ColumnValue::Bytes(get(row, idx)?),
        "UUID" => ColumnValue::Uuid(get::<Uuid>(row, idx)?),
        array if array.ends_with("[]") => match decode_array(row, idx, &raw, array) {
            Some(value) => value,
            // multi-dimensional, non-finite elements, or an element type without a mapping
            None => ColumnValue::Text(as_text(&raw, type_name)?),
        },
        _ => ColumnValue::Text(as_text(&raw, type_name)?),
    };

    Ok(value)
}

/// PostgreSQL's own text output for the value
fn as_text(raw: &PgValueRef<'_>, type_name: &str) -> Result<String, String> {
    match raw.format() {
        PgValueFormat::Text => raw.as_str().map(str::to_owned).map_err(|e| e.to_string()),
        PgValueFormat::Binary => Err(format!("unsupported column type {type_name}")),
    }
}

/// Infinite timestamps and dates, and non-number numerics
///
/// chrono and `BigDecimal` cannot hold these, so they are served as the words
/// PostgreSQL prints for them.
fn non_finite(raw: &PgValueRef<'_>, type_name: &str) -> Result<Option<&'static str>, String> {
    let temporal = match type_name {
        "TIMESTAMP" | "TIMESTAMPTZ" | "DATE" => true,
        "NUMERIC" => false,
        _ => return Ok(None),
    };

    if raw.format() == PgValueFormat::Text {
        let text = raw.as_str().map_err(|e| e.to_string())?;
        return Ok(["infinity", "-infinity", "NaN", "Infinity", "-Infinity"]
            .into_iter()
            .find(|word| *word == text));
    }

    let bytes = raw.as_bytes().map_err(|e| e.to_string())?;
    let word = if temporal {
        if let Ok(micros) = <[u8; 8]>::try_from(bytes).map(i64::from_be_bytes) {
            match micros {
                i64::MAX => Some("infinity"),
                i64::MIN => Some("-infinity"),
                _ => None,
            }
        } else if let Ok(days) = <[u8; 4]>::try_from(bytes).map(i32::from_be_bytes) {
            match days {
                i32::MAX => Some("infinity"),
                i32::MIN => Some("-infinity"),
                _ => None,
            }
        } else {
            None
        }
    } else {
        // header: ndigits, weight, sign, dscale
        match bytes.get(4..6).map(|sign| u16::from_be_bytes([sign[0], sign[1]])) {
            Some(0xC000) => Some("NaN"),
            Some(0xD000) => Some("Infinity"),
            Some(0xF000) => Some("-Infinity"),
            _ => None,
        }
    };
    Ok(word)
}

/// NUMERIC at the scale PostgreSQL displays it with
fn numeric(row: &PgRow, idx: usize, raw: &PgValueRef<'_>) -> Result<BigDecimal, String> {
    let value: BigDecimal = get(row, idx)?;
    if raw.format() == PgValueFormat::Text {
        // parsing keeps every printed digit
        return Ok(value);
    }

    let bytes = raw.as_bytes().map_err(|e| e.to_string())?;
    let dscale = bytes
        .get(6..8)
        .map(|scale| u16::from_be_bytes([scale[0], scale[1]]))
        .ok_or_else(|| "truncated NUMERIC header".to_string())?;
    Ok(value.with_scale(i64::from(dscale)))
}

fn elements<T, F>(row: &PgRow, idx: usize, wrap: F) -> Option<ColumnValue>
where
    T: for<'r> Decode<'r, Postgres> + Type<Postgres>,
    F: Fn(T) -> ColumnValue,
{
    let values: Vec<Option<T>> = row.try_get_unchecked(idx).ok()?;
    Some(ColumnValue::Array(
        values
            .into_iter()
            .map(|value| value.map_or(ColumnValue::Null, &wrap))
            .collect(),
    ))
}

/// One-dimensional arrays of the scalar types above
fn decode_array(
    row: &PgRow,
    idx: usize,
    raw: &PgValueRef<'_>,
    type_name: &str,
) -> Option<ColumnValue> {
    if raw.format() == PgValueFormat::Text {
        // nested braces or explicit bounds such as `[0:1]={...}`
        let text = raw.as_str().ok()?;
        if !text.starts_with('{') || text.starts_with("{{") {
            return None;
        }
    }

    match type_name.trim_end_matches("[]") {
        "BOOL" => elements(row, idx, ColumnValue::Bool),
        "INT2" => elements(row, idx, |v: i16| ColumnValue::Integer(v.into())),
        "INT4" => elements(row, idx, |v: i32| ColumnValue::Integer(v.into())),
        "INT8" => elements(row, idx, ColumnValue::Integer),
        "FLOAT4" => elements(row, idx, |v: f32| ColumnValue::Float(v.into())),
        "FLOAT8" => elements(row, idx, ColumnValue::Float),
        "NUMERIC" => elements(row, idx, ColumnValue::Numeric),
        "TEXT" | "VARCHAR" | "CHAR" | "NAME" => elements(row, idx, ColumnValue::Text),
        "TIMESTAMPTZ" => elements(row, idx, ColumnValue::Timestamp),
        "TIMESTAMP" => elements(row, idx, ColumnValue::LocalTimestamp),
        "DATE" => elements(row, idx, ColumnValue::Date),
        "TIME" => elements(row, idx, ColumnValue::Time),
        "JSON" | "JSONB" => elements(row, idx, ColumnValue::Json),
        "UUID" => elements(row, idx, ColumnValue::Uuid),
        _ => None,
    }
}
