//! SQLite row to JSON decoding

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use sqlx::sqlite::{SqliteRow, SqliteValueRef};
use sqlx::{Column, Row, TypeInfo, Value, ValueRef};

use crate::Error;

/// Convert one SQLite value to JSON.
///
/// INTEGER stays an integer, REAL becomes a float (NaN/inf become `null`),
/// TEXT and date/time affinities become strings, BLOB becomes base64.
pub(crate) fn to_json(v: SqliteValueRef<'_>) -> Result<JsonValue, Error> {
   if v.is_null() {
      return Ok(JsonValue::Null);
   }

   let value = ValueRef::to_owned(&v);
   let decoded = match value.type_info().name() {
      "TEXT" | "DATE" | "TIME" | "DATETIME" => {
         JsonValue::String(value.try_decode_unchecked::<String>()?)
      }
      "INTEGER" | "BOOLEAN" => JsonValue::from(value.try_decode_unchecked::<i64>()?),
      "REAL" | "NUMERIC" => {
         let float = value.try_decode_unchecked::<f64>()?;
         serde_json::Number::from_f64(float)
            .map(JsonValue::Number)
            .unwrap_or(JsonValue::Null)
      }
      "BLOB" => {
         let bytes = value.try_decode_unchecked::<Vec<u8>>()?;
         JsonValue::String(STANDARD.encode(bytes))
      }
      other => return Err(Error::UnsupportedDatatype(other.to_string())),
   };

   Ok(decoded)
}

/// Helper to decode SQLite rows to JSON, keeping column order
pub(crate) fn decode_rows(rows: Vec<SqliteRow>) -> Result<Vec<IndexMap<String, JsonValue>>, Error> {
   let mut values = Vec::with_capacity(rows.len());
   for row in rows {
      let mut value = IndexMap::default();
      for (i, column) in row.columns().iter().enumerate() {
         let v = row.try_get_raw(i)?;
         let v = to_json(v)?;
         value.insert(column.name().to_string(), v);
      }
      values.push(value);
   }
   Ok(values)
}
