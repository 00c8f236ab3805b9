//! Ordered bind values shared by a query and its derived statements

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sqlx::Sqlite;
use sqlx::query::Query;
use sqlx::sqlite::SqliteArguments;

/// Positional bind values of one statement.
///
/// The same values, in the same order, are bound to the original statement,
/// its count statement and its paged statement. The derived statements only
/// add text around or after the original, so every placeholder keeps its
/// position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoundParams(Vec<JsonValue>);

impl BoundParams {
   pub fn new() -> Self {
      Self(Vec::new())
   }

   /// Append the next positional value.
   pub fn push(&mut self, value: impl Into<JsonValue>) {
      self.0.push(value.into());
   }

   /// Builder-style [`BoundParams::push`].
   pub fn with(mut self, value: impl Into<JsonValue>) -> Self {
      self.push(value);
      self
   }

   pub fn len(&self) -> usize {
      self.0.len()
   }

   pub fn is_empty(&self) -> bool {
      self.0.is_empty()
   }

   pub fn iter(&self) -> std::slice::Iter<'_, JsonValue> {
      self.0.iter()
   }

   /// Bind every value, in order, to `query`.
   ///
   /// Text is bound by reference; only arrays and objects are copied.
   pub(crate) fn bind_all<'q>(
      &'q self,
      mut query: Query<'q, Sqlite, SqliteArguments<'q>>,
   ) -> Query<'q, Sqlite, SqliteArguments<'q>> {
      for value in &self.0 {
         query = bind_value(query, value);
      }
      query
   }
}

impl From<Vec<JsonValue>> for BoundParams {
   fn from(values: Vec<JsonValue>) -> Self {
      Self(values)
   }
}

impl FromIterator<JsonValue> for BoundParams {
   fn from_iter<I: IntoIterator<Item = JsonValue>>(iter: I) -> Self {
      Self(iter.into_iter().collect())
   }
}

impl<'a> IntoIterator for &'a BoundParams {
   type Item = &'a JsonValue;
   type IntoIter = std::slice::Iter<'a, JsonValue>;

   fn into_iter(self) -> Self::IntoIter {
      self.0.iter()
   }
}

/// Helper function to bind a JSON value to a SQLx query
pub(crate) fn bind_value<'a>(
   query: Query<'a, Sqlite, SqliteArguments<'a>>,
   value: &'a JsonValue,
) -> Query<'a, Sqlite, SqliteArguments<'a>> {
   match value {
      JsonValue::Null => query.bind(None::<JsonValue>),
      JsonValue::String(s) => query.bind(s.as_str()),
      JsonValue::Number(number) => {
         // Preserve integer precision by binding as i64 when possible
         if let Some(int_val) = number.as_i64() {
            query.bind(int_val)
         } else if let Some(uint_val) = number.as_u64() {
            // Only reached above i64::MAX; SQLite has no wider INTEGER, so
            // fall back to REAL (loses precision)
            query.bind(uint_val as f64)
         } else {
            query.bind(number.as_f64().unwrap_or_default())
         }
      }
      other => query.bind(other.clone()),
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use serde_json::json;

   #[test]
   fn keeps_insertion_order() {
      let params = BoundParams::new().with("tech").with(10).with(JsonValue::Null);

      let values: Vec<&JsonValue> = params.iter().collect();
      assert_eq!(values, vec![&json!("tech"), &json!(10), &JsonValue::Null]);
      assert_eq!(params.len(), 3);
   }

   #[test]
   fn from_vec_and_iter() {
      let from_vec = BoundParams::from(vec![json!(1), json!("a")]);
      let collected: BoundParams = vec![json!(1), json!("a")].into_iter().collect();

      assert_eq!(from_vec, collected);
      assert!(!from_vec.is_empty());
      assert!(BoundParams::default().is_empty());
   }

   #[test]
   fn serializes_as_plain_array() {
      let params = BoundParams::new().with(1).with("x");
      assert_eq!(serde_json::to_value(&params).unwrap(), json!([1, "x"]));

      let parsed: BoundParams = serde_json::from_str(r#"[true, 2.5]"#).unwrap();
      assert_eq!(parsed, BoundParams::from(vec![json!(true), json!(2.5)]));
   }
}
