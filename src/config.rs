//! Configuration for the pagination middleware

use serde::{Deserialize, Serialize};
use sql_paging_core::Dialect;

/// What to do when the count statement fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountFailurePolicy {
   /// Log the failure and continue with the total count unchanged.
   ///
   /// Callers see an unknown total (see `PageState::is_total_known`), not an
   /// error.
   #[default]
   FailOpen,
   /// Return the failure to the caller.
   FailClosed,
}

/// Configuration for [`Pagination`](crate::Pagination)
///
/// # Examples
///
/// ```
/// use sqlx_sqlite_paging::{CountFailurePolicy, Dialect, PaginationConfig};
///
/// // Use defaults
/// let config = PaginationConfig::default();
///
/// // Override just one field
/// let config = PaginationConfig {
///     on_count_error: CountFailurePolicy::FailClosed,
///     ..Default::default()
/// };
///
/// // Load from host configuration; missing fields take their defaults
/// let config: PaginationConfig = serde_json::from_str(r#"{"dialect":"sqlite"}"#).unwrap();
/// assert_eq!(config.dialect, Dialect::Sqlite);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PaginationConfig {
   /// Syntax of the appended limit clause
   ///
   /// Default: `Dialect::Mysql` (`limit <offset>,<size>`, also valid in SQLite)
   pub dialect: Dialect,

   /// Behavior when the count statement fails
   ///
   /// Default: `CountFailurePolicy::FailOpen`
   pub on_count_error: CountFailurePolicy,

   /// Reject statements that cannot be wrapped or extended before running
   /// anything
   ///
   /// The check is lexical and best-effort. With it disabled, such statements
   /// surface as database syntax errors instead.
   ///
   /// Default: true
   pub check_statements: bool,
}

impl Default for PaginationConfig {
   fn default() -> Self {
      Self {
         dialect: Dialect::default(),
         on_count_error: CountFailurePolicy::default(),
         check_statements: true,
      }
   }
}
