//! Total row count execution

use sqlx::{Executor, Row, Sqlite};
use tracing::debug;

use crate::params::BoundParams;
use crate::{Error, Result};

/// Run a count statement and return the value in its first column.
///
/// `params` must be the bind values of the statement the count was derived
/// from, in the same order. A result with no rows counts as 0.
///
/// The prepared statement and its cursor live inside the sqlx future and are
/// released when it completes, fails or is dropped.
///
/// Bind, execution and decode failures are returned as
/// [`Error::CountQueryFailed`]; a negative count as
/// [`Error::InvalidTotalCount`].
pub async fn fetch_total_count<'c, E>(
   count_sql: &str,
   params: &BoundParams,
   executor: E,
) -> Result<u64>
where
   E: Executor<'c, Database = Sqlite>,
{
   debug!(sql = %count_sql, params = params.len(), "Executing count statement");

   let query = params.bind_all(sqlx::query(count_sql));
   let row = query
      .fetch_optional(executor)
      .await
      .map_err(Error::CountQueryFailed)?;

   let Some(row) = row else {
      debug!(sql = %count_sql, "Count statement returned no rows");
      return Ok(0);
   };

   let count: i64 = row.try_get(0).map_err(Error::CountQueryFailed)?;
   u64::try_from(count).map_err(|_| Error::InvalidTotalCount(count))
}
