//! Offset pagination middleware.
//!
//! [`Pagination`] is what a host's query pipeline calls, explicitly, when it
//! is about to run a SELECT whose caller asked for a page. Given the
//! statement, its bind values and a [`PageState`], it:
//!
//! 1. derives `select count(1) from (<sql>)` and runs it with the same bind
//!    values,
//! 2. applies the count to the page state (or handles the failure according
//!    to [`CountFailurePolicy`]),
//! 3. returns `<sql>` with the dialect's limit clause appended, or runs it and
//!    returns the decoded page.
//!
//! # Example
//!
//! ```no_run
//! use serde_json::json;
//! use sqlx_sqlite_paging::{BoundParams, PageState, Pagination};
//!
//! # async fn run(pool: sqlx::SqlitePool) -> sqlx_sqlite_paging::Result<()> {
//! let pagination = Pagination::default();
//! let page = pagination
//!    .page(
//!       pool,
//!       "SELECT id, name FROM users WHERE active = $1",
//!       BoundParams::from(vec![json!(1)]),
//!       PageState::new(3, 10)?,
//!    )
//!    .await?;
//!
//! println!("{} of {} users", page.rows.len(), page.state.total_count());
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value as JsonValue;
use sql_paging_core::{LimitClauseBuilder, PageState, Paginator, check_statement};
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, warn};

use crate::builders::FetchPageBuilder;
use crate::config::{CountFailurePolicy, PaginationConfig};
use crate::count::fetch_total_count;
use crate::decode::decode_rows;
use crate::params::BoundParams;
use crate::Result;

/// Count and paged statements derived from one base statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagedStatements {
   /// `select count(1) from (<sql>)`
   pub count: String,
   /// `<sql>` followed by the limit clause for the page
   pub paged: String,
}

/// One page of results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
   /// The rows in this page, columns in select order
   pub rows: Vec<IndexMap<String, JsonValue>>,
   /// Page parameters with the total count applied (when counting succeeded)
   pub state: PageState,
}

/// Offset pagination middleware for SQLite connections.
///
/// Cloning is cheap; clones share the limit clause builder.
#[derive(Debug, Clone)]
pub struct Pagination {
   config: Arc<PaginationConfig>,
   paginator: Paginator,
}

impl Pagination {
   /// Middleware using the dialect named in `config`.
   pub fn new(config: PaginationConfig) -> Self {
      let paginator = Paginator::new(config.dialect);
      Self {
         config: Arc::new(config),
         paginator,
      }
   }

   /// Middleware using a host-supplied limit clause builder instead of the
   /// configured dialect.
   pub fn with_limit_builder(
      config: PaginationConfig,
      builder: Arc<dyn LimitClauseBuilder>,
   ) -> Self {
      Self {
         config: Arc::new(config),
         paginator: Paginator::with_builder(builder),
      }
   }

   pub fn config(&self) -> &PaginationConfig {
      &self.config
   }

   /// Derive the count and paged statements for `sql`.
   ///
   /// Runs the statement check first when `check_statements` is enabled.
   pub fn prepare(&self, sql: &str, state: &PageState) -> Result<PagedStatements> {
      if self.config.check_statements {
         check_statement(sql)?;
      }

      Ok(PagedStatements {
         count: self.paginator.count_statement(sql),
         paged: self.paginator.paged_statement(sql, state),
      })
   }

   /// Count the rows `sql` matches, apply the total to `state`, and return the
   /// paged statement to run in place of `sql`.
   ///
   /// `params` are the bind values of `sql`; they are bound unchanged to the
   /// count statement and stay valid for the returned statement.
   ///
   /// Under [`CountFailurePolicy::FailOpen`] a failing count is logged and
   /// `state` keeps its previous total. Under
   /// [`CountFailurePolicy::FailClosed`] the error is returned and `state` is
   /// untouched.
   pub async fn apply(
      &self,
      conn: &mut SqliteConnection,
      sql: &str,
      params: &BoundParams,
      state: &mut PageState,
   ) -> Result<String> {
      let statements = self.prepare(sql, state)?;

      match fetch_total_count(&statements.count, params, &mut *conn).await {
         Ok(total) => {
            state.apply_total_count(total);
            debug!(
               total,
               page_number = state.page_number(),
               page_size = state.page_size(),
               "Applied total count"
            );
         }
         Err(e) => match self.config.on_count_error {
            CountFailurePolicy::FailOpen => {
               warn!(
                  error = %e,
                  sql = %statements.count,
                  "Count statement failed; continuing without a total count"
               );
            }
            CountFailurePolicy::FailClosed => return Err(e),
         },
      }

      Ok(statements.paged)
   }

   /// Count, then fetch one page of `sql` on the same connection.
   pub async fn fetch_page(
      &self,
      conn: &mut SqliteConnection,
      sql: &str,
      params: &BoundParams,
      mut state: PageState,
   ) -> Result<Page> {
      let paged = self.apply(conn, sql, params, &mut state).await?;

      let rows = params
         .bind_all(sqlx::query(&paged))
         .fetch_all(&mut *conn)
         .await?;

      Ok(Page {
         rows: decode_rows(rows)?,
         state,
      })
   }

   /// Builder that fetches one page using a connection from `pool`.
   pub fn page(
      &self,
      pool: SqlitePool,
      sql: impl Into<String>,
      params: impl Into<BoundParams>,
      state: PageState,
   ) -> FetchPageBuilder {
      FetchPageBuilder::new(self.clone(), pool, sql.into(), params.into(), state)
   }
}

impl Default for Pagination {
   fn default() -> Self {
      Self::new(PaginationConfig::default())
   }
}

/// Count `sql` and apply the total to `state`, returning the paged statement.
///
/// Shorthand for [`Pagination::apply`] with the default configuration.
pub async fn apply_pagination(
   conn: &mut SqliteConnection,
   sql: &str,
   params: &BoundParams,
   state: &mut PageState,
) -> Result<String> {
   Pagination::default().apply(conn, sql, params, state).await
}
