//! Query builders over a connection pool

use std::future::{Future, IntoFuture};
use std::pin::Pin;

use sql_paging_core::PageState;
use sqlx::SqlitePool;

use crate::Error;
use crate::pagination::{Page, Pagination};
use crate::params::BoundParams;

/// Builder for one page of an offset-paginated SELECT
///
/// Created by [`Pagination::page`]. The count and the page query run on the
/// same pooled connection, which is returned to the pool when the builder's
/// future finishes or is dropped.
pub struct FetchPageBuilder {
   pagination: Pagination,
   pool: SqlitePool,
   query: String,
   values: BoundParams,
   state: PageState,
}

impl FetchPageBuilder {
   pub(crate) fn new(
      pagination: Pagination,
      pool: SqlitePool,
      query: String,
      values: BoundParams,
      state: PageState,
   ) -> Self {
      Self {
         pagination,
         pool,
         query,
         values,
         state,
      }
   }

   /// Bind one more positional value
   pub fn bind(mut self, value: impl Into<serde_json::Value>) -> Self {
      self.values.push(value);
      self
   }

   /// Execute the count and page queries and return the page
   pub async fn execute(self) -> Result<Page, Error> {
      let mut conn = self.pool.acquire().await?;

      self
         .pagination
         .fetch_page(&mut conn, &self.query, &self.values, self.state)
         .await
   }
}

impl IntoFuture for FetchPageBuilder {
   type Output = Result<Page, Error>;
   type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

   fn into_future(self) -> Self::IntoFuture {
      Box::pin(self.execute())
   }
}
