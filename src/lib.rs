//! # sqlx-sqlite-paging
//!
//! Offset pagination with total row counts for SQLite over sqlx.
//!
//! A host query pipeline hands a SELECT, its bind values and a [`PageState`]
//! to [`Pagination`]. The middleware runs `select count(1) from (<sql>)` with
//! the same bind values, applies the total to the page state and runs (or
//! returns) the statement with a limit clause appended.
//!
//! ## Core Types
//!
//! - **[`Pagination`]**: middleware invoked explicitly by the host
//! - **[`PaginationConfig`]**: dialect, count failure policy and statement checking
//! - **[`BoundParams`]**: ordered bind values shared by a statement and its derived statements
//! - **[`PageState`]**: page number, page size and total count
//! - **[`Page`]**: decoded rows together with their page state
//! - **[`Error`]**: error type for pagination operations
//!
//! Statement derivation lives in `sql-paging-core` and is re-exported here.

mod builders;
mod config;
mod count;
mod decode;
mod error;
mod pagination;
mod params;

pub use builders::FetchPageBuilder;
pub use config::{CountFailurePolicy, PaginationConfig};
pub use count::fetch_total_count;
pub use error::{Error, Result};
pub use pagination::{Page, PagedStatements, Pagination, apply_pagination};
pub use params::BoundParams;

pub use sql_paging_core::{
   Dialect, LimitClauseBuilder, LimitOffset, MySqlLimit, OffsetFetch, PageState, Paginator,
   build_count_statement, build_paged_statement, build_paged_statement_with, check_statement,
};
