//! # sql-paging-core
//!
//! Database-independent pieces of offset pagination with a total row count.
//!
//! ## Core Types
//!
//! - **[`PageState`]**: page number, page size and the total row count applied after counting
//! - **[`LimitClauseBuilder`]**: strategy rendering a limit/offset clause for one database
//! - **[`Dialect`]**: configurable choice among the built-in clause builders
//! - **[`Paginator`]**: count and paged statement builders bound to a clause builder
//! - **[`Error`]**: error type for page parameters and statement checks
//!
//! ## Statements
//!
//! - [`build_count_statement`] wraps a SELECT as `select count(1) from (...)`
//! - [`build_paged_statement`] appends the row window for a page
//! - [`check_statement`] rejects statements that cannot be wrapped or extended

mod check;
mod dialect;
mod error;
mod page_state;
mod paginator;

pub use check::check_statement;
pub use dialect::{Dialect, LimitClauseBuilder, LimitOffset, MySqlLimit, OffsetFetch};
pub use error::{Error, Result};
pub use page_state::PageState;
pub use paginator::{
   Paginator, build_count_statement, build_paged_statement, build_paged_statement_with,
};
