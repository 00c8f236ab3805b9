//! Count and paged statement derivation.
//!
//! Both derivations are textual: the input statement is never parsed, only
//! wrapped or extended. Callers must pass a single top-level SELECT without a
//! trailing terminator (see [`crate::check_statement`] for a best-effort
//! check). Malformed input yields a malformed derived statement, which the
//! database reports when it runs.
//!
//! # Example
//!
//! ```
//! use sql_paging_core::{PageState, build_count_statement, build_paged_statement};
//!
//! let sql = "SELECT * FROM users WHERE active=1";
//! let state = PageState::new(3, 10).unwrap();
//!
//! assert_eq!(
//!    build_count_statement(sql),
//!    "select count(1) from (SELECT * FROM users WHERE active=1)"
//! );
//! assert_eq!(
//!    build_paged_statement(sql, &state),
//!    "SELECT * FROM users WHERE active=1 limit 20,10"
//! );
//! ```

use std::fmt;
use std::sync::Arc;

use tracing::trace;

use crate::dialect::{Dialect, LimitClauseBuilder};
use crate::page_state::PageState;

/// Wrap `sql` as `select count(1) from (<sql>)`, leaving it verbatim.
///
/// No derived-table alias is emitted, so the target database must accept an
/// unaliased subquery (SQLite does), and must accept any ORDER BY the inner
/// statement carries.
pub fn build_count_statement(sql: &str) -> String {
   format!("select count(1) from ({})", sql)
}

/// Append the default (MySQL-style) limit clause for `state` to `sql`.
pub fn build_paged_statement(sql: &str, state: &PageState) -> String {
   build_paged_statement_with(sql, state, &Dialect::default())
}

/// Append the limit clause produced by `builder` for `state` to `sql`.
pub fn build_paged_statement_with(
   sql: &str,
   state: &PageState,
   builder: &dyn LimitClauseBuilder,
) -> String {
   let clause = builder.limit_clause(state.offset(), state.page_size());
   let mut paged = String::with_capacity(sql.len() + clause.len());
   paged.push_str(sql);
   paged.push_str(&clause);
   paged
}

/// Statement builders bound to one limit-clause strategy.
#[derive(Clone)]
pub struct Paginator {
   limit: Arc<dyn LimitClauseBuilder>,
}

impl Paginator {
   /// Paginator for one of the built-in dialects.
   pub fn new(dialect: Dialect) -> Self {
      Self {
         limit: Arc::new(dialect),
      }
   }

   /// Paginator with a host-supplied clause builder.
   pub fn with_builder(builder: Arc<dyn LimitClauseBuilder>) -> Self {
      Self { limit: builder }
   }

   pub fn count_statement(&self, sql: &str) -> String {
      let count = build_count_statement(sql);
      trace!(sql = %count, "Built count statement");
      count
   }

   pub fn paged_statement(&self, sql: &str, state: &PageState) -> String {
      let paged = build_paged_statement_with(sql, state, self.limit.as_ref());
      trace!(
         sql = %paged,
         offset = state.offset(),
         limit = state.page_size(),
         "Built paged statement"
      );
      paged
   }
}

impl Default for Paginator {
   fn default() -> Self {
      Self::new(Dialect::default())
   }
}

impl fmt::Debug for Paginator {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_struct("Paginator").finish_non_exhaustive()
   }
}

#[cfg(test)]
mod tests {
   use super::*;
   use crate::dialect::{LimitOffset, OffsetFetch};

   const USERS: &str = "SELECT * FROM users WHERE active=1";

   #[test]
   fn count_statement_wraps_verbatim() {
      assert_eq!(
         build_count_statement(USERS),
         "select count(1) from (SELECT * FROM users WHERE active=1)"
      );
   }

   #[test]
   fn count_statement_keeps_inner_whitespace_and_case() {
      let sql = "select a,\n   b from t\twhere x = ?";
      let count = build_count_statement(sql);

      assert!(count.starts_with("select count(1) from ("));
      assert!(count.ends_with(')'));
      assert_eq!(&count["select count(1) from (".len()..count.len() - 1], sql);
   }

   #[test]
   fn paged_statement_third_page() {
      let state = PageState::new(3, 10).unwrap();
      assert_eq!(
         build_paged_statement(USERS, &state),
         "SELECT * FROM users WHERE active=1 limit 20,10"
      );
   }

   #[test]
   fn paged_statement_first_page() {
      let state = PageState::new(1, 5).unwrap();
      assert_eq!(
         build_paged_statement("SELECT * FROM t", &state),
         "SELECT * FROM t limit 0,5"
      );
   }

   #[test]
   fn paged_statement_offset_and_limit_for_all_pages() {
      let sql = "SELECT id FROM t";
      for page_number in 1..=12u64 {
         for page_size in 1..=9u64 {
            let state = PageState::new(page_number, page_size).unwrap();
            let expected = format!("{} limit {},{}", sql, (page_number - 1) * page_size, page_size);
            assert_eq!(build_paged_statement(sql, &state), expected);
         }
      }
   }

   #[test]
   fn builders_are_idempotent() {
      let state = PageState::new(4, 25).unwrap();

      assert_eq!(
         build_paged_statement(USERS, &state),
         build_paged_statement(USERS, &state)
      );
      assert_eq!(build_count_statement(USERS), build_count_statement(USERS));
   }

   #[test]
   fn paged_statement_ignores_total_count() {
      let mut state = PageState::new(2, 10).unwrap();
      let before = build_paged_statement(USERS, &state);
      state.apply_total_count(1000);

      assert_eq!(build_paged_statement(USERS, &state), before);
   }

   #[test]
   fn paged_statement_with_other_builders() {
      let state = PageState::new(3, 10).unwrap();

      assert_eq!(
         build_paged_statement_with(USERS, &state, &LimitOffset),
         "SELECT * FROM users WHERE active=1 limit 10 offset 20"
      );
      assert_eq!(
         build_paged_statement_with(USERS, &state, &OffsetFetch),
         "SELECT * FROM users WHERE active=1 offset 20 rows fetch next 10 rows only"
      );
   }

   #[test]
   fn paginator_uses_its_dialect() {
      let state = PageState::new(2, 3).unwrap();

      assert_eq!(
         Paginator::default().paged_statement("SELECT 1", &state),
         "SELECT 1 limit 3,3"
      );
      assert_eq!(
         Paginator::new(Dialect::Postgres).paged_statement("SELECT 1", &state),
         "SELECT 1 limit 3 offset 3"
      );
   }

   struct TopN;

   impl LimitClauseBuilder for TopN {
      fn limit_clause(&self, offset: u64, limit: u64) -> String {
         format!(" /* rows {}..{} */", offset, offset + limit)
      }
   }

   #[test]
   fn paginator_accepts_custom_builder() {
      let paginator = Paginator::with_builder(Arc::new(TopN));
      let state = PageState::new(2, 10).unwrap();

      assert_eq!(
         paginator.paged_statement("SELECT 1", &state),
         "SELECT 1 /* rows 10..20 */"
      );
      assert_eq!(
         paginator.count_statement("SELECT 1"),
         "select count(1) from (SELECT 1)"
      );
   }
}
