//! Limit/offset clause syntax per target database.
//!
//! Databases disagree on how a row window is expressed. Each syntax family is
//! one [`LimitClauseBuilder`] implementation; [`Dialect`] names them so the
//! choice can come from configuration.
//!
//! | Dialect    | Clause                                          |
//! |------------|-------------------------------------------------|
//! | `mysql`    | ` limit <offset>,<limit>`                       |
//! | `sqlite`   | ` limit <limit> offset <offset>`                |
//! | `postgres` | ` limit <limit> offset <offset>`                |
//! | `ansi`     | ` offset <offset> rows fetch next <limit> rows only` |

use serde::{Deserialize, Serialize};

/// Renders the clause that restricts a statement to one window of rows.
///
/// The returned clause includes its leading space so it can be appended
/// directly to a statement.
pub trait LimitClauseBuilder: Send + Sync {
   fn limit_clause(&self, offset: u64, limit: u64) -> String;
}

/// MySQL offset-first form, `limit <offset>,<limit>`. SQLite accepts it too.
#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlLimit;

impl LimitClauseBuilder for MySqlLimit {
   fn limit_clause(&self, offset: u64, limit: u64) -> String {
      format!(" limit {},{}", offset, limit)
   }
}

/// `limit <limit> offset <offset>`, understood by SQLite and PostgreSQL.
#[derive(Debug, Clone, Copy, Default)]
pub struct LimitOffset;

impl LimitClauseBuilder for LimitOffset {
   fn limit_clause(&self, offset: u64, limit: u64) -> String {
      format!(" limit {} offset {}", limit, offset)
   }
}

/// SQL:2008 row window, used by SQL Server 2012+, Oracle 12c+ and Db2.
///
/// SQL Server only accepts it after an ORDER BY.
#[derive(Debug, Clone, Copy, Default)]
pub struct OffsetFetch;

impl LimitClauseBuilder for OffsetFetch {
   fn limit_clause(&self, offset: u64, limit: u64) -> String {
      format!(" offset {} rows fetch next {} rows only", offset, limit)
   }
}

/// Target database for limit clause generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dialect {
   #[default]
   Mysql,
   Sqlite,
   Postgres,
   /// SQL:2008 `OFFSET ... FETCH NEXT ...`
   Ansi,
}

impl Dialect {
   /// The clause builder for this dialect.
   pub fn builder(self) -> &'static dyn LimitClauseBuilder {
      match self {
         Dialect::Mysql => &MySqlLimit,
         Dialect::Sqlite | Dialect::Postgres => &LimitOffset,
         Dialect::Ansi => &OffsetFetch,
      }
   }
}

impl LimitClauseBuilder for Dialect {
   fn limit_clause(&self, offset: u64, limit: u64) -> String {
      self.builder().limit_clause(offset, limit)
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn mysql_is_offset_first() {
      assert_eq!(MySqlLimit.limit_clause(20, 10), " limit 20,10");
   }

   #[test]
   fn limit_offset_is_limit_first() {
      assert_eq!(LimitOffset.limit_clause(20, 10), " limit 10 offset 20");
   }

   #[test]
   fn offset_fetch_form() {
      assert_eq!(
         OffsetFetch.limit_clause(20, 10),
         " offset 20 rows fetch next 10 rows only"
      );
   }

   #[test]
   fn dialect_defaults_to_mysql() {
      assert_eq!(Dialect::default(), Dialect::Mysql);
      assert_eq!(Dialect::default().limit_clause(0, 5), " limit 0,5");
   }

   #[test]
   fn dialects_delegate_to_their_builder() {
      assert_eq!(Dialect::Sqlite.limit_clause(5, 5), " limit 5 offset 5");
      assert_eq!(Dialect::Postgres.limit_clause(5, 5), " limit 5 offset 5");
      assert_eq!(
         Dialect::Ansi.limit_clause(5, 5),
         " offset 5 rows fetch next 5 rows only"
      );
   }

   #[test]
   fn dialect_serde_names() {
      assert_eq!(serde_json::to_string(&Dialect::Mysql).unwrap(), "\"mysql\"");
      assert_eq!(
         serde_json::from_str::<Dialect>("\"postgres\"").unwrap(),
         Dialect::Postgres
      );
      assert_eq!(
         serde_json::from_str::<Dialect>("\"ansi\"").unwrap(),
         Dialect::Ansi
      );
      assert!(serde_json::from_str::<Dialect>("\"oracle\"").is_err());
   }
}
