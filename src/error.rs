/// Result type alias for pagination operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for paginated queries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
   /// Error from SQLx operations.
   #[error(transparent)]
   Sqlx(#[from] sqlx::Error),

   /// Invalid page parameters or a statement that cannot be paginated.
   #[error(transparent)]
   Paging(#[from] sql_paging_core::Error),

   /// The derived count statement failed to bind, execute or decode.
   #[error("count query failed: {0}")]
   CountQueryFailed(#[source] sqlx::Error),

   /// The count statement returned a negative value.
   #[error("count query returned a negative total: {0}")]
   InvalidTotalCount(i64),

   /// SQLite type that cannot be mapped to JSON.
   #[error("unsupported datatype: {0}")]
   UnsupportedDatatype(String),
}

impl Error {
   /// Extract a structured error code from the error type.
   ///
   /// This provides machine-readable error codes for error handling.
   pub fn error_code(&self) -> String {
      match self {
         Error::Sqlx(e) => sqlx_error_code(e, "SQLX_ERROR"),
         Error::Paging(e) => match e {
            sql_paging_core::Error::InvalidPageNumber => "INVALID_PAGE_NUMBER".to_string(),
            sql_paging_core::Error::InvalidPageSize => "INVALID_PAGE_SIZE".to_string(),
            sql_paging_core::Error::OffsetOverflow { .. } => "OFFSET_OVERFLOW".to_string(),
            sql_paging_core::Error::MalformedStatement { .. } => "MALFORMED_STATEMENT".to_string(),
         },
         Error::CountQueryFailed(e) => sqlx_error_code(e, "COUNT_QUERY_FAILED"),
         Error::InvalidTotalCount(_) => "INVALID_TOTAL_COUNT".to_string(),
         Error::UnsupportedDatatype(_) => "UNSUPPORTED_DATATYPE".to_string(),
      }
   }
}

/// `SQLITE_<code>` for database errors, `fallback` otherwise.
fn sqlx_error_code(e: &sqlx::Error, fallback: &str) -> String {
   if let Some(code) = e.as_database_error().and_then(|db_err| db_err.code()) {
      return format!("SQLITE_{}", code);
   }
   fallback.to_string()
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_error_code_sqlx_non_database() {
      // RowNotFound is not a database error, so no SQLite code
      let err = Error::Sqlx(sqlx::Error::RowNotFound);
      assert_eq!(err.error_code(), "SQLX_ERROR");
   }

   #[test]
   fn test_error_code_count_query_failed() {
      let err = Error::CountQueryFailed(sqlx::Error::RowNotFound);
      assert_eq!(err.error_code(), "COUNT_QUERY_FAILED");
      assert!(err.to_string().starts_with("count query failed"));
   }

   #[test]
   fn test_error_code_paging() {
      let err = Error::from(sql_paging_core::Error::InvalidPageNumber);
      assert_eq!(err.error_code(), "INVALID_PAGE_NUMBER");

      let err = Error::from(sql_paging_core::Error::InvalidPageSize);
      assert_eq!(err.error_code(), "INVALID_PAGE_SIZE");
      assert!(err.to_string().contains("greater than zero"));

      let err = Error::from(sql_paging_core::Error::OffsetOverflow {
         page_number: 9,
         page_size: 3,
      });
      assert_eq!(err.error_code(), "OFFSET_OVERFLOW");
   }

   #[test]
   fn test_error_code_malformed_statement() {
      let err = Error::from(sql_paging_core::Error::MalformedStatement {
         reason: "statement terminator is not allowed",
      });
      assert_eq!(err.error_code(), "MALFORMED_STATEMENT");
      assert!(err.to_string().contains("terminator"));
   }

   #[test]
   fn test_error_code_invalid_total_count() {
      let err = Error::InvalidTotalCount(-3);
      assert_eq!(err.error_code(), "INVALID_TOTAL_COUNT");
      assert!(err.to_string().contains("-3"));
   }

   #[test]
   fn test_error_code_unsupported_datatype() {
      let err = Error::UnsupportedDatatype("WEIRD".into());
      assert_eq!(err.error_code(), "UNSUPPORTED_DATATYPE");
   }
}
