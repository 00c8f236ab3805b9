//! Error types for sql-paging-core

use thiserror::Error;

/// Errors that may occur when building paginated statements
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
   /// Page numbers are 1-based
   #[error("page number must be at least 1")]
   InvalidPageNumber,

   /// Page size must be greater than zero
   #[error("page size must be greater than zero")]
   InvalidPageSize,

   /// The row offset for these page parameters does not fit in a `u64`
   #[error("offset overflows for page {page_number} with page size {page_size}")]
   OffsetOverflow { page_number: u64, page_size: u64 },

   /// The statement cannot be safely wrapped in a count query or have a
   /// limit clause appended to it.
   ///
   /// Detection is best-effort; a statement that passes the check may still
   /// be rejected by the database.
   #[error("malformed statement: {reason}")]
   MalformedStatement { reason: &'static str },
}

/// A type alias for Results with our Error type
pub type Result<T> = std::result::Result<T, Error>;
