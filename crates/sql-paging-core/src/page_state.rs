//! Per-request page parameters and the computed total row count

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Page number, page size and total row count for one paginated request.
///
/// Created by the caller before the query runs. The total count starts at 0
/// and is set once the count statement resolves; after that it only ever
/// changes through another [`PageState::apply_total_count`].
///
/// A total of 0 with [`PageState::is_total_known`] returning `false` means the
/// count was never applied (for instance a swallowed count failure), not that
/// the query matched no rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawPageState")]
pub struct PageState {
   page_number: u64,
   page_size: u64,
   total_count: u64,
   #[serde(skip)]
   total_known: bool,
}

impl PageState {
   /// Create the state for a 1-based page number and a page size.
   pub fn new(page_number: u64, page_size: u64) -> Result<Self> {
      if page_number == 0 {
         return Err(Error::InvalidPageNumber);
      }
      if page_size == 0 {
         return Err(Error::InvalidPageSize);
      }
      (page_number - 1)
         .checked_mul(page_size)
         .ok_or(Error::OffsetOverflow {
            page_number,
            page_size,
         })?;

      Ok(Self {
         page_number,
         page_size,
         total_count: 0,
         total_known: false,
      })
   }

   pub fn page_number(&self) -> u64 {
      self.page_number
   }

   pub fn page_size(&self) -> u64 {
      self.page_size
   }

   /// Total row count of the unpaginated query, 0 until a count is applied.
   pub fn total_count(&self) -> u64 {
      self.total_count
   }

   /// Whether a count has been applied to this state.
   pub fn is_total_known(&self) -> bool {
      self.total_known
   }

   /// Number of rows skipped before this page: `(page_number - 1) * page_size`.
   pub fn offset(&self) -> u64 {
      // Overflow is rejected in `new`
      (self.page_number - 1) * self.page_size
   }

   /// Record the total row count, replacing any previous value.
   pub fn apply_total_count(&mut self, count: u64) {
      self.total_count = count;
      self.total_known = true;
   }
}

/// Unvalidated wire form of [`PageState`].
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawPageState {
   page_number: u64,
   page_size: u64,
   #[serde(default)]
   total_count: Option<u64>,
}

impl TryFrom<RawPageState> for PageState {
   type Error = Error;

   fn try_from(raw: RawPageState) -> Result<Self> {
      let mut state = PageState::new(raw.page_number, raw.page_size)?;
      if let Some(count) = raw.total_count {
         state.apply_total_count(count);
      }
      Ok(state)
   }
}
