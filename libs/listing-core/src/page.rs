use serde::{Deserialize, Serialize};

use crate::error::Error;

pub const DEFAULT_LIMIT: u64 = 10;
pub const MAX_LIMIT: u64 = 50;
pub const MAX_OFFSET: u64 = 1000;

/// Bounded limit/offset pair, validated at construction.
///
/// Out-of-range input fails instead of being clamped; handlers turn the
/// failure into a client error before any query runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageParams {
    limit: u64,
    offset: u64,
}

impl PageParams {
    pub fn new(limit: Option<u64>, offset: Option<u64>) -> Result<Self, Error> {
        let limit = limit.unwrap_or(DEFAULT_LIMIT);
        let offset = offset.unwrap_or(0);
        if limit < 1 || limit > MAX_LIMIT {
            return Err(Error::LimitOutOfRange(limit));
        }
        if offset > MAX_OFFSET {
            return Err(Error::OffsetOutOfRange(offset));
        }
        Ok(Self { limit, offset })
    }

    pub fn limit(&self) -> u64 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }
}

/// One bounded, ordered slice of a larger result set.
///
/// `total_count` comes from an independent count query and may observe a
/// different snapshot than `items` under concurrent writes; the two reads
/// are deliberately not transactionally consistent.
#[cfg_attr(feature = "with-utoipa", derive(utoipa::ToSchema))]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub items_count: u64,
    pub total_count: u64,
    pub limit: u64,
    pub offset: u64,
}

impl<T> Page<T> {
    /// Assemble the response envelope. Pure; `items_count` is computed.
    ///
    /// Fails only when the composer handed back more rows than `limit`,
    /// which is a programming error, not a user-facing one.
    pub fn assemble(items: Vec<T>, total_count: u64, page: &PageParams) -> Result<Self, Error> {
        let items_count = items.len() as u64;
        if items_count > page.limit() {
            return Err(Error::PageOverflow {
                items: items_count,
                limit: page.limit(),
            });
        }
        Ok(Self {
            items,
            items_count,
            total_count,
            limit: page.limit(),
            offset: page.offset(),
        })
    }

    /// Whether pages remain past this one. Derived, never stored.
    pub fn has_more(&self) -> bool {
        self.offset + self.items_count < self.total_count
    }

    /// Map items while preserving the envelope (domain -> DTO convenience).
    pub fn map_items<U>(self, mut f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(&mut f).collect(),
            items_count: self.items_count,
            total_count: self.total_count,
            limit: self.limit,
            offset: self.offset,
        }
    }
}
