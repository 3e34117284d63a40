use thiserror::Error;

/// Unified error type for sort/pagination validation and page assembly.
///
/// Everything except [`Error::PageOverflow`] is a client-input error and maps
/// to a 4xx response; `PageOverflow` indicates a composer defect and must be
/// treated as an internal error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("unsupported order_by field: {0}")]
    UnknownField(String),

    #[error("entity '{0}' has no sortable fields")]
    UnsortableEntity(String),

    #[error(
        "conflicting order_by fields requested in both directions: {}",
        .0.join(", ")
    )]
    ConflictingFields(Vec<String>),

    #[error("malformed order_by token: '{0}'")]
    MalformedToken(String),

    #[error("limit out of range: {0}")]
    LimitOutOfRange(u64),

    #[error("offset out of range: {0}")]
    OffsetOutOfRange(u64),

    #[error("page overflow: {items} items exceed limit {limit}")]
    PageOverflow { items: u64, limit: u64 },
}

impl Error {
    /// Internal errors indicate a defect in a composer or registry, not bad
    /// client input. They must never be surfaced as a validation failure.
    pub fn is_internal(&self) -> bool {
        matches!(self, Error::PageOverflow { .. })
    }
}
