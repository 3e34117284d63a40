use thiserror::Error;

/// Failure while composing ORDER BY / LIMIT / OFFSET onto a query.
///
/// Distinct from user-input errors: a validated token that still cannot be
/// resolved means the column map and the sort whitelist disagree, which is a
/// defect in wiring, not in the request. Callers must fail fast (5xx), never
/// degrade to an unordered query.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("order_by field '{0}' has no column mapping")]
    UnmappedField(String),
}

/// Errors of the one-shot page/count combiner.
#[derive(Debug, Error)]
pub enum PageQueryError {
    #[error(transparent)]
    Compose(#[from] ComposeError),

    #[error(transparent)]
    Envelope(#[from] listing_core::Error),

    #[error("database error: {0}")]
    Db(#[from] sea_orm::DbErr),
}
