//! Core of the sortable-pagination layer: ordering-token parsing and
//! validation, per-entity whitelists, bounded limit/offset, and the page
//! response envelope.
//!
//! Everything here is pure and stateless after startup; query composition
//! against concrete backends lives in `listing-db`.

mod error;
mod page;
mod registry;
mod sort;

pub use error::Error;
pub use page::{Page, PageParams, DEFAULT_LIMIT, MAX_LIMIT, MAX_OFFSET};
pub use registry::{SortSpec, SortSpecRegistry};
pub use sort::{
    check_conflicts, dedupe_tokens, parse_order_by, validate_order_by, SortDir, SortToken,
};
