//! Backend strategies of the sortable-pagination layer (tokens in, SQL out).
//!
//! Token parsing and validation belong to `listing-core`; this crate only
//! consumes already-whitelisted [`listing_core::SortToken`]s and extends one
//! of three query representations: raw SQL text, a `sea_query` statement, or
//! a typed `sea_orm` select.

mod columns;
mod compose;
mod error;
mod paginate;
mod raw;

pub use columns::SortColumnMap;
pub use compose::{
    QueryComposer, RawSqlComposer, SelectComposer, SortPageExt, StatementComposer,
};
pub use error::{ComposeError, PageQueryError};
pub use paginate::paginate_select;
pub use raw::RawSql;
