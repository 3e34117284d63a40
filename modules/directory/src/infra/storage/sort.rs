//! Sortable-field whitelists and typed column maps, one per entity.
//!
//! The [`SortSpec`] constants are the single source of truth for which
//! identifiers client ordering may reference; the column maps mirror them
//! for the typed-select strategy. Keeping both next to each other makes a
//! registry/column mismatch easy to spot in review, and the repository
//! tests cross-check them.

use listing_core::{SortSpec, SortSpecRegistry};
use listing_db::SortColumnMap;

use crate::infra::storage::entity::{professions, users};

pub const PROFESSION_SORT: SortSpec = SortSpec::new("profession", &["name"]);
pub const USER_SORT: SortSpec = SortSpec::new("user", &["name", "created_at", "last_updated_at"]);
pub const COMPANY_SORT: SortSpec =
    SortSpec::new("company", &["name", "created_at", "last_updated_at"]);
pub const ORDER_SORT: SortSpec = SortSpec::new("order", &["amount"]);
pub const DOCUMENT_SORT: SortSpec = SortSpec::new("document", &["created_at", "last_updated_at"]);
/// Link listings are paginated but not sortable.
pub const LINK_SORT: SortSpec = SortSpec::new("link", &[]);

/// Build the process-wide registry, once, at startup.
pub fn sort_registry() -> SortSpecRegistry {
    SortSpecRegistry::new()
        .register(PROFESSION_SORT)
        .register(USER_SORT)
        .register(COMPANY_SORT)
        .register(ORDER_SORT)
        .register(DOCUMENT_SORT)
        .register(LINK_SORT)
}

pub fn profession_sort_columns() -> SortColumnMap<professions::Entity> {
    SortColumnMap::new().insert("name", professions::Column::Name)
}

pub fn user_sort_columns() -> SortColumnMap<users::Entity> {
    SortColumnMap::new()
        .insert("name", users::Column::Name)
        .insert("created_at", users::Column::CreatedAt)
        .insert("last_updated_at", users::Column::LastUpdatedAt)
}
