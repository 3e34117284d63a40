//! Directory module: CRUD for users, professions, companies, orders,
//! documents, and the many-to-many user/company link.
//!
//! The module deliberately backs its entity families with three different
//! query-composition strategies (typed selects, statement fragments, raw
//! SQL) behind one set of repository ports, all sharing the
//! `listing-core` / `listing-db` sortable-pagination layer.

pub mod api;
pub mod domain;
pub mod infra;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use listing_core::SortSpecRegistry;

use crate::domain::service::{Repositories, Service};
use crate::infra::storage::orm_repo::{SeaOrmProfessionsRepository, SeaOrmUsersRepository};
use crate::infra::storage::raw_repo::{RawSqlDocumentsRepository, RawSqlOrdersRepository};
use crate::infra::storage::sort::sort_registry;
use crate::infra::storage::stmt_repo::{StatementCompaniesRepository, StatementLinksRepository};

pub use crate::api::rest::routes::router;
pub use crate::infra::storage::schema::ensure_schema;

/// Shared per-process state handed to every handler.
pub struct DirectoryState {
    pub service: Service,
    pub specs: SortSpecRegistry,
}

/// Wire the repositories (one strategy per entity family) and build the
/// module state.
pub fn build_state(db: DatabaseConnection) -> Arc<DirectoryState> {
    let repos = Repositories {
        professions: Arc::new(SeaOrmProfessionsRepository::new(db.clone())),
        users: Arc::new(SeaOrmUsersRepository::new(db.clone())),
        companies: Arc::new(StatementCompaniesRepository::new(db.clone())),
        orders: Arc::new(RawSqlOrdersRepository::new(db.clone())),
        documents: Arc::new(RawSqlDocumentsRepository::new(db.clone())),
        links: Arc::new(StatementLinksRepository::new(db)),
    };

    Arc::new(DirectoryState {
        service: Service::new(repos),
        specs: sort_registry(),
    })
}
