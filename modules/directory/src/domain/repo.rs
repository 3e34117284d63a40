//! Repository ports of the directory module.
//!
//! Each entity family has its own port; the three families are backed by
//! different query-composition strategies (typed select, statement builder,
//! raw SQL), all behind the same kind of narrow trait. List operations take
//! already-validated sort tokens and page bounds — a port never sees raw
//! client input.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use listing_core::{Page, PageParams, SortToken};

use crate::domain::model::{
    Company, Document, LinkWithCompany, LinkWithUser, Order, Profession, User, UserCompanyLink,
};

/// Insert shape for users (flat foreign key; the domain `User` embeds the
/// joined profession instead).
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub profession_id: Uuid,
}

#[derive(Debug, Clone)]
pub struct UserUpdateRecord {
    pub name: String,
    pub profession_id: Uuid,
    pub last_updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct OrderRecord {
    pub id: Uuid,
    pub amount: Decimal,
    pub payer_id: Uuid,
    pub payee_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct DocumentRecord {
    pub id: Uuid,
    pub document: serde_json::Value,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

#[async_trait::async_trait]
pub trait ProfessionsRepository: Send + Sync {
    async fn insert(&self, profession: &Profession) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Profession>>;
    async fn list(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> anyhow::Result<Page<Profession>>;
    /// Returns false when no row matched.
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait::async_trait]
pub trait UsersRepository: Send + Sync {
    async fn insert(&self, user: &UserRecord) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>>;
    async fn list(&self, tokens: &[SortToken], page: &PageParams) -> anyhow::Result<Page<User>>;
    async fn update(&self, id: Uuid, update: &UserUpdateRecord) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait::async_trait]
pub trait CompaniesRepository: Send + Sync {
    async fn insert(&self, company: &Company) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Company>>;
    async fn list(&self, tokens: &[SortToken], page: &PageParams)
        -> anyhow::Result<Page<Company>>;
    async fn update(
        &self,
        id: Uuid,
        name: &str,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait::async_trait]
pub trait OrdersRepository: Send + Sync {
    async fn insert(&self, order: &OrderRecord) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>>;
    async fn list(&self, tokens: &[SortToken], page: &PageParams) -> anyhow::Result<Page<Order>>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait::async_trait]
pub trait DocumentsRepository: Send + Sync {
    async fn insert(&self, document: &DocumentRecord) -> anyhow::Result<()>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Document>>;
    async fn list(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> anyhow::Result<Page<Document>>;
    async fn update(
        &self,
        id: Uuid,
        document: &serde_json::Value,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool>;
    async fn delete(&self, id: Uuid) -> anyhow::Result<bool>;
}

#[async_trait::async_trait]
pub trait LinksRepository: Send + Sync {
    async fn insert(&self, link: &UserCompanyLink) -> anyhow::Result<()>;
    async fn exists(&self, user_id: Uuid, company_id: Uuid) -> anyhow::Result<bool>;
    async fn delete(&self, user_id: Uuid, company_id: Uuid) -> anyhow::Result<bool>;
    /// Link listings are paginated but not sortable.
    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &PageParams,
    ) -> anyhow::Result<Page<LinkWithCompany>>;
    async fn list_by_company(
        &self,
        company_id: Uuid,
        page: &PageParams,
    ) -> anyhow::Result<Page<LinkWithUser>>;
}
