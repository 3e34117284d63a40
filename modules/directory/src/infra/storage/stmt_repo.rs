//! Statement-builder repositories (companies, user-company links).
//!
//! Queries are assembled as `sea_query` fragments and rendered per backend;
//! the fragment composer appends ordering and pagination.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Alias, Asterisk, Expr, Func, Query, SelectStatement};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, EntityName, QueryResult};
use uuid::Uuid;

use listing_core::{Page, PageParams, SortToken};
use listing_db::{QueryComposer, StatementComposer};

use crate::domain::model::{
    Company, CompanyShort, LinkWithCompany, LinkWithUser, UserCompanyLink, UserShort,
};
use crate::domain::repo::{CompaniesRepository, LinksRepository};
use crate::infra::storage::entity::{companies, user_company_links as links, users};

fn company_from_row(row: &QueryResult) -> anyhow::Result<Company> {
    Ok(Company {
        id: row.try_get("", "id")?,
        name: row.try_get("", "name")?,
        created_at: row.try_get("", "created_at")?,
        last_updated_at: row.try_get("", "last_updated_at")?,
    })
}

pub struct StatementCompaniesRepository {
    db: DatabaseConnection,
}

impl StatementCompaniesRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    fn base_select() -> SelectStatement {
        let mut stmt = Query::select();
        stmt.columns([
            companies::Column::Id,
            companies::Column::Name,
            companies::Column::CreatedAt,
            companies::Column::LastUpdatedAt,
        ])
        .from(companies::Entity.table_ref());
        stmt
    }
}

#[async_trait::async_trait]
impl CompaniesRepository for StatementCompaniesRepository {
    async fn insert(&self, company: &Company) -> anyhow::Result<()> {
        let mut insert = Query::insert();
        insert
            .into_table(companies::Entity.table_ref())
            .columns([
                companies::Column::Id,
                companies::Column::Name,
                companies::Column::CreatedAt,
                companies::Column::LastUpdatedAt,
            ])
            .values([
                company.id.into(),
                company.name.clone().into(),
                company.created_at.into(),
                company.last_updated_at.into(),
            ])
            .context("build company insert")?;
        self.db
            .execute(self.backend().build(&insert))
            .await
            .context("insert company failed")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Company>> {
        let mut select = Self::base_select();
        select.and_where(Expr::col(companies::Column::Id).eq(id));
        let row = self
            .db
            .query_one(self.backend().build(&select))
            .await
            .context("find company failed")?;
        row.as_ref().map(company_from_row).transpose()
    }

    async fn list(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> anyhow::Result<Page<Company>> {
        let mut count = Query::select();
        count
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .from(companies::Entity.table_ref());
        let total: i64 = self
            .db
            .query_one(self.backend().build(&count))
            .await
            .context("count companies failed")?
            .context("count query returned no row")?
            .try_get("", "total")?;

        let select = StatementComposer.compose(Self::base_select(), tokens, page)?;
        let rows = self
            .db
            .query_all(self.backend().build(&select))
            .await
            .context("list companies failed")?;
        let items = rows
            .iter()
            .map(company_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total as u64, page)?)
    }

    async fn update(
        &self,
        id: Uuid,
        name: &str,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let mut update = Query::update();
        update
            .table(companies::Entity.table_ref())
            .values([
                (companies::Column::Name, name.into()),
                (
                    companies::Column::LastUpdatedAt,
                    Some(last_updated_at).into(),
                ),
            ])
            .and_where(Expr::col(companies::Column::Id).eq(id));
        let res = self
            .db
            .execute(self.backend().build(&update))
            .await
            .context("update company failed")?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let mut delete = Query::delete();
        delete
            .from_table(companies::Entity.table_ref())
            .and_where(Expr::col(companies::Column::Id).eq(id));
        let res = self
            .db
            .execute(self.backend().build(&delete))
            .await
            .context("delete company failed")?;
        Ok(res.rows_affected() > 0)
    }
}

pub struct StatementLinksRepository {
    db: DatabaseConnection,
}

impl StatementLinksRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    async fn count_where(&self, col: links::Column, id: Uuid) -> anyhow::Result<u64> {
        let mut count = Query::select();
        count
            .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("total"))
            .from(links::Entity.table_ref())
            .and_where(Expr::col(col).eq(id));
        let total: i64 = self
            .db
            .query_one(self.backend().build(&count))
            .await
            .context("count links failed")?
            .context("count query returned no row")?
            .try_get("", "total")?;
        Ok(total as u64)
    }
}

#[async_trait::async_trait]
impl LinksRepository for StatementLinksRepository {
    async fn insert(&self, link: &UserCompanyLink) -> anyhow::Result<()> {
        let mut insert = Query::insert();
        insert
            .into_table(links::Entity.table_ref())
            .columns([
                links::Column::UserId,
                links::Column::CompanyId,
                links::Column::CreatedAt,
            ])
            .values([
                link.user_id.into(),
                link.company_id.into(),
                link.created_at.into(),
            ])
            .context("build link insert")?;
        self.db
            .execute(self.backend().build(&insert))
            .await
            .context("insert link failed")?;
        Ok(())
    }

    async fn exists(&self, user_id: Uuid, company_id: Uuid) -> anyhow::Result<bool> {
        let mut select = Query::select();
        select
            .expr(Expr::val(1))
            .from(links::Entity.table_ref())
            .and_where(Expr::col(links::Column::UserId).eq(user_id))
            .and_where(Expr::col(links::Column::CompanyId).eq(company_id));
        let row = self
            .db
            .query_one(self.backend().build(&select))
            .await
            .context("link lookup failed")?;
        Ok(row.is_some())
    }

    async fn delete(&self, user_id: Uuid, company_id: Uuid) -> anyhow::Result<bool> {
        let mut delete = Query::delete();
        delete
            .from_table(links::Entity.table_ref())
            .and_where(Expr::col(links::Column::UserId).eq(user_id))
            .and_where(Expr::col(links::Column::CompanyId).eq(company_id));
        let res = self
            .db
            .execute(self.backend().build(&delete))
            .await
            .context("delete link failed")?;
        Ok(res.rows_affected() > 0)
    }

    async fn list_by_user(
        &self,
        user_id: Uuid,
        page: &PageParams,
    ) -> anyhow::Result<Page<LinkWithCompany>> {
        let total = self.count_where(links::Column::UserId, user_id).await?;

        let mut select = Query::select();
        select
            .column((links::Entity, links::Column::UserId))
            .column((links::Entity, links::Column::CreatedAt))
            .expr_as(
                Expr::col((companies::Entity, companies::Column::Id)),
                Alias::new("company_id"),
            )
            .expr_as(
                Expr::col((companies::Entity, companies::Column::Name)),
                Alias::new("company_name"),
            )
            .from(links::Entity.table_ref())
            .inner_join(
                companies::Entity.table_ref(),
                Expr::col((links::Entity, links::Column::CompanyId))
                    .equals((companies::Entity, companies::Column::Id)),
            )
            .and_where(Expr::col((links::Entity, links::Column::UserId)).eq(user_id));

        // Link listings are unsortable; pagination still applies.
        let select = StatementComposer.compose(select, &[], page)?;
        let rows = self
            .db
            .query_all(self.backend().build(&select))
            .await
            .context("list links by user failed")?;

        let items = rows
            .iter()
            .map(|row| {
                Ok(LinkWithCompany {
                    user_id: row.try_get("", "user_id")?,
                    company: CompanyShort {
                        id: row.try_get("", "company_id")?,
                        name: row.try_get("", "company_name")?,
                    },
                    created_at: row.try_get("", "created_at")?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total, page)?)
    }

    async fn list_by_company(
        &self,
        company_id: Uuid,
        page: &PageParams,
    ) -> anyhow::Result<Page<LinkWithUser>> {
        let total = self.count_where(links::Column::CompanyId, company_id).await?;

        let mut select = Query::select();
        select
            .column((links::Entity, links::Column::CompanyId))
            .column((links::Entity, links::Column::CreatedAt))
            .expr_as(
                Expr::col((users::Entity, users::Column::Id)),
                Alias::new("user_id"),
            )
            .expr_as(
                Expr::col((users::Entity, users::Column::Name)),
                Alias::new("user_name"),
            )
            .from(links::Entity.table_ref())
            .inner_join(
                users::Entity.table_ref(),
                Expr::col((links::Entity, links::Column::UserId))
                    .equals((users::Entity, users::Column::Id)),
            )
            .and_where(Expr::col((links::Entity, links::Column::CompanyId)).eq(company_id));

        let select = StatementComposer.compose(select, &[], page)?;
        let rows = self
            .db
            .query_all(self.backend().build(&select))
            .await
            .context("list links by company failed")?;

        let items = rows
            .iter()
            .map(|row| {
                Ok(LinkWithUser {
                    company_id: row.try_get("", "company_id")?,
                    user: UserShort {
                        id: row.try_get("", "user_id")?,
                        name: row.try_get("", "user_name")?,
                    },
                    created_at: row.try_get("", "created_at")?,
                })
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total, page)?)
    }
}
