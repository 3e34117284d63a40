//! Raw-SQL repositories (orders, documents).
//!
//! Statement texts live in [`super::statements`]; list queries are extended
//! by the textual composer, everything else binds positional values.

use anyhow::Context;
use chrono::{DateTime, Utc};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, QueryResult, Statement};
use uuid::Uuid;

use listing_core::{Page, PageParams, SortToken};
use listing_db::{QueryComposer, RawSql, RawSqlComposer};

use crate::domain::model::{Document, Order, UserShort};
use crate::domain::repo::{DocumentRecord, DocumentsRepository, OrderRecord, OrdersRepository};
use crate::infra::storage::statements::{
    COUNT_DOCUMENTS, COUNT_ORDERS, DELETE_DOCUMENT, DELETE_ORDER, GET_DOCUMENT, GET_DOCUMENTS,
    GET_ORDER, GET_ORDERS, INSERT_DOCUMENT, INSERT_ORDER, UPDATE_DOCUMENT,
};

fn order_from_row(row: &QueryResult) -> anyhow::Result<Order> {
    Ok(Order {
        id: row.try_get("", "id")?,
        amount: row.try_get("", "amount")?,
        created_at: row.try_get("", "created_at")?,
        payer: UserShort {
            id: row.try_get("", "payer_id")?,
            name: row.try_get("", "payer_name")?,
        },
        payee: UserShort {
            id: row.try_get("", "payee_id")?,
            name: row.try_get("", "payee_name")?,
        },
    })
}

fn document_from_row(row: &QueryResult) -> anyhow::Result<Document> {
    Ok(Document {
        id: row.try_get("", "id")?,
        document: row.try_get("", "document")?,
        created_at: row.try_get("", "created_at")?,
        last_updated_at: row.try_get("", "last_updated_at")?,
        user_id: row.try_get("", "user_id")?,
    })
}

pub struct RawSqlOrdersRepository {
    db: DatabaseConnection,
}

impl RawSqlOrdersRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    async fn total(&self, count_sql: &str) -> anyhow::Result<u64> {
        let row = self
            .db
            .query_one(Statement::from_string(self.backend(), count_sql))
            .await
            .context("count query failed")?
            .context("count query returned no row")?;
        let total: i64 = row.try_get("", "total")?;
        Ok(total as u64)
    }
}

#[async_trait::async_trait]
impl OrdersRepository for RawSqlOrdersRepository {
    async fn insert(&self, order: &OrderRecord) -> anyhow::Result<()> {
        let stmt = RawSql::new(INSERT_ORDER)
            .bind(order.id)
            .bind(order.amount)
            .bind(order.payer_id)
            .bind(order.payee_id)
            .bind(order.created_at)
            .into_statement(self.backend());
        self.db.execute(stmt).await.context("insert order failed")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let stmt = RawSql::new(GET_ORDER).bind(id).into_statement(self.backend());
        let row = self.db.query_one(stmt).await.context("find order failed")?;
        row.as_ref().map(order_from_row).transpose()
    }

    async fn list(&self, tokens: &[SortToken], page: &PageParams) -> anyhow::Result<Page<Order>> {
        let total = self.total(COUNT_ORDERS).await?;

        let query = RawSqlComposer.compose(RawSql::new(GET_ORDERS), tokens, page)?;
        let rows = self
            .db
            .query_all(query.into_statement(self.backend()))
            .await
            .context("list orders failed")?;
        let items = rows
            .iter()
            .map(order_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total, page)?)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let stmt = RawSql::new(DELETE_ORDER)
            .bind(id)
            .into_statement(self.backend());
        let res = self.db.execute(stmt).await.context("delete order failed")?;
        Ok(res.rows_affected() > 0)
    }
}

pub struct RawSqlDocumentsRepository {
    db: DatabaseConnection,
}

impl RawSqlDocumentsRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }
}

#[async_trait::async_trait]
impl DocumentsRepository for RawSqlDocumentsRepository {
    async fn insert(&self, document: &DocumentRecord) -> anyhow::Result<()> {
        let stmt = RawSql::new(INSERT_DOCUMENT)
            .bind(document.id)
            .bind(document.document.clone())
            .bind(document.created_at)
            .bind(document.user_id)
            .into_statement(self.backend());
        self.db
            .execute(stmt)
            .await
            .context("insert document failed")?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Document>> {
        let stmt = RawSql::new(GET_DOCUMENT)
            .bind(id)
            .into_statement(self.backend());
        let row = self
            .db
            .query_one(stmt)
            .await
            .context("find document failed")?;
        row.as_ref().map(document_from_row).transpose()
    }

    async fn list(
        &self,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> anyhow::Result<Page<Document>> {
        let row = self
            .db
            .query_one(Statement::from_string(self.backend(), COUNT_DOCUMENTS))
            .await
            .context("count documents failed")?
            .context("count query returned no row")?;
        let total: i64 = row.try_get("", "total")?;

        let query = RawSqlComposer.compose(RawSql::new(GET_DOCUMENTS), tokens, page)?;
        let rows = self
            .db
            .query_all(query.into_statement(self.backend()))
            .await
            .context("list documents failed")?;
        let items = rows
            .iter()
            .map(document_from_row)
            .collect::<anyhow::Result<Vec<_>>>()?;

        Ok(Page::assemble(items, total as u64, page)?)
    }

    async fn update(
        &self,
        id: Uuid,
        document: &serde_json::Value,
        last_updated_at: DateTime<Utc>,
    ) -> anyhow::Result<bool> {
        let stmt = RawSql::new(UPDATE_DOCUMENT)
            .bind(document.clone())
            .bind(last_updated_at)
            .bind(id)
            .into_statement(self.backend());
        let res = self
            .db
            .execute(stmt)
            .await
            .context("update document failed")?;
        Ok(res.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<bool> {
        let stmt = RawSql::new(DELETE_DOCUMENT)
            .bind(id)
            .into_statement(self.backend());
        let res = self
            .db
            .execute(stmt)
            .await
            .context("delete document failed")?;
        Ok(res.rows_affected() > 0)
    }
}
