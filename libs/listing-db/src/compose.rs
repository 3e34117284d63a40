//! Sort/pagination composition over concrete query representations.
//!
//! One strategy per backend kind, all honoring the same contract: tokens are
//! applied in the order given, each with NULLS LAST regardless of direction,
//! and LIMIT/OFFSET is appended last, unconditionally. The caller picks the
//! strategy; nothing here inspects the query's semantic content.

use sea_orm::sea_query::{Alias, NullOrdering, Order, SelectStatement};
use sea_orm::{EntityTrait, QueryOrder, QuerySelect, Select};

use listing_core::{PageParams, SortDir, SortToken};

use crate::columns::SortColumnMap;
use crate::error::ComposeError;
use crate::raw::RawSql;

/// Strategy interface: extend a base query with `ORDER BY ... NULLS LAST`
/// and `LIMIT/OFFSET`, returning the same representation it was given.
pub trait QueryComposer {
    type Query;

    fn compose(
        &self,
        query: Self::Query,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Self::Query, ComposeError>;
}

fn order(dir: SortDir) -> Order {
    match dir {
        SortDir::Asc => Order::Asc,
        SortDir::Desc => Order::Desc,
    }
}

/// Textual strategy: appends literal clauses to [`RawSql`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSqlComposer;

impl QueryComposer for RawSqlComposer {
    type Query = RawSql;

    fn compose(
        &self,
        query: RawSql,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<RawSql, ComposeError> {
        Ok(query.order_by(tokens).paginate(page))
    }
}

/// Fragment strategy: composes onto a `sea_query::SelectStatement`.
///
/// Field names become dynamic identifiers; the builder's escaping is a
/// second safety layer on top of the whitelist.
#[derive(Debug, Clone, Copy, Default)]
pub struct StatementComposer;

impl QueryComposer for StatementComposer {
    type Query = SelectStatement;

    fn compose(
        &self,
        mut query: SelectStatement,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<SelectStatement, ComposeError> {
        for token in tokens {
            query.order_by_with_nulls(
                Alias::new(token.field.as_str()),
                order(token.dir),
                NullOrdering::Last,
            );
        }
        query.limit(page.limit()).offset(page.offset());
        Ok(query)
    }
}

/// Extension methods for the structured strategy on `Select<E>`.
pub trait SortPageExt<E: EntityTrait>: Sized {
    fn apply_sort(
        self,
        tokens: &[SortToken],
        columns: &SortColumnMap<E>,
    ) -> Result<Self, ComposeError>;

    fn apply_page(self, page: &PageParams) -> Self;
}

impl<E> SortPageExt<E> for Select<E>
where
    E: EntityTrait,
    E::Column: Copy,
{
    fn apply_sort(
        mut self,
        tokens: &[SortToken],
        columns: &SortColumnMap<E>,
    ) -> Result<Self, ComposeError> {
        for token in tokens {
            let col = columns.resolve(&token.field)?;
            self = self.order_by_with_nulls(col, order(token.dir), NullOrdering::Last);
        }
        Ok(self)
    }

    fn apply_page(self, page: &PageParams) -> Self {
        self.limit(page.limit()).offset(page.offset())
    }
}

/// Structured strategy: resolves each field to a typed `E::Column` through
/// the entity's [`SortColumnMap`] before ordering.
pub struct SelectComposer<'a, E: EntityTrait> {
    columns: &'a SortColumnMap<E>,
}

impl<'a, E: EntityTrait> SelectComposer<'a, E> {
    pub fn new(columns: &'a SortColumnMap<E>) -> Self {
        Self { columns }
    }
}

impl<E> QueryComposer for SelectComposer<'_, E>
where
    E: EntityTrait,
    E::Column: Copy,
{
    type Query = Select<E>;

    fn compose(
        &self,
        query: Select<E>,
        tokens: &[SortToken],
        page: &PageParams,
    ) -> Result<Select<E>, ComposeError> {
        Ok(query.apply_sort(tokens, self.columns)?.apply_page(page))
    }
}
