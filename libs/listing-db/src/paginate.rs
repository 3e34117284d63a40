use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait, Select};

use listing_core::{Page, PageParams, SortToken};

use crate::columns::SortColumnMap;
use crate::compose::{QueryComposer, SelectComposer};
use crate::error::PageQueryError;

/// One-shot page/count combiner for the structured strategy.
///
/// Runs the composed page query and an independent `COUNT(*)` over the
/// unpaginated, unsorted base select. The two reads may observe different
/// snapshots under concurrent writes; that weak consistency is accepted.
pub async fn paginate_select<E, C, D, F>(
    select: Select<E>,
    conn: &C,
    tokens: &[SortToken],
    page: &PageParams,
    columns: &SortColumnMap<E>,
    model_to_domain: F,
) -> Result<Page<D>, PageQueryError>
where
    E: EntityTrait,
    E::Column: Copy,
    E::Model: Send + Sync,
    C: ConnectionTrait,
    F: Fn(E::Model) -> D,
{
    let total = select.clone().count(conn).await?;

    let rows = SelectComposer::new(columns)
        .compose(select, tokens, page)?
        .all(conn)
        .await?;
    tracing::debug!(total, rows = rows.len(), "fetched page");

    let items = rows.into_iter().map(model_to_domain).collect();
    Ok(Page::assemble(items, total, page)?)
}
