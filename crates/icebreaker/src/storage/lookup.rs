//! Single-row lookups over paged filtered scans.

use icebreaker_core::storage::{
    row_to_entity, Result, RowFilter, StoredRow, TableEntity, TableStore,
};

/// Looks up a single row by natural id using [`RowFilter::point_lookup`].
///
/// Follows continuation tokens until a segment yields a row or the pages run
/// out. Segments may be empty while still pointing at a next page.
pub async fn query_single_item(
    store: &dyn TableStore,
    table: &str,
    id: &str,
) -> Result<Option<StoredRow>> {
    let filter = RowFilter::point_lookup(id);
    let mut continuation = None;

    loop {
        let segment = store.query_segment(table, &filter, continuation).await?;

        if let Some(row) = segment.rows.into_iter().next() {
            return Ok(Some(row));
        }

        match segment.continuation {
            Some(token) => continuation = Some(token),
            None => return Ok(None),
        }
    }
}

/// Typed variant of [`query_single_item`].
pub async fn query_single_entity<T: TableEntity>(
    store: &dyn TableStore,
    table: &str,
    id: &str,
) -> Result<Option<T>> {
    query_single_item(store, table, id)
        .await?
        .map(row_to_entity)
        .transpose()
}
