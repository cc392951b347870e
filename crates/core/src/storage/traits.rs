use async_trait::async_trait;

use super::{ContinuationToken, EntityKey, QuerySegment, Result, RowFilter, StoredRow};

/// A partitioned key/value table store.
///
/// Tables are addressed by name and must be created before use; operations
/// on an unknown table fail with `RepositoryError::QueryFailed`.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Creates the table if it does not exist yet.
    ///
    /// Returns true if the table was created by this call.
    async fn create_table_if_not_exists(&self, table: &str) -> Result<bool>;

    /// Inserts the row, or replaces every property of the row with the same key.
    async fn upsert(&self, table: &str, row: StoredRow) -> Result<()>;

    /// Deletes the row stored under `key`.
    async fn delete(&self, table: &str, key: &EntityKey) -> Result<()>;

    /// Returns every row of the table.
    async fn scan(&self, table: &str) -> Result<Vec<StoredRow>>;

    /// Returns one page of the rows selected by `filter`, starting after
    /// `continuation` when given.
    async fn query_segment(
        &self,
        table: &str,
        filter: &RowFilter,
        continuation: Option<ContinuationToken>,
    ) -> Result<QuerySegment>;
}
