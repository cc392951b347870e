use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use icebreaker_core::storage::{
    ContinuationToken, EntityKey, Properties, QuerySegment, RepositoryError, Result, RowFilter,
    StoredRow, TableStore,
};

/// Rows examined per filtered scan segment unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: usize = 1000;

type Table = BTreeMap<EntityKey, Properties>;

/// In-memory table store.
///
/// Clones share the same tables. Rows are kept in key order, and filtered
/// scans walk the table in that order, examining at most `page_size` rows per
/// segment.
#[derive(Debug, Clone)]
pub struct InMemoryTableStore {
    tables: Arc<RwLock<HashMap<String, Table>>>,
    page_size: usize,
    unavailable: Arc<AtomicBool>,
    tables_created: Arc<AtomicUsize>,
}

impl Default for InMemoryTableStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTableStore {
    /// Creates a store without any tables.
    pub fn new() -> Self {
        Self {
            tables: Arc::new(RwLock::new(HashMap::new())),
            page_size: DEFAULT_PAGE_SIZE,
            unavailable: Arc::new(AtomicBool::new(false)),
            tables_created: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Sets how many rows a filtered scan segment examines. Minimum 1.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// While set, every operation fails as if the backing service were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of tables actually created (not counting calls for existing tables).
    pub fn tables_created(&self) -> usize {
        self.tables_created.load(Ordering::SeqCst)
    }

    /// Number of rows in `table`, or `None` if the table does not exist.
    pub async fn row_count(&self, table: &str) -> Option<usize> {
        self.tables.read().await.get(table).map(BTreeMap::len)
    }

    fn check_available(&self) -> Result<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::QueryFailed(
                "Table store unavailable".to_string(),
            ));
        }
        Ok(())
    }
}

fn table_not_found(table: &str) -> RepositoryError {
    RepositoryError::QueryFailed(format!("Table not found: {table}"))
}

fn encode_token(key: &EntityKey) -> Result<ContinuationToken> {
    serde_json::to_string(key)
        .map(ContinuationToken::new)
        .map_err(|e| RepositoryError::Serialization(e.to_string()))
}

fn decode_token(token: &ContinuationToken) -> Result<EntityKey> {
    serde_json::from_str(token.as_str())
        .map_err(|e| RepositoryError::InvalidData(format!("Invalid continuation token: {e}")))
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn create_table_if_not_exists(&self, table: &str) -> Result<bool> {
        self.check_available()?;

        let mut tables = self.tables.write().await;
        if tables.contains_key(table) {
            return Ok(false);
        }
        tables.insert(table.to_string(), Table::new());
        self.tables_created.fetch_add(1, Ordering::SeqCst);
        Ok(true)
    }

    async fn upsert(&self, table: &str, row: StoredRow) -> Result<()> {
        self.check_available()?;

        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        rows.insert(row.key, row.properties);
        Ok(())
    }

    async fn delete(&self, table: &str, key: &EntityKey) -> Result<()> {
        self.check_available()?;

        let mut tables = self.tables.write().await;
        let rows = tables.get_mut(table).ok_or_else(|| table_not_found(table))?;
        if rows.remove(key).is_none() {
            return Err(RepositoryError::NotFound {
                table: table.to_string(),
                id: key.partition_key.clone(),
            });
        }
        Ok(())
    }

    async fn scan(&self, table: &str) -> Result<Vec<StoredRow>> {
        self.check_available()?;

        let tables = self.tables.read().await;
        let rows = tables.get(table).ok_or_else(|| table_not_found(table))?;
        Ok(rows
            .iter()
            .map(|(key, properties)| StoredRow::new(key.clone(), properties.clone()))
            .collect())
    }

    async fn query_segment(
        &self,
        table: &str,
        filter: &RowFilter,
        continuation: Option<ContinuationToken>,
    ) -> Result<QuerySegment> {
        self.check_available()?;

        let start = match &continuation {
            Some(token) => Bound::Excluded(decode_token(token)?),
            None => Bound::Unbounded,
        };
        let take = filter.take.unwrap_or(usize::MAX);

        let tables = self.tables.read().await;
        let rows = tables.get(table).ok_or_else(|| table_not_found(table))?;

        let mut segment = QuerySegment::default();
        let mut examined = 0;
        let mut remaining = rows
            .range::<EntityKey, _>((start, Bound::Unbounded))
            // Rows are ordered by partition; nothing past the filtered one can match.
            .take_while(|(key, _)| key.partition_key <= filter.partition_key)
            .peekable();

        while let Some((key, properties)) = remaining.next() {
            examined += 1;
            if filter.matches(key) {
                segment
                    .rows
                    .push(StoredRow::new(key.clone(), properties.clone()));
            }

            if examined >= self.page_size || segment.rows.len() >= take {
                if remaining.peek().is_some() {
                    segment.continuation = Some(encode_token(key)?);
                }
                break;
            }
        }

        Ok(segment)
    }
}
