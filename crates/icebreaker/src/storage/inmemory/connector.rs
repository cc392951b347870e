use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use icebreaker_core::storage::{Result, TableStore};

use super::InMemoryTableStore;
use crate::config::StoreSettings;
use crate::storage::StoreConnector;

/// Hands out a shared [`InMemoryTableStore`]; credentials are not checked.
#[derive(Debug, Clone, Default)]
pub struct InMemoryConnector {
    store: InMemoryTableStore,
    connections: Arc<AtomicUsize>,
}

impl InMemoryConnector {
    pub fn new(store: InMemoryTableStore) -> Self {
        Self {
            store,
            connections: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The store every connection points at.
    pub fn store(&self) -> &InMemoryTableStore {
        &self.store
    }

    /// Number of times `connect` was called.
    pub fn connections(&self) -> usize {
        self.connections.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    async fn connect(&self, settings: &StoreSettings) -> Result<Arc<dyn TableStore>> {
        self.connections.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(account = %settings.account_name, "Connecting to in-memory table store");
        Ok(Arc::new(self.store.clone()))
    }
}
