//! Table store backends.
//!
//! Backends are selected at compile time via feature flags and can be
//! enabled together:
//!
//! - `inmemory` (default): in-process table store, used by tests and local runs
//! - `dynamodb`: AWS DynamoDB table store using `aws-sdk-dynamodb`
//!
//! Build with DynamoDB:
//! ```bash
//! cargo build -p icebreaker --features dynamodb
//! ```

#[cfg(not(any(feature = "inmemory", feature = "dynamodb")))]
compile_error!(
    "No storage backend selected. Enable 'inmemory' or 'dynamodb' feature. \
    Example: cargo build -p icebreaker --features dynamodb"
);

mod lookup;

#[cfg(feature = "inmemory")]
pub mod inmemory;

#[cfg(feature = "dynamodb")]
pub mod dynamodb;

use std::sync::Arc;

use async_trait::async_trait;
use icebreaker_core::storage::{Result, TableStore};

use crate::config::StoreSettings;

pub use lookup::{query_single_entity, query_single_item};

#[cfg(feature = "inmemory")]
pub use inmemory::{InMemoryConnector, InMemoryTableStore};

#[cfg(feature = "dynamodb")]
pub use dynamodb::{DynamoDbConnector, DynamoDbTableStore};

/// Opens a connection to a table store.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self, settings: &StoreSettings) -> Result<Arc<dyn TableStore>>;
}
