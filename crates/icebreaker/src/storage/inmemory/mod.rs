//! In-memory table store.
//!
//! Tables are ordered maps wrapped in `Arc<RwLock<_>>`. Data is not persisted
//! and is lost when the last clone of the store is dropped.
//!
//! # Example
//!
//! ```rust,ignore
//! use icebreaker::storage::inmemory::InMemoryTableStore;
//!
//! let store = InMemoryTableStore::new().with_page_size(100);
//! store.create_table_if_not_exists("teams").await?;
//! ```

mod connector;
mod store;

pub use connector::InMemoryConnector;
pub use store::InMemoryTableStore;
