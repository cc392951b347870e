//! DynamoDB table store.
//!
//! Each logical table is a DynamoDB table keyed by `PK` (hash) and `SK`
//! (range), holding the row's partition and row key respectively.

mod client;
mod conversions;
mod error;
mod store;

pub use client::{create_client, DynamoDbConnector};
pub use store::DynamoDbTableStore;
