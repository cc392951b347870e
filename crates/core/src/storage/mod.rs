//! Storage contracts shared by every table store backend.
//!
//! Rows are addressed by a two-part [`EntityKey`]. For the bot's records both
//! parts are the record's natural id, see [`TableEntity`].

mod conversions;
mod error;
mod keys;
mod query;
mod traits;

pub use conversions::{entity_to_row, row_to_entity, Properties, StoredRow};
pub use error::{RepositoryError, Result};
pub use keys::{EntityKey, TableEntity};
pub use query::{ContinuationToken, KeyComparison, QuerySegment, RowFilter};
pub use traits::TableStore;
