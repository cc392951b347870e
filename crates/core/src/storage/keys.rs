//! Composite row keys.
//!
//! Pure functions, no side effects.

use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Two-part key locating a row inside a table.
///
/// Ordering is partition first, then row, matching the lexical order the
/// backing stores return rows in.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityKey {
    pub partition_key: String,
    pub row_key: String,
}

impl EntityKey {
    pub fn new(partition_key: impl Into<String>, row_key: impl Into<String>) -> Self {
        Self {
            partition_key: partition_key.into(),
            row_key: row_key.into(),
        }
    }

    /// Key for a record whose partition and row key are both its natural id.
    pub fn for_id(id: &str) -> Self {
        Self::new(id, id)
    }
}

/// A record type stored one row per natural id.
///
/// The id lives in a single field on the record; both key components are
/// derived from it when the record crosses the storage boundary.
pub trait TableEntity: Serialize + DeserializeOwned + Send + Sync {
    /// Human readable name used in logs and errors.
    const ENTITY_TYPE: &'static str;

    /// Serialized property name of the natural id.
    const ID_PROPERTY: &'static str;

    fn natural_id(&self) -> &str;

    fn key(&self) -> EntityKey {
        EntityKey::for_id(self.natural_id())
    }
}
