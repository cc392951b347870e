//! Filtered scan types.

use std::fmt;

use super::{EntityKey, StoredRow};

/// Comparison applied to the row key of a filtered scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyComparison {
    Equal,
    LessThan,
}

impl KeyComparison {
    /// Returns true if `actual` compares to `target` as this comparison requires.
    pub fn matches(self, actual: &str, target: &str) -> bool {
        match self {
            KeyComparison::Equal => actual == target,
            KeyComparison::LessThan => actual < target,
        }
    }

    /// Operator used in key condition expressions.
    pub fn operator(self) -> &'static str {
        match self {
            KeyComparison::Equal => "=",
            KeyComparison::LessThan => "<",
        }
    }
}

/// Row selection for a filtered scan: partition key equality combined with a
/// row key comparison, optionally capped at `take` rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowFilter {
    pub partition_key: String,
    pub row_key: String,
    pub row_comparison: KeyComparison,
    pub take: Option<usize>,
}

impl RowFilter {
    /// Filter used to look up a single record by its natural id.
    ///
    /// Selects `PartitionKey == id AND RowKey < id`, one row. A row whose two
    /// key parts both equal `id` does not satisfy the row key condition, so a
    /// record stored under its own id is never returned by this filter.
    pub fn point_lookup(id: &str) -> Self {
        Self {
            partition_key: id.to_string(),
            row_key: id.to_string(),
            row_comparison: KeyComparison::LessThan,
            take: Some(1),
        }
    }

    /// Returns true if a row stored under `key` is selected by this filter.
    pub fn matches(&self, key: &EntityKey) -> bool {
        key.partition_key == self.partition_key
            && self.row_comparison.matches(&key.row_key, &self.row_key)
    }
}

/// Opaque cursor pointing at the next page of a filtered scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationToken(String);

impl ContinuationToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContinuationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One page of a filtered scan.
///
/// A segment may be empty and still carry a continuation token.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QuerySegment {
    pub rows: Vec<StoredRow>,
    pub continuation: Option<ContinuationToken>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_lookup_shape() {
        let filter = RowFilter::point_lookup("team-1");
        assert_eq!(filter.partition_key, "team-1");
        assert_eq!(filter.row_key, "team-1");
        assert_eq!(filter.row_comparison, KeyComparison::LessThan);
        assert_eq!(filter.take, Some(1));
    }

    #[test]
    fn test_point_lookup_skips_row_stored_under_same_id() {
        // Keys derived from the natural id are never strictly less than it.
        let filter = RowFilter::point_lookup("team-1");
        assert!(!filter.matches(&EntityKey::for_id("team-1")));
    }

    #[test]
    fn test_point_lookup_matches_smaller_row_in_same_partition() {
        let filter = RowFilter::point_lookup("team-5");
        assert!(filter.matches(&EntityKey::new("team-5", "team-1")));
        assert!(!filter.matches(&EntityKey::new("team-5", "team-9")));
        assert!(!filter.matches(&EntityKey::new("team-4", "team-1")));
    }

    #[test]
    fn test_equal_comparison() {
        assert!(KeyComparison::Equal.matches("a", "a"));
        assert!(!KeyComparison::Equal.matches("a", "b"));
        assert_eq!(KeyComparison::Equal.operator(), "=");
        assert_eq!(KeyComparison::LessThan.operator(), "<");
    }
}
