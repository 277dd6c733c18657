//! Pagination metadata for list endpoints.
//!
//! List endpoints take `limit` and `offset` query parameters, validated by the
//! request's own schema, and answer with the page plus a [`PaginationMeta`].
//!
//! # Example JSON Response
//!
//! ```json
//! {
//!   "data": [...],
//!   "meta": { "total": 42, "limit": 10, "offset": 20, "has_more": true }
//! }
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_LIMIT: i64 = 20;
pub const MAX_LIMIT: i64 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationMeta {
    /// Total number of items across all pages
    pub total: i64,
    /// Maximum items per page (the limit that was applied)
    pub limit: i64,
    /// Number of items skipped
    pub offset: i64,
    /// Whether there are more items after this page
    pub has_more: bool,
}

impl PaginationMeta {
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_more_when_items_remain() {
        let meta = PaginationMeta::new(42, 10, 20);
        assert!(meta.has_more);
    }

    #[test]
    fn test_last_page_has_no_more() {
        let meta = PaginationMeta::new(42, 10, 40);
        assert!(!meta.has_more);
        let meta = PaginationMeta::new(10, 10, 0);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_offset_at_i64_max_does_not_overflow() {
        let meta = PaginationMeta::new(5, MAX_LIMIT, i64::MAX);
        assert_eq!(meta.offset, i64::MAX);
        assert!(!meta.has_more);
    }

    #[test]
    fn test_empty_collection() {
        let meta = PaginationMeta::new(0, DEFAULT_LIMIT, 0);
        assert_eq!(meta.total, 0);
        assert!(!meta.has_more);
    }
}
