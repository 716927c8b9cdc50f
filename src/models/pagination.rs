//! Pagination primitives shared by list endpoints.

use serde::{Deserialize, Serialize};

/// Offset-based pagination query parameters.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Pagination {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl Pagination {
    /// Maximum items per page.
    const MAX_LIMIT: i64 = 100;

    /// Default items per page.
    const DEFAULT_LIMIT: i64 = 10;

    pub fn limit(&self) -> i64 {
        self.limit
            .unwrap_or(Self::DEFAULT_LIMIT)
            .clamp(1, Self::MAX_LIMIT)
    }

    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// Paged result envelope. `total` is the filtered count, independent of
/// limit/offset.
#[derive(Debug, Clone, Serialize)]
pub struct PagedResult<T: Serialize> {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<T>,
}

impl<T: Serialize> PagedResult<T> {
    pub fn new(items: Vec<T>, total: i64, pagination: &Pagination) -> Self {
        Self {
            total,
            limit: pagination.limit(),
            offset: pagination.offset(),
            items,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults() {
        let p = Pagination::default();
        assert_eq!(p.limit(), 10);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn pagination_clamps_limit() {
        let p = Pagination {
            limit: Some(500),
            offset: None,
        };
        assert_eq!(p.limit(), 100);

        let p = Pagination {
            limit: Some(0),
            offset: None,
        };
        assert_eq!(p.limit(), 1);
    }

    #[test]
    fn pagination_negative_offset_floors_to_zero() {
        let p = Pagination {
            limit: None,
            offset: Some(-5),
        };
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn paged_result_reports_total_independent_of_page() {
        let p = Pagination {
            limit: Some(2),
            offset: Some(4),
        };
        let result = PagedResult::new(vec![1, 2], 25, &p);
        assert_eq!(result.total, 25);
        assert_eq!(result.limit, 2);
        assert_eq!(result.offset, 4);
        assert_eq!(result.items.len(), 2);
    }
}
