//! Offset pagination helpers for list endpoints.

use serde::{Deserialize, Serialize};

/// Default page size for list endpoints.
pub const DEFAULT_LIMIT: u32 = 20;

/// Upper bound on requested page size.
pub const MAX_LIMIT: u32 = 100;

/// Page/limit query parameters, as sent by clients.
///
/// Both fields are optional; out-of-range values are clamped rather than
/// rejected so that a stale bookmark never 400s.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl PageParams {
    /// Effective page number (1-based).
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=MAX_LIMIT`.
    pub fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
    }

    /// SQL OFFSET for the effective page.
    pub fn offset(&self) -> i64 {
        i64::from(self.page() - 1) * i64::from(self.limit())
    }
}

/// Pagination metadata returned alongside list results.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub total_pages: i64,
}

impl PageInfo {
    /// Builds page metadata from the effective params and a total count.
    pub fn new(params: &PageParams, total: i64) -> Self {
        let limit = params.limit();
        let total_pages = (total + i64::from(limit) - 1) / i64::from(limit);

        Self {
            page: params.page(),
            limit,
            total,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), DEFAULT_LIMIT);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_offset_math() {
        let params = PageParams {
            page: Some(3),
            limit: Some(25),
        };
        assert_eq!(params.offset(), 50);
    }

    #[test]
    fn test_zero_page_clamped_to_first() {
        let params = PageParams {
            page: Some(0),
            limit: None,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.offset(), 0);
    }

    #[test]
    fn test_limit_clamped_to_max() {
        let params = PageParams {
            page: None,
            limit: Some(10_000),
        };
        assert_eq!(params.limit(), MAX_LIMIT);
    }

    #[test]
    fn test_page_info_rounds_up() {
        let params = PageParams {
            page: Some(1),
            limit: Some(20),
        };
        let info = PageInfo::new(&params, 41);
        assert_eq!(info.total_pages, 3);
        assert_eq!(info.total, 41);
    }

    #[test]
    fn test_page_info_empty_result() {
        let info = PageInfo::new(&PageParams::default(), 0);
        assert_eq!(info.total_pages, 0);
    }

    #[test]
    fn test_page_info_serializes_camel_case() {
        let info = PageInfo::new(&PageParams::default(), 5);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("totalPages"));
    }
}
