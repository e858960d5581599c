use serde::{Deserialize, Serialize};

/// Page-based pagination query parameters.
///
/// `page` is 1-based; `limit` overrides the configured page size up to the
/// configured hard cap.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl PageParams {
    /// Effective page size, clamped to `[1, max_page_size]`
    pub fn limit(&self, default_size: i64, max_size: i64) -> i64 {
        self.limit.unwrap_or(default_size).clamp(1, max_size)
    }

    /// Row offset for the effective page
    pub fn offset(&self, default_size: i64, max_size: i64) -> i64 {
        let page = self.page.unwrap_or(1).max(1);
        (page - 1) * self.limit(default_size, max_size)
    }
}

/// Paginated response envelope: total row count plus the current page
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub count: i64,
    pub results: Vec<T>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let params = PageParams::default();
        assert_eq!(params.limit(6, 1000), 6);
        assert_eq!(params.offset(6, 1000), 0);
    }

    #[test]
    fn test_limit_capped() {
        let params = PageParams {
            page: None,
            limit: Some(5000),
        };
        assert_eq!(params.limit(6, 1000), 1000);
    }

    #[test]
    fn test_limit_floor() {
        let params = PageParams {
            page: None,
            limit: Some(0),
        };
        assert_eq!(params.limit(6, 1000), 1);
    }

    #[test]
    fn test_offset_uses_effective_limit() {
        let params = PageParams {
            page: Some(3),
            limit: Some(10),
        };
        assert_eq!(params.offset(6, 1000), 20);
    }
}
