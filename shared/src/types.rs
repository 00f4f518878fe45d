//! Common types used across the backend

use serde::{Deserialize, Serialize};

/// Page size used when a listing does not ask for one
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Largest page a listing may request
pub const MAX_PAGE_LIMIT: i64 = 50;

/// Pagination as requested through `limit`/`offset` query parameters
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PageRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Pagination after defaults and bounds are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub limit: i64,
    pub offset: i64,
}

impl Default for Page {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_LIMIT,
            offset: 0,
        }
    }
}

impl PageRequest {
    pub fn resolve(&self) -> Result<Page, &'static str> {
        let limit = self.limit.unwrap_or(DEFAULT_PAGE_LIMIT);
        let offset = self.offset.unwrap_or(0);

        if limit < 0 {
            return Err("limit cannot be negative");
        }
        if limit > MAX_PAGE_LIMIT {
            return Err("limit must be at most 50");
        }
        if offset < 0 {
            return Err("offset cannot be negative");
        }

        Ok(Page { limit, offset })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(PageRequest::default().resolve().unwrap(), Page { limit: 10, offset: 0 });
    }

    #[test]
    fn test_bounds() {
        assert!(PageRequest { limit: Some(50), offset: Some(0) }.resolve().is_ok());
        assert!(PageRequest { limit: Some(51), offset: None }.resolve().is_err());
        assert!(PageRequest { limit: None, offset: Some(-1) }.resolve().is_err());
        assert!(PageRequest { limit: Some(-5), offset: None }.resolve().is_err());
    }
}
