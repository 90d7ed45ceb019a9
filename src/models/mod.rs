pub mod projects;
pub mod taxonomies;
pub mod users;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationQuery {
    pub page: Option<u64>,
    pub limit: Option<u64>,
    /// Substring filter (SQL `LIKE`, case-sensitive) on the listing's text columns.
    pub search: Option<String>,
}

impl PaginationQuery {
    pub fn page(&self) -> u64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).clamp(1, 100)
    }

    pub fn search(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One page of a listing plus the total row count across all pages.
#[derive(Debug, Clone, Serialize)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u64,
    pub limit: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_bounds() {
        let q = PaginationQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 20);

        let q = PaginationQuery {
            page: Some(0),
            limit: Some(500),
            search: Some("   ".into()),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.limit(), 100);
        assert_eq!(q.search(), None);
    }
}
