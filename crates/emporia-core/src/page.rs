//! Pagination state and list query parameters.
//!
//! The server is the authority on pagination totals: [`PageState`] is only
//! ever rebuilt from the `{total, totalPages, currentPage}` fields of a list
//! envelope, never computed client-side.

use serde::{Deserialize, Serialize};

/// Pagination bookkeeping for one resource collection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageState {
    /// Current page, 1-based.
    pub page: u32,
    /// Page size requested from the server.
    pub limit: u32,
    /// Total matching records, as reported by the server.
    pub total: u64,
    /// Total pages, as reported by the server.
    pub total_pages: u32,
}

impl PageState {
    /// Build pagination state from a server list envelope.
    ///
    /// Clamps the reported current page into `[1, max(1, total_pages)]`, so
    /// a misbehaving server cannot put the state out of range.
    pub fn from_server(limit: u32, total: u64, total_pages: u32, current_page: u32) -> Self {
        let upper = total_pages.max(1);
        Self {
            page: current_page.clamp(1, upper),
            limit: limit.max(1),
            total,
            total_pages,
        }
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 0,
        }
    }
}

/// Sort direction for list queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending.
    Asc,
    /// Descending.
    Desc,
}

impl SortOrder {
    /// Wire representation of this direction.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Query parameters for a list fetch.
///
/// Maps onto the conventional
/// `GET /{resource}?page&limit&search&status&sort&order` query string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Page to fetch, 1-based. `None` means the server default.
    pub page: Option<u32>,
    /// Page size. `None` means the server default.
    pub limit: Option<u32>,
    /// Free-text search term.
    pub search: Option<String>,
    /// Status filter value.
    pub status: Option<String>,
    /// Field to sort by.
    pub sort: Option<String>,
    /// Sort direction.
    pub order: Option<SortOrder>,
}

impl ListParams {
    /// Create empty parameters (server defaults for everything).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page to fetch (1-based).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = Some(page.max(1));
        self
    }

    /// Set the page size.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit.max(1));
        self
    }

    /// Set the search term.
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    /// Set the status filter.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Set the sort field.
    pub fn with_sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Set the sort direction.
    pub fn with_order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    /// Render as query-string pairs, skipping unset fields.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page".to_string(), page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit".to_string(), limit.to_string()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search".to_string(), search.clone()));
        }
        if let Some(status) = &self.status {
            pairs.push(("status".to_string(), status.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort".to_string(), sort.clone()));
        }
        if let Some(order) = self.order {
            pairs.push(("order".to_string(), order.as_str().to_string()));
        }
        pairs
    }

    /// Requested page size, falling back to the given default.
    pub fn limit_or(&self, default: u32) -> u32 {
        self.limit.unwrap_or(default)
    }
}
