use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_PAGE: i64 = 10_000;
pub const MAX_LIMIT: i64 = 100;

/// A resolved page window. Built through `validation::resolve_pagination`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PageRequest {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl PageRequest {
    /// Callers are expected to pass bounds-checked values.
    pub fn new(page: i64, limit: i64) -> Self {
        Self {
            page,
            limit,
            offset: (page - 1) * limit,
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

impl PageInfo {
    pub fn new(total: i64, request: &PageRequest) -> Self {
        let total = total.max(0);
        let total_pages = if request.limit > 0 {
            (total + request.limit - 1) / request.limit
        } else {
            0
        };

        Self {
            page: request.page,
            limit: request.limit,
            total,
            total_pages,
            has_next_page: request.page < total_pages,
            has_previous_page: request.page > 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub pagination: PageInfo,
}

impl<T> Paginated<T> {
    pub fn new(items: Vec<T>, total: i64, request: &PageRequest) -> Self {
        Self {
            items,
            pagination: PageInfo::new(total, request),
        }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            pagination: self.pagination,
        }
    }
}
