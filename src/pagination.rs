//! Shared pagination types
//!
//! Query parameters and the page envelope used by listing and search
//! endpoints. Page size defaults to 20 and is clamped to 100.

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;

/// `?page=&size=` query parameters, zero-based page number.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u32,
    pub size: Option<u32>,
}

impl Default for PageQuery {
    fn default() -> Self {
        Self { page: 0, size: None }
    }
}

impl PageQuery {
    /// Effective page size: default 20, clamped to [1, 100].
    pub fn size(&self) -> u32 {
        self.size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Row offset for SQL `LIMIT ... OFFSET ...`. Widened so the
    /// largest representable page number cannot overflow.
    pub fn offset(&self) -> u64 {
        u64::from(self.page) * u64::from(self.size())
    }
}

/// One page of results plus enough metadata to iterate further.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, query: PageQuery, total: u64) -> Self {
        Self {
            items,
            page: query.page,
            size: query.size(),
            total,
        }
    }

    /// Slice a fully materialized, already sorted result set down to the
    /// requested page. Used by the in-process search index.
    pub fn from_sorted(all: Vec<T>, query: PageQuery) -> Self {
        let total = all.len() as u64;
        let size = query.size() as usize;
        let start = (query.page as usize).saturating_mul(size).min(all.len());
        let end = start.saturating_add(size).min(all.len());
        let items = all.into_iter().skip(start).take(end - start).collect();
        Self {
            items,
            page: query.page,
            size: query.size(),
            total,
        }
    }
}
