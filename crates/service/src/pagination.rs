//! Pagination utilities for service layer
//!
//! `Pagination` normalizes song-list paging; `LyricsPage` validates the raw
//! page/limit strings of a lyrics request and slices lyric lines.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;
/// Largest offset/limit SQL backends accept (signed BIGINT).
pub const MAX_SQL_BOUND: u64 = i64::MAX as u64;

/// Song-list pagination parameters; zero means "unset".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self { Self { page, limit } }

    /// Apply defaults and convert to `(offset, limit)`, both capped at `MAX_SQL_BOUND`.
    pub fn normalize(self) -> (u64, u64) {
        let page = if self.page == 0 { DEFAULT_PAGE } else { self.page };
        let limit = if self.limit == 0 { DEFAULT_LIMIT } else { self.limit }.min(MAX_SQL_BOUND);
        let offset = (page - 1).saturating_mul(limit).min(MAX_SQL_BOUND);
        (offset, limit)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE, limit: DEFAULT_LIMIT } }
}

/// Validated lyrics paging request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LyricsPage {
    page: usize,
    limit: usize,
}

fn parse_positive(name: &str, raw: &str) -> Result<usize, ServiceError> {
    match raw.parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ServiceError::invalid_argument(name)),
    }
}

impl LyricsPage {
    pub fn new(page: usize, limit: usize) -> Result<Self, ServiceError> {
        if page == 0 { return Err(ServiceError::invalid_argument("page")); }
        if limit == 0 { return Err(ServiceError::invalid_argument("limit")); }
        Ok(Self { page, limit })
    }

    /// Parse page and limit; each must be an integer >= 1.
    pub fn parse(page: &str, limit: &str) -> Result<Self, ServiceError> {
        let page = parse_positive("page", page)?;
        let limit = parse_positive("limit", limit)?;
        Ok(Self { page, limit })
    }

    pub fn page(&self) -> usize { self.page }

    pub fn limit(&self) -> usize { self.limit }

    /// Lines `[(page-1)*limit, page*limit)` clipped to `lines`; empty past the end.
    pub fn slice<'a, T>(&self, lines: &'a [T]) -> &'a [T] {
        let start = (self.page - 1).saturating_mul(self.limit);
        if start >= lines.len() {
            return &[];
        }
        let end = start.saturating_add(self.limit).min(lines.len());
        &lines[start..end]
    }

    /// Split `text` on `\n`, keeping empty lines, and return this page.
    pub fn apply(&self, text: &str) -> Vec<String> {
        let lines: Vec<&str> = text.split('\n').collect();
        self.slice(&lines).iter().map(|l| l.to_string()).collect()
    }
}
