//! Pagination types shared across all paginated list endpoints.

/// Page used when the client does not send `page`.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the client does not send `limit`.
pub const DEFAULT_LIMIT: u32 = 6;

/// Upper bound for `limit`.
pub const MAX_LIMIT: u32 = 100;

/// Pagination parameters.
///
/// - `page`: ≥ 1, default 1
/// - `limit`: 1–100, default 6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build from optional query values, falling back to defaults.
    pub fn from_query(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE),
            limit: limit.unwrap_or(DEFAULT_LIMIT),
        }
        .clamped()
    }

    /// Clamp `limit` to the valid range 1–100 and `page` to ≥ 1.
    pub fn clamped(self) -> Self {
        Self {
            page: self.page.max(1),
            limit: self.limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Number of rows to skip for this page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.limit)
    }

    pub fn has_next(&self, count: u64) -> bool {
        self.offset() + u64::from(self.limit) < count
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// One page of items together with the total number of matching rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub count: u64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, count: u64) -> Self {
        Self { items, count }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            count: self.count,
        }
    }
}
