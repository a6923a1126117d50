//! Ordering and pagination plumbing for list endpoints.

pub const DEFAULT_PAGE_SIZE: i64 = 20;
pub const MAX_PAGE_SIZE: i64 = 100;

/// Zero-based page window. Out-of-range input clamps rather than errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub page_size: i64,
}

impl Page {
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(0).max(0),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    pub fn offset(&self) -> i64 {
        self.page * self.page_size
    }

    pub fn page_count(&self, total_count: i64) -> i64 {
        if total_count <= 0 {
            return 0;
        }
        (total_count + self.page_size - 1) / self.page_size
    }

    pub fn next(&self, total_count: i64) -> Option<i64> {
        (self.page + 1 < self.page_count(total_count)).then_some(self.page + 1)
    }

    pub fn previous(&self) -> Option<i64> {
        (self.page > 0).then_some(self.page - 1)
    }
}

/// Fields a check listing may be ordered by. The SQL side is a fixed
/// whitelist — user input never reaches the query text directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderField {
    CreatedAt,
    Total,
    Rest,
}

impl OrderField {
    pub fn sql(&self) -> &'static str {
        match self {
            OrderField::CreatedAt => "created_at",
            OrderField::Total => "total",
            OrderField::Rest => "rest",
        }
    }

    fn parse(name: &str) -> Option<Self> {
        match name {
            "created_at" => Some(OrderField::CreatedAt),
            "total" => Some(OrderField::Total),
            "rest" => Some(OrderField::Rest),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub field: OrderField,
    pub descending: bool,
}

/// Parse a comma-separated ordering expression (`-` prefix = descending). Unknown
/// fields are ignored; an empty result falls back to newest-first.
pub fn parse_ordering(raw: Option<&str>) -> Vec<OrderBy> {
    let mut out = Vec::new();
    if let Some(raw) = raw {
        for part in raw.split(',') {
            let part = part.trim();
            if part.is_empty() {
                continue;
            }
            let (name, descending) = match part.strip_prefix('-') {
                Some(name) => (name, true),
                None => (part, false),
            };
            if let Some(field) = OrderField::parse(name) {
                out.push(OrderBy { field, descending });
            }
        }
    }
    if out.is_empty() {
        out.push(OrderBy {
            field: OrderField::CreatedAt,
            descending: true,
        });
    }
    out
}
