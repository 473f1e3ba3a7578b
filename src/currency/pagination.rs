//! Paging and sorting for currency listings

use std::fmt;

use crate::error::{FieldViolation, Result, ServiceError};
use crate::models::{PageRequest, MAX_PAGE_SIZE};

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    IsoCode,
}

impl SortField {
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::IsoCode => "iso_code",
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "id" => Some(SortField::Id),
            "title" => Some(SortField::Title),
            "iso_code" => Some(SortField::IsoCode),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Whitelisted ORDER BY clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortKey {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Default for SortKey {
    fn default() -> Self {
        Self {
            field: SortField::Id,
            direction: SortDirection::Asc,
        }
    }
}

impl SortKey {
    /// Parses `title`, `-title`, `title desc` or `title asc`.
    pub fn parse(raw: &str) -> Result<Self> {
        let raw = raw.trim();
        let (name, direction) = if let Some(rest) = raw.strip_prefix('-') {
            (rest.trim(), SortDirection::Desc)
        } else {
            let mut parts = raw.split_whitespace();
            let name = parts.next().unwrap_or_default();
            let direction = match parts.next().map(|d| d.to_ascii_lowercase()) {
                None => SortDirection::Asc,
                Some(d) if d == "asc" => SortDirection::Asc,
                Some(d) if d == "desc" => SortDirection::Desc,
                Some(_) => return Err(invalid_sort(raw)),
            };
            if parts.next().is_some() {
                return Err(invalid_sort(raw));
            }
            (name, direction)
        };

        SortField::parse(name)
            .map(|field| Self { field, direction })
            .ok_or_else(|| invalid_sort(raw))
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field.column(), self.direction.keyword())
    }
}

fn invalid_sort(raw: &str) -> ServiceError {
    ServiceError::Validation(vec![FieldViolation::new(
        "sort",
        format!("unsupported sort key '{}', expected one of id, title, iso_code", raw),
    )])
}

/// A validated page window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: u32,
    pub size: u32,
    pub sort: SortKey,
}

impl Pagination {
    pub fn from_request(request: &PageRequest) -> Result<Self> {
        let sort = match request.sort.as_deref() {
            Some(raw) => SortKey::parse(raw)?,
            None => SortKey::default(),
        };
        Ok(Self {
            page: request.page.max(1),
            size: request.limit.clamp(1, MAX_PAGE_SIZE),
            sort,
        })
    }

    /// Rows skipped before this page, `None` when it does not fit an i64.
    pub fn offset(&self) -> Option<i64> {
        (i64::from(self.page) - 1).checked_mul(i64::from(self.size))
    }

    /// Whether this page starts past the last of `total_count` rows.
    pub fn is_past_end(&self, total_count: i64) -> bool {
        self.offset().map_or(true, |offset| offset >= total_count)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}

/// `ceil(total_count / size)`, zero for an empty table.
pub fn total_pages(total_count: i64, size: u32) -> u32 {
    if total_count <= 0 || size == 0 {
        return 0;
    }
    let size = i64::from(size);
    let pages = (total_count + size - 1) / size;
    u32::try_from(pages).unwrap_or(u32::MAX)
}
