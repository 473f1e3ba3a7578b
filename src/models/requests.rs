//! Request DTOs for the currency API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Default page number when none (or an unusable one) is supplied.
pub const DEFAULT_PAGE: u32 = 1;

/// Default page size when none (or an unusable one) is supplied.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size served; bigger `limit` values are clamped to it.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Request body for POST /currencies and PUT /currencies/:id
///
/// Missing fields deserialize to empty strings so they are reported by the
/// validator instead of by the JSON extractor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CurrencyRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub iso_code: String,
}

impl CurrencyRequest {
    pub fn new(title: impl Into<String>, iso_code: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            iso_code: iso_code.into(),
        }
    }
}

/// Raw query string for GET /currencies
///
/// Values are kept as strings; unparsable numbers fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageQuery {
    pub page: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

/// Normalized paging request handed to the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u32,
    /// Page size
    pub limit: u32,
    /// Optional sort key, e.g. `title`, `-title` or `title desc`
    pub sort: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_SIZE,
            sort: None,
        }
    }
}

impl From<PageQuery> for PageRequest {
    fn from(query: PageQuery) -> Self {
        Self {
            page: parse_positive(query.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            limit: parse_positive(query.limit.as_deref())
                .map_or(DEFAULT_PAGE_SIZE, |limit| limit.min(MAX_PAGE_SIZE)),
            sort: query
                .sort
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

fn parse_positive(raw: Option<&str>) -> Option<u32> {
    raw.and_then(|v| v.trim().parse::<u32>().ok())
        .filter(|v| *v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_request_deserialize() {
        let json = r#"{"title": "Euro", "iso_code": "EUR"}"#;
        let req: CurrencyRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req, CurrencyRequest::new("Euro", "EUR"));
    }

    #[test]
    fn test_currency_request_missing_fields_are_empty() {
        let req: CurrencyRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_empty());
        assert!(req.iso_code.is_empty());
    }

    #[test]
    fn test_page_request_defaults() {
        let req = PageRequest::from(PageQuery::default());
        assert_eq!(req, PageRequest::default());
    }

    #[test]
    fn test_page_request_parses_values() {
        let req = PageRequest::from(PageQuery {
            page: Some("3".into()),
            limit: Some("25".into()),
            sort: Some(" -title ".into()),
        });
        assert_eq!(req.page, 3);
        assert_eq!(req.limit, 25);
        assert_eq!(req.sort.as_deref(), Some("-title"));
    }

    #[test]
    fn test_page_request_clamps_limit() {
        let req = PageRequest::from(PageQuery {
            page: Some("4294967295".into()),
            limit: Some("4294967295".into()),
            sort: None,
        });
        assert_eq!(req.page, u32::MAX);
        assert_eq!(req.limit, MAX_PAGE_SIZE);
    }

    #[test]
    fn test_page_request_garbage_falls_back() {
        let req = PageRequest::from(PageQuery {
            page: Some("abc".into()),
            limit: Some("0".into()),
            sort: Some("".into()),
        });
        assert_eq!(req, PageRequest::default());
    }
}
