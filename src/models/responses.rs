//! Response DTOs for the currency API
//!
//! Defines the structure of outgoing HTTP response bodies. `CurrencyResponse`
//! doubles as the snapshot stored in the cache.

use serde::{Deserialize, Serialize};

use crate::currency::Currency;

/// Externally visible projection of a currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyResponse {
    pub id: i64,
    pub title: String,
    pub iso_code: String,
}

impl From<Currency> for CurrencyResponse {
    fn from(currency: Currency) -> Self {
        Self {
            id: currency.id,
            title: currency.title,
            iso_code: currency.iso_code,
        }
    }
}

/// Response body for GET /currencies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrencyListResponse {
    pub total_count: i64,
    pub total_pages: u32,
    pub page: u32,
    pub limit: u32,
    pub currencies: Vec<CurrencyResponse>,
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "OK".to_string(),
        }
    }
}

/// Error envelope for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status_code: u16,
    /// Lower-cased error message
    pub message: String,
    /// Extra detail, `null` when there is none
    pub data: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(status_code: u16, message: impl Into<String>, data: Option<serde_json::Value>) -> Self {
        Self {
            status_code,
            message: message.into(),
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_projection_drops_storage_fields() {
        let now = Utc::now();
        let currency = Currency {
            id: 4,
            title: "Yen".to_string(),
            iso_code: "JPY".to_string(),
            created_at: now,
            updated_at: now,
        };
        let json = serde_json::to_value(CurrencyResponse::from(currency)).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "title": "Yen", "iso_code": "JPY"}));
    }

    #[test]
    fn test_health_response_serialize() {
        let json = serde_json::to_string(&HealthResponse::ok()).unwrap();
        assert_eq!(json, r#"{"status":"OK"}"#);
    }

    #[test]
    fn test_error_response_keeps_null_data() {
        let json = serde_json::to_value(ErrorResponse::new(500, "boom", None)).unwrap();
        assert_eq!(json["status_code"], 500);
        assert_eq!(json["message"], "boom");
        assert!(json.get("data").is_some());
        assert!(json["data"].is_null());
    }
}
