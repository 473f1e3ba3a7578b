//! Currency Entity
//!
//! Storage representation of a currency row.

use chrono::{DateTime, Utc};

use crate::models::CurrencyRequest;

/// A persisted currency.
///
/// `id` is assigned by the entity store and never changes afterwards.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Currency {
    pub id: i64,
    pub title: String,
    pub iso_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Field values for creating or updating a currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyDraft {
    pub title: String,
    pub iso_code: String,
}

impl From<CurrencyRequest> for CurrencyDraft {
    fn from(request: CurrencyRequest) -> Self {
        Self {
            title: request.title,
            iso_code: request.iso_code,
        }
    }
}
