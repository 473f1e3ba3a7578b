//! Request and Response models for the currency API
//!
//! DTOs used for serializing/deserializing HTTP request and response
//! bodies and the cached projection.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::{CurrencyRequest, PageQuery, PageRequest, MAX_PAGE_SIZE};
pub use responses::{CurrencyListResponse, CurrencyResponse, ErrorResponse, HealthResponse};
