//! Currency input validation
//!
//! The validator is a plain value built at startup and handed to the service.

use std::ops::RangeInclusive;

use crate::error::{FieldViolation, Result, ServiceError};
use crate::models::CurrencyRequest;

/// Checks title and ISO code constraints on incoming currency data.
#[derive(Debug, Clone)]
pub struct CurrencyValidator {
    title_length: RangeInclusive<usize>,
    iso_code_min_length: usize,
}

impl CurrencyValidator {
    pub fn new(title_length: RangeInclusive<usize>, iso_code_min_length: usize) -> Self {
        Self {
            title_length,
            iso_code_min_length,
        }
    }

    /// Returns every violated constraint at once, or `Ok(())`.
    pub fn validate(&self, request: &CurrencyRequest) -> Result<()> {
        let mut violations = Vec::new();

        let title_len = request.title.chars().count();
        if title_len == 0 {
            violations.push(FieldViolation::new("title", "is required"));
        } else if !self.title_length.contains(&title_len) {
            violations.push(FieldViolation::new(
                "title",
                format!(
                    "must be between {} and {} characters",
                    self.title_length.start(),
                    self.title_length.end()
                ),
            ));
        }

        let iso_len = request.iso_code.chars().count();
        if iso_len == 0 {
            violations.push(FieldViolation::new("iso_code", "is required"));
        } else if iso_len < self.iso_code_min_length {
            violations.push(FieldViolation::new(
                "iso_code",
                format!("must be at least {} characters", self.iso_code_min_length),
            ));
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ServiceError::Validation(violations))
        }
    }
}

impl Default for CurrencyValidator {
    fn default() -> Self {
        Self::new(3..=12, 3)
    }
}
