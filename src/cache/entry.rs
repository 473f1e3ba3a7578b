//! Cache Entry Module
//!
//! A stored value together with its expiry deadline.

use std::time::{Duration, Instant};

// == Cache Entry ==
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// Serialized payload
    pub value: String,
    /// Deadline after which the entry counts as absent
    pub expires_at: Instant,
}

impl CacheEntry {
    /// `None` when `ttl` pushes the deadline past what `Instant` can hold.
    pub fn new(value: String, ttl: Duration) -> Option<Self> {
        let expires_at = Instant::now().checked_add(ttl)?;
        Some(Self { value, expires_at })
    }

    // == Is Expired ==
    /// An entry is expired once the deadline has been reached.
    pub fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_fresh_entry_not_expired() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_secs(60)).unwrap();
        assert!(!entry.is_expired());
        assert!(entry.expires_at > Instant::now() + Duration::from_secs(59));
    }

    #[test]
    fn test_zero_ttl_expires_immediately() {
        let entry = CacheEntry::new("v".to_string(), Duration::ZERO).unwrap();
        assert!(entry.is_expired());
    }

    #[test]
    fn test_unrepresentable_deadline() {
        assert!(CacheEntry::new("v".to_string(), Duration::from_secs(u64::MAX)).is_none());
    }

    #[test]
    fn test_entry_expires_after_ttl() {
        let entry = CacheEntry::new("v".to_string(), Duration::from_millis(20)).unwrap();
        sleep(Duration::from_millis(40));
        assert!(entry.is_expired());
    }
}
