//! LRU Tracker Module
//!
//! Access-order bookkeeping for cache eviction.

use std::collections::{BTreeMap, HashMap};

// == LRU Tracker ==
/// Keys ordered by a monotonically increasing access tick.
///
/// `touch`, `remove` and `evict_oldest` are all O(log n).
#[derive(Debug, Default)]
pub struct LruTracker {
    ticks: HashMap<String, u64>,
    order: BTreeMap<u64, String>,
    next_tick: u64,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `key` as most recently used, inserting it if new.
    pub fn touch(&mut self, key: &str) {
        let tick = self.next_tick;
        self.next_tick += 1;

        match self.ticks.get_mut(key) {
            Some(previous) => {
                let owned = self.order.remove(&*previous).unwrap_or_else(|| key.to_string());
                *previous = tick;
                self.order.insert(tick, owned);
            }
            None => {
                self.ticks.insert(key.to_string(), tick);
                self.order.insert(tick, key.to_string());
            }
        }
    }

    pub fn remove(&mut self, key: &str) {
        if let Some(tick) = self.ticks.remove(key) {
            self.order.remove(&tick);
        }
    }

    /// Pops the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        let (_, key) = self.order.pop_first()?;
        self.ticks.remove(&key);
        Some(key)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.ticks.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recent() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.touch("c");
        lru.touch("a");

        assert_eq!(lru.evict_oldest().as_deref(), Some("b"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("c"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("a"));
        assert!(lru.evict_oldest().is_none());
    }

    #[test]
    fn test_touch_does_not_duplicate() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("a");
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_remove() {
        let mut lru = LruTracker::new();
        lru.touch("a");
        lru.touch("b");
        lru.remove("a");
        lru.remove("missing");
        assert_eq!(lru.len(), 1);
        assert_eq!(lru.evict_oldest().as_deref(), Some("b"));
        assert!(lru.is_empty());
    }

    #[test]
    fn test_order_survives_many_touches() {
        let mut lru = LruTracker::new();
        for i in 0..1_000 {
            lru.touch(&format!("k{}", i));
        }
        for i in (0..1_000).step_by(2) {
            lru.touch(&format!("k{}", i));
        }

        assert_eq!(lru.len(), 1_000);
        assert_eq!(lru.evict_oldest().as_deref(), Some("k1"));
        assert_eq!(lru.evict_oldest().as_deref(), Some("k3"));
    }
}
