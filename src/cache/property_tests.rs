//! Property-Based Tests for the cache engine

use proptest::prelude::*;
use std::collections::HashMap;
use std::time::Duration;

use crate::cache::CacheStore;

const HOUR: Duration = Duration::from_secs(3600);

// == Strategies ==
fn key_strategy() -> impl Strategy<Value = String> {
    (1u32..40).prop_map(|id| format!("currency:{}", id))
}

fn value_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 ]{1,64}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: String },
    Get { key: String },
    Delete { key: String },
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        (key_strategy(), value_strategy()).prop_map(|(key, value)| CacheOp::Set { key, value }),
        key_strategy().prop_map(|key| CacheOp::Get { key }),
        key_strategy().prop_map(|key| CacheOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // With room for every key and long TTLs the store behaves like a map.
    #[test]
    fn prop_matches_map_model(ops in prop::collection::vec(cache_op_strategy(), 1..80)) {
        let mut store = CacheStore::new(1000);
        let mut model: HashMap<String, String> = HashMap::new();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value.clone(), HOUR).unwrap();
                    model.insert(key, value);
                }
                CacheOp::Get { key } => {
                    prop_assert_eq!(store.get(&key), model.get(&key).cloned());
                }
                CacheOp::Delete { key } => {
                    prop_assert_eq!(store.delete(&key), model.remove(&key).is_some());
                }
            }
        }
        prop_assert_eq!(store.len(), model.len());
    }

    #[test]
    fn prop_capacity_never_exceeded(
        capacity in 1usize..16,
        ops in prop::collection::vec(cache_op_strategy(), 1..120),
    ) {
        let mut store = CacheStore::new(capacity);
        for op in ops {
            match op {
                CacheOp::Set { key, value } => { store.set(key, value, HOUR).unwrap(); }
                CacheOp::Get { key } => { store.get(&key); }
                CacheOp::Delete { key } => { store.delete(&key); }
            }
            prop_assert!(store.len() <= capacity);
        }
    }

    // The most recently written key always survives an eviction.
    #[test]
    fn prop_latest_write_is_readable(
        capacity in 1usize..8,
        keys in prop::collection::vec(key_strategy(), 1..60),
    ) {
        let mut store = CacheStore::new(capacity);
        for (i, key) in keys.into_iter().enumerate() {
            let value = i.to_string();
            store.set(key.clone(), value.clone(), HOUR).unwrap();
            prop_assert_eq!(store.get(&key), Some(value));
        }
    }
}
