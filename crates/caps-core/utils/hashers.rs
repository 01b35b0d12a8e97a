//! Hash map construction with ahash
//!
//! Language tables are keyed by caller-supplied strings; ahash keeps lookups
//! fast while staying resistant to crafted keys.

use ahash::RandomState;
use std::collections::HashMap;

/// `HashMap` using the crate-wide hasher
pub type FastHashMap<K, V> = HashMap<K, V, RandomState>;

/// Create a new `HashMap` with the crate-wide hasher
///
/// # Example
///
/// ```rust
/// use caps_core::utils::hashers::create_hash_map;
///
/// let mut map = create_hash_map::<String, usize>();
/// map.insert("en-US".to_string(), 7);
/// ```
#[must_use]
pub fn create_hash_map<K, V>() -> FastHashMap<K, V> {
    HashMap::with_hasher(RandomState::new())
}

/// Create a new `HashMap` with specific capacity and the crate-wide hasher
#[must_use]
pub fn create_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    HashMap::with_capacity_and_hasher(capacity, RandomState::new())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_start_empty() {
        let map = create_hash_map::<String, u32>();
        assert!(map.is_empty());

        let map = create_hash_map_with_capacity::<String, u32>(16);
        assert!(map.capacity() >= 16);
    }
}
