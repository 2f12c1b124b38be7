//! Collection aliases backed by AHash.
//!
//! Target registries and other id-keyed lookups use these instead of the
//! std SipHash maps.

pub use ahash::{AHashMap as HashMap, AHashSet as HashSet, RandomState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert(7_u64, "target");
        assert_eq!(map.get(&7), Some(&"target"));
    }

    #[test]
    fn test_hashset_ahash() {
        let mut set = HashSet::new();
        set.insert(42);
        assert!(set.contains(&42));
    }
}
