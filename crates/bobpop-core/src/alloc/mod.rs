//! Collection types used across bobpop.
//!
//! Re-exports the AHash-backed map so every crate hashes the same way.

pub use ahash::AHashMap as HashMap;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hashmap_ahash() {
        let mut map = HashMap::new();
        map.insert("bobpop", 1);
        assert_eq!(map.get("bobpop"), Some(&1));
    }
}
