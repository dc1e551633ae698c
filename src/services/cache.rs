//! Fixed-capacity cache with least-recently-used eviction.
//!
//! Recency is tracked in a `VecDeque` of keys (front = oldest). Capacities
//! are small, so the linear scan on a hit is cheaper than a linked map.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

#[derive(Debug, Clone)]
pub struct LruCache<K, V> {
    entries: HashMap<K, V>,
    recency: VecDeque<K>,
    capacity: usize,
}

impl<K: Eq + Hash + Clone, V> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: HashMap::with_capacity(capacity),
            recency: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    fn touch(&mut self, key: &K) {
        if let Some(pos) = self.recency.iter().position(|k| k == key) {
            if let Some(k) = self.recency.remove(pos) {
                self.recency.push_back(k);
            }
        }
    }

    /// Look up a value and mark it most recently used
    pub fn get(&mut self, key: &K) -> Option<&V> {
        if self.entries.contains_key(key) {
            self.touch(key);
        }
        self.entries.get(key)
    }

    /// Insert a value, evicting the least recently used entry when full
    pub fn put(&mut self, key: K, value: V) {
        if self.entries.contains_key(&key) {
            self.touch(&key);
            self.entries.insert(key, value);
            return;
        }

        if self.entries.len() >= self.capacity {
            if let Some(oldest) = self.recency.pop_front() {
                self.entries.remove(&oldest);
            }
        }

        self.recency.push_back(key.clone());
        self.entries.insert(key, value);
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.recency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_least_recent() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.put("c", 3);

        assert!(!cache.contains(&"a"));
        assert_eq!(cache.get(&"b"), Some(&2));
        assert_eq!(cache.get(&"c"), Some(&3));
    }

    #[test]
    fn test_get_refreshes_recency() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("b", 2);
        cache.get(&"a");
        cache.put("c", 3);

        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
    }

    #[test]
    fn test_put_existing_does_not_grow() {
        let mut cache = LruCache::new(2);
        cache.put("a", 1);
        cache.put("a", 10);
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get(&"a"), Some(&10));
    }

    #[test]
    fn test_zero_capacity_holds_one() {
        let mut cache = LruCache::new(0);
        cache.put("a", 1);
        assert_eq!(cache.capacity(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear() {
        let mut cache = LruCache::new(4);
        cache.put(1, "x");
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get(&1), None);
    }
}
