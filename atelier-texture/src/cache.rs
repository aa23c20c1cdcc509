use std::hash::Hash;
use std::sync::Arc;
use log::debug;
use atelier_core::collections::hashmap::HashMap;

struct CacheEntry<V> {
    value: Arc<V>,
    last_used: u64,
}

/// Bounded texture cache with least-recently-used eviction.
///
/// Owned by whoever synthesizes or loads textures; there is no process-wide
/// instance. A capacity of zero stores nothing.
pub struct TextureCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    capacity: usize,
    clock: u64,
}

impl<K: Hash + Eq + Clone, V> TextureCache<K, V> {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity,
            clock: 0,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    pub fn get(&mut self, key: &K) -> Option<Arc<V>> {
        let now = self.tick();
        self.entries.get_mut(key).map(|entry| {
            entry.last_used = now;
            Arc::clone(&entry.value)
        })
    }

    pub fn insert(&mut self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        if self.capacity == 0 {
            return value;
        }

        if !self.entries.contains_key(&key) && self.entries.len() >= self.capacity {
            self.evict_least_recently_used();
        }

        let last_used = self.tick();
        self.entries.insert(key, CacheEntry { value: Arc::clone(&value), last_used });
        value
    }

    pub fn get_or_insert_with(&mut self, key: K, create: impl FnOnce() -> V) -> Arc<V> {
        match self.get(&key) {
            Some(value) => value,
            None => self.insert(key, create()),
        }
    }

    /// Like [`Self::get_or_insert_with`], but a failed `create` leaves the cache untouched.
    pub fn get_or_try_insert_with<E>(&mut self, key: K, create: impl FnOnce() -> Result<V, E>) -> Result<Arc<V>, E> {
        match self.get(&key) {
            Some(value) => Ok(value),
            None => Ok(self.insert(key, create()?)),
        }
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict_least_recently_used(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.last_used)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest {
            self.entries.remove(&key);
            debug!("Texture cache full ({} entries), evicted least recently used", self.capacity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evicts_least_recently_used() {
        let mut cache = TextureCache::new(2);
        cache.insert("a", 1);
        cache.insert("b", 2);

        // touching "a" makes "b" the eviction candidate
        assert_eq!(cache.get(&"a").as_deref(), Some(&1));
        cache.insert("c", 3);

        assert_eq!(cache.len(), 2);
        assert!(cache.contains(&"a"));
        assert!(!cache.contains(&"b"));
        assert!(cache.contains(&"c"));
    }

    #[test]
    fn get_or_insert_creates_once() {
        let mut cache = TextureCache::new(4);
        let mut calls = 0;

        let first = cache.get_or_insert_with("key", || { calls += 1; vec![1u8, 2, 3] });
        let second = cache.get_or_insert_with("key", || { calls += 1; vec![9u8] });

        assert_eq!(calls, 1);
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn failed_creation_is_not_cached() {
        let mut cache: TextureCache<&str, u32> = TextureCache::new(4);
        let failed: Result<_, &str> = cache.get_or_try_insert_with("key", || Err("boom"));

        assert!(failed.is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn zero_capacity_and_clear() {
        let mut disabled = TextureCache::new(0);
        assert_eq!(*disabled.insert("a", 1), 1);
        assert!(disabled.is_empty());

        let mut cache = TextureCache::new(3);
        cache.insert("a", 1);
        cache.insert("b", 2);
        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get(&"a").is_none());
    }
}
