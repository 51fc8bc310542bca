//! Time-bounded caches for fetched data.
//!
//! [`TtlCache`] is a single `{ value, expires_at }` slot; [`QueryCache`]
//! keys such slots by logical resource name and is invalidated by hand after
//! mutations. Both are plain values owned by whoever needs them and read
//! time through an injected [`Clock`].

use std::{collections::HashMap, fmt, sync::Arc};

use jiff::{SignedDuration, Timestamp};
use log::debug;

use crate::clock::Clock;

/// Logical name of a cached collection.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ResourceKey(&'static str);

impl ResourceKey {
    /// Every order on the board.
    pub const ORDERS: ResourceKey = ResourceKey("orders");

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

/// A single cached value with an expiry time.
pub struct TtlCache<T> {
    entry: Option<(T, Timestamp)>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> TtlCache<T> {
    pub fn new(ttl: SignedDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entry: None,
            ttl,
            clock,
        }
    }

    /// The cached value, unless it is missing or expired. Expired values are
    /// dropped on read.
    pub fn get(&mut self) -> Option<T> {
        let now = self.clock.now();
        let fresh = matches!(&self.entry, Some((_, expires_at)) if now <= *expires_at);
        if !fresh {
            self.entry = None;
        }
        self.entry.as_ref().map(|(value, _)| value.clone())
    }

    pub fn set(&mut self, value: T) {
        let now = self.clock.now();
        let expires_at = now.checked_add(self.ttl).unwrap_or(Timestamp::MAX);
        self.entry = Some((value, expires_at));
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }

    /// When the current value expires, if there is one.
    pub fn expires_at(&self) -> Option<Timestamp> {
        self.entry.as_ref().map(|(_, expires_at)| *expires_at)
    }
}

/// Cache of fetched collections keyed by resource name.
pub struct QueryCache<T> {
    entries: HashMap<ResourceKey, TtlCache<T>>,
    ttl: SignedDuration,
    clock: Arc<dyn Clock>,
}

impl<T: Clone> QueryCache<T> {
    pub fn new(ttl: SignedDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            clock,
        }
    }

    pub fn get(&mut self, key: &ResourceKey) -> Option<T> {
        let hit = self.entries.get_mut(key).and_then(TtlCache::get);
        if hit.is_some() {
            debug!("Cache hit for {key}");
        }
        hit
    }

    pub fn insert(&mut self, key: ResourceKey, value: T) {
        let (ttl, clock) = (self.ttl, Arc::clone(&self.clock));
        self.entries
            .entry(key)
            .or_insert_with(|| TtlCache::new(ttl, clock))
            .set(value);
    }

    /// Drop a cached collection so the next read refetches it.
    pub fn invalidate(&mut self, key: &ResourceKey) {
        if let Some(entry) = self.entries.get_mut(key) {
            debug!("Invalidating cached {key}");
            entry.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(Timestamp::from_second(1640995200).unwrap()))
    }

    #[test]
    fn test_ttl_cache_expires() {
        let clock = clock();
        let mut cache = TtlCache::new(SignedDuration::from_secs(30), clock.clone());
        cache.set("session".to_string());
        assert_eq!(cache.get(), Some("session".to_string()));

        clock.advance(SignedDuration::from_secs(30));
        assert_eq!(cache.get(), Some("session".to_string()));

        clock.advance(SignedDuration::from_secs(1));
        assert_eq!(cache.get(), None);
        assert_eq!(cache.expires_at(), None);
    }

    #[test]
    fn test_ttl_cache_clear() {
        let mut cache = TtlCache::new(SignedDuration::from_secs(30), clock());
        cache.set(1u32);
        cache.clear();
        assert_eq!(cache.get(), None);
    }

    #[test]
    fn test_query_cache_invalidate() {
        let clock = clock();
        let mut cache = QueryCache::new(SignedDuration::from_secs(30), clock.clone());
        assert_eq!(cache.get(&ResourceKey::ORDERS), None);

        cache.insert(ResourceKey::ORDERS, vec![1, 2, 3]);
        assert_eq!(cache.get(&ResourceKey::ORDERS), Some(vec![1, 2, 3]));

        cache.invalidate(&ResourceKey::ORDERS);
        assert_eq!(cache.get(&ResourceKey::ORDERS), None);

        cache.insert(ResourceKey::ORDERS, vec![4]);
        clock.advance(SignedDuration::from_secs(60));
        assert_eq!(cache.get(&ResourceKey::ORDERS), None);
    }
}
