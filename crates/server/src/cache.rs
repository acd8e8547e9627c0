//! # Query Cache
//!
//! Time-boxed memo of query results shared by every request. Catalog data (teams,
//! seasons, phases, matches, players) and action rows age out on separate TTLs.
//! Values within their TTL may be stale; that is accepted.

use std::{
    any::Any,
    collections::HashMap,
    future::Future,
    sync::{Arc, Mutex, MutexGuard},
    time::{Duration, Instant},
};

use error::Result;
use logging::log_cache_op;

/// Default TTL for catalog queries, in seconds.
pub const DEFAULT_CATALOG_TTL_SECS: u64 = 300;
/// Default TTL for action-level queries, in seconds.
pub const DEFAULT_ACTIONS_TTL_SECS: u64 = 60;
/// Default maximum number of cached results.
pub const DEFAULT_MAX_ENTRIES: usize = 512;

/// Cache tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheConfig {
    pub catalog_ttl: Duration,
    pub actions_ttl: Duration,
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            catalog_ttl: Duration::from_secs(DEFAULT_CATALOG_TTL_SECS),
            actions_ttl: Duration::from_secs(DEFAULT_ACTIONS_TTL_SECS),
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

/// Which TTL a cached query uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheClass {
    Catalog,
    Actions,
}

struct CacheEntry {
    value:      Arc<dyn Any + Send + Sync>,
    created_at: Instant,
    ttl:        Duration,
}

impl CacheEntry {
    fn is_fresh(&self) -> bool { self.created_at.elapsed() <= self.ttl }
}

/// Shared query result cache.
#[derive(Clone)]
pub struct QueryCache {
    config:  CacheConfig,
    entries: Arc<Mutex<HashMap<String, CacheEntry>>>,
}

impl std::fmt::Debug for QueryCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QueryCache")
            .field("config", &self.config)
            .field("entries", &self.len())
            .finish()
    }
}

impl Default for QueryCache {
    fn default() -> Self { Self::new(CacheConfig::default()) }
}

impl QueryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &CacheConfig { &self.config }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, CacheEntry>> {
        // a panic while holding the lock cannot leave the map half-written
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn ttl(&self, class: CacheClass) -> Duration {
        match class {
            CacheClass::Catalog => self.config.catalog_ttl,
            CacheClass::Actions => self.config.actions_ttl,
        }
    }

    /// Fresh cached value for `key`, if any. Expired entries are purged first.
    pub fn get<T: Any + Send + Sync>(&self, key: &str) -> Option<Arc<T>> {
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.is_fresh());
        let value = entries.get(key)?.value.clone();
        value.downcast::<T>().ok()
    }

    /// Store a value, evicting the oldest entry when full.
    pub fn insert<T: Any + Send + Sync>(&self, key: String, class: CacheClass, value: Arc<T>) {
        let ttl = self.ttl(class);
        let mut entries = self.lock();
        entries.retain(|_, entry| entry.is_fresh());
        if entries.len() >= self.config.max_entries && !entries.contains_key(&key) {
            if let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| entry.created_at)
                .map(|(k, _)| k.clone())
            {
                entries.remove(&victim);
                log_cache_op!("evict", victim, false);
            }
        }
        entries.insert(key, CacheEntry {
            value,
            created_at: Instant::now(),
            ttl,
        });
    }

    /// Return the cached value for `key` or run `load` and cache its result.
    ///
    /// The flag is `true` on a cache hit. Failed loads are not cached.
    pub async fn get_or_load<T, F, Fut>(&self, key: String, class: CacheClass, load: F) -> Result<(Arc<T>, bool)>
    where
        T: Any + Send + Sync,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let Some(value) = self.get::<T>(&key) {
            log_cache_op!("get", key, true);
            return Ok((value, true));
        }
        log_cache_op!("get", key, false);

        let value = Arc::new(load().await?);
        self.insert(key, class, value.clone());
        Ok((value, false))
    }

    pub fn len(&self) -> usize { self.lock().len() }

    pub fn is_empty(&self) -> bool { self.len() == 0 }

    pub fn clear(&self) { self.lock().clear(); }
}
