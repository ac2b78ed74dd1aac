//! Filter parsing cache - parse each distinct filter once per process

use std::sync::Arc;

use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::{debug, trace};

use crate::filter::options::FilterOptions;
use crate::filter::wrapper::FilterExpressionWrapper;

type CacheKey = (String, Option<FilterOptions>);

/// Upper bound on cached filters; the cache is emptied when a new filter would exceed it
pub const MAX_CACHED_FILTERS: usize = 256;

/// Bounded map from filter string and options to its parse
#[derive(Debug)]
pub struct FilterCache {
    entries: RwLock<AHashMap<CacheKey, Arc<FilterExpressionWrapper>>>,
    capacity: usize,
}

impl FilterCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: RwLock::new(AHashMap::with_capacity(capacity.min(64))),
            capacity: capacity.max(1),
        }
    }

    /// Get or parse a filter, reusing an earlier parse of the same filter and options
    pub fn get_or_parse(
        &self,
        filter: &str,
        options: Option<&FilterOptions>,
    ) -> Arc<FilterExpressionWrapper> {
        let key: CacheKey = (filter.to_string(), options.cloned());

        // Fast path: check read lock first
        if let Some(wrapper) = self.entries.read().get(&key) {
            trace!(filter, "filter cache hit");
            return Arc::clone(wrapper);
        }

        // Slow path: parse outside the lock; a concurrent parse of the same key keeps the first
        let parsed = Arc::new(FilterExpressionWrapper::with_options(filter, key.1.clone()));
        let mut entries = self.entries.write();
        if entries.len() >= self.capacity && !entries.contains_key(&key) {
            debug!(cached = entries.len(), "filter cache full, clearing");
            entries.clear();
        }
        Arc::clone(entries.entry(key).or_insert(parsed))
    }

    pub fn clear(&self) {
        self.entries.write().clear();
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Global filter cache with fast hashing (ahash)
static FILTER_CACHE: Lazy<FilterCache> = Lazy::new(|| FilterCache::new(MAX_CACHED_FILTERS));

/// Get or parse a filter through the global cache
pub fn get_or_parse(filter: &str, options: Option<&FilterOptions>) -> Arc<FilterExpressionWrapper> {
    FILTER_CACHE.get_or_parse(filter, options)
}

/// Clear the filter cache (useful for testing)
pub fn clear_cache() {
    FILTER_CACHE.clear();
}

/// Number of cached filters
pub fn cache_size() -> usize {
    FILTER_CACHE.len()
}
