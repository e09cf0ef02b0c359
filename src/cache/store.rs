//! Cache storage.
//!
//! Listing pages live in a bounded LRU keyed by [`ListingQuery`]; the category
//! set is a single slot. Every entry remembers when it was stored so callers
//! can apply a freshness window.

use std::sync::RwLock;
use std::time::Duration;

use lru::LruCache;
use tokio::time::Instant;

use crate::domain::categories::CategorySet;
use crate::domain::listing::{ListingQuery, ListingResult};

use super::config::CacheConfig;
use super::lock::{rw_read, rw_write};

const SOURCE: &str = "cache::store";

#[derive(Debug, Clone)]
struct Stamped<T> {
    value: T,
    stored_at: Instant,
}

impl<T: Clone> Stamped<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            stored_at: Instant::now(),
        }
    }

    fn fresh(&self, window: Duration) -> Option<T> {
        (self.stored_at.elapsed() < window).then(|| self.value.clone())
    }
}

pub struct QueryStore {
    listings: RwLock<LruCache<ListingQuery, Stamped<ListingResult>>>,
    categories: RwLock<Option<Stamped<CategorySet>>>,
}

impl QueryStore {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            listings: RwLock::new(LruCache::new(config.listing_limit)),
            categories: RwLock::new(None),
        }
    }

    /// Listing page for `query` if it was stored less than `window` ago.
    pub fn fresh_listing(&self, query: &ListingQuery, window: Duration) -> Option<ListingResult> {
        rw_write(&self.listings, SOURCE, "fresh_listing")
            .get(query)
            .and_then(|entry| entry.fresh(window))
    }

    pub fn set_listing(&self, query: ListingQuery, result: ListingResult) {
        rw_write(&self.listings, SOURCE, "set_listing").put(query, Stamped::new(result));
    }

    pub fn invalidate_listings(&self) {
        rw_write(&self.listings, SOURCE, "invalidate_listings").clear();
    }

    pub fn listing_count(&self) -> usize {
        rw_read(&self.listings, SOURCE, "listing_count").len()
    }

    pub fn fresh_categories(&self, window: Duration) -> Option<CategorySet> {
        rw_read(&self.categories, SOURCE, "fresh_categories")
            .as_ref()
            .and_then(|entry| entry.fresh(window))
    }

    pub fn set_categories(&self, categories: CategorySet) {
        *rw_write(&self.categories, SOURCE, "set_categories") = Some(Stamped::new(categories));
    }
}
