//! Stockroom query cache.
//!
//! Sits between the dashboard and the remote catalog:
//!
//! - listing pages are fresh for five minutes, keyed by the normalized query
//! - the category set is fresh for ten minutes
//! - concurrent reads of one key share a single request
//! - any successful mutation invalidates every listing page
//!
//! ## Configuration
//!
//! ```toml
//! [cache]
//! listing_fresh_seconds = 300
//! categories_fresh_seconds = 600
//! listing_limit = 50
//! read_retries = 1
//! retry_delay_ms = 1000
//! ```

mod config;
mod lock;
mod query;
mod store;

pub use config::CacheConfig;
pub use query::{Epoch, QueryCache};
pub use store::QueryStore;

pub const METRIC_LISTING_HIT: &str = "stockroom_cache_listing_hit_total";
pub const METRIC_LISTING_MISS: &str = "stockroom_cache_listing_miss_total";
pub const METRIC_CATEGORIES_HIT: &str = "stockroom_cache_categories_hit_total";
pub const METRIC_CATEGORIES_MISS: &str = "stockroom_cache_categories_miss_total";
pub const METRIC_INVALIDATION: &str = "stockroom_cache_invalidation_total";
pub const METRIC_READ_RETRY: &str = "stockroom_catalog_request_retry_total";
