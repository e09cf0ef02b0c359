//! Cache configuration.
//!
//! Freshness windows, the listing LRU bound, and the read retry policy.

use std::num::NonZeroUsize;
use std::time::Duration;

const DEFAULT_LISTING_FRESH_SECS: u64 = 5 * 60;
const DEFAULT_CATEGORIES_FRESH_SECS: u64 = 10 * 60;
const DEFAULT_LISTING_LIMIT: usize = 50;
const DEFAULT_READ_RETRIES: u32 = 1;
const DEFAULT_RETRY_DELAY_MS: u64 = 1000;

#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a resolved listing page is served without a round-trip.
    pub listing_fresh_for: Duration,
    /// How long the category set is served without a round-trip.
    pub categories_fresh_for: Duration,
    /// Maximum listing pages kept; the least recently read page is evicted.
    pub listing_limit: NonZeroUsize,
    /// Extra attempts granted to a failed read. Mutations never retry.
    pub read_retries: u32,
    /// Pause before each read retry.
    pub retry_delay: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            listing_fresh_for: Duration::from_secs(DEFAULT_LISTING_FRESH_SECS),
            categories_fresh_for: Duration::from_secs(DEFAULT_CATEGORIES_FRESH_SECS),
            listing_limit: NonZeroUsize::new(DEFAULT_LISTING_LIMIT).unwrap_or(NonZeroUsize::MIN),
            read_retries: DEFAULT_READ_RETRIES,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            listing_fresh_for: settings.listing_fresh_for,
            categories_fresh_for: settings.categories_fresh_for,
            listing_limit: settings.listing_limit,
            read_retries: settings.read_retries,
            retry_delay: settings.retry_delay,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let config = CacheConfig::default();
        assert_eq!(config.listing_fresh_for, Duration::from_secs(300));
        assert_eq!(config.categories_fresh_for, Duration::from_secs(600));
        assert_eq!(config.listing_limit.get(), 50);
        assert_eq!(config.read_retries, 1);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
    }
}
