//! Read-through query cache over the catalog port.
//!
//! Reads go through freshness windows and share one in-flight request per
//! key. Mutations are passed through once and invalidate every listing page
//! on success.

use std::collections::HashMap;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use futures::FutureExt;
use futures::future::{BoxFuture, Shared};
use metrics::counter;
use tracing::{debug, info, warn};

use crate::application::catalog::{CatalogApi, CatalogError};
use crate::domain::categories::CategorySet;
use crate::domain::listing::{ListingQuery, ListingResult, ListingRoute};
use crate::domain::products::{DeletedProduct, Product, ProductFields, ProductId};

use super::config::CacheConfig;
use super::lock::mutex_lock;
use super::store::QueryStore;
use super::{
    METRIC_CATEGORIES_HIT, METRIC_CATEGORIES_MISS, METRIC_INVALIDATION, METRIC_LISTING_HIT,
    METRIC_LISTING_MISS, METRIC_READ_RETRY,
};

const SOURCE: &str = "cache::query";

type SharedRead<T> = Shared<BoxFuture<'static, Result<T, CatalogError>>>;

/// Generation counter bumped by every listing invalidation.
pub type Epoch = u64;

struct PendingListing {
    epoch: Epoch,
    request: SharedRead<ListingResult>,
}

#[derive(Debug, Clone, Copy)]
struct RetryPolicy {
    retries: u32,
    delay: Duration,
}

pub struct QueryCache {
    config: CacheConfig,
    api: Arc<dyn CatalogApi>,
    store: QueryStore,
    epoch: AtomicU64,
    pending_listings: Mutex<HashMap<ListingQuery, PendingListing>>,
    pending_categories: Mutex<Option<SharedRead<CategorySet>>>,
}

impl QueryCache {
    pub fn new(config: CacheConfig, api: Arc<dyn CatalogApi>) -> Self {
        let store = QueryStore::new(&config);
        Self {
            config,
            api,
            store,
            epoch: AtomicU64::new(0),
            pending_listings: Mutex::new(HashMap::new()),
            pending_categories: Mutex::new(None),
        }
    }

    pub fn epoch(&self) -> Epoch {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Synchronous freshness probe: the cached page when it is still fresh.
    pub fn cached_listing(&self, query: &ListingQuery) -> Option<ListingResult> {
        let hit = self
            .store
            .fresh_listing(query, self.config.listing_fresh_for)?;
        counter!(METRIC_LISTING_HIT).increment(1);
        Some(hit)
    }

    pub fn cached_categories(&self) -> Option<CategorySet> {
        let hit = self
            .store
            .fresh_categories(self.config.categories_fresh_for)?;
        counter!(METRIC_CATEGORIES_HIT).increment(1);
        Some(hit)
    }

    /// Resolve a listing page, from cache when fresh and from the catalog otherwise.
    pub async fn listing(&self, query: &ListingQuery) -> Result<ListingResult, CatalogError> {
        if let Some(hit) = self.cached_listing(query) {
            debug!(
                target: SOURCE,
                page = query.page,
                search = %query.search,
                category = %query.category,
                "listing served from cache"
            );
            return Ok(hit);
        }
        counter!(METRIC_LISTING_MISS).increment(1);

        let (epoch, request) = self.join_listing(query);
        let outcome = request.await;

        {
            let mut pending = mutex_lock(&self.pending_listings, SOURCE, "listing.settle");
            if pending.get(query).is_some_and(|entry| entry.epoch == epoch) {
                pending.remove(query);
            }
        }

        let result = outcome?;
        if self.epoch() == epoch {
            self.store.set_listing(query.clone(), result.clone());
        } else {
            debug!(
                target: SOURCE,
                started = epoch,
                current = self.epoch(),
                "listing resolved across an invalidation; not cached"
            );
        }
        Ok(result)
    }

    /// Resolve the category set, from cache when fresh and from the catalog otherwise.
    pub async fn categories(&self) -> Result<CategorySet, CatalogError> {
        if let Some(hit) = self.cached_categories() {
            return Ok(hit);
        }
        counter!(METRIC_CATEGORIES_MISS).increment(1);

        let request = {
            let mut pending = mutex_lock(&self.pending_categories, SOURCE, "categories.join");
            match pending.as_ref() {
                Some(request) => request.clone(),
                None => {
                    let api = Arc::clone(&self.api);
                    let policy = self.retry_policy();
                    let request = async move {
                        retry_read(policy, || {
                            let api = Arc::clone(&api);
                            async move { api.list_categories().await }
                        })
                        .await
                    }
                    .boxed()
                    .shared();
                    *pending = Some(request.clone());
                    request
                }
            }
        };

        let outcome = request.await;
        mutex_lock(&self.pending_categories, SOURCE, "categories.settle").take();

        let categories = outcome?;
        self.store.set_categories(categories.clone());
        Ok(categories)
    }

    pub async fn create_product(&self, fields: &ProductFields) -> Result<Product, CatalogError> {
        let product = self.api.create_product(fields).await?;
        info!(target: SOURCE, id = %product.id, "product created");
        self.invalidate_listings();
        Ok(product)
    }

    pub async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<Product, CatalogError> {
        let product = self.api.update_product(id, fields).await?;
        info!(target: SOURCE, id = %id, "product updated");
        self.invalidate_listings();
        Ok(product)
    }

    pub async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, CatalogError> {
        let deleted = self.api.delete_product(id).await?;
        info!(target: SOURCE, id = %id, "product deleted");
        self.invalidate_listings();
        Ok(deleted)
    }

    /// Drop every listing page and every in-flight listing request.
    ///
    /// The category set is left alone.
    pub fn invalidate_listings(&self) {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.store.invalidate_listings();
        mutex_lock(&self.pending_listings, SOURCE, "invalidate_listings").clear();
        counter!(METRIC_INVALIDATION).increment(1);
        debug!(target: SOURCE, epoch, "listings invalidated");
    }

    fn join_listing(&self, query: &ListingQuery) -> (Epoch, SharedRead<ListingResult>) {
        let mut pending = mutex_lock(&self.pending_listings, SOURCE, "listing.join");
        let epoch = self.epoch();
        if let Some(entry) = pending.get(query).filter(|entry| entry.epoch == epoch) {
            return (entry.epoch, entry.request.clone());
        }

        let api = Arc::clone(&self.api);
        let policy = self.retry_policy();
        let owned = query.clone();
        let request = async move {
            retry_read(policy, || {
                let api = Arc::clone(&api);
                let query = owned.clone();
                async move { fetch_listing(api.as_ref(), &query).await }
            })
            .await
        }
        .boxed()
        .shared();

        pending.insert(
            query.clone(),
            PendingListing {
                epoch,
                request: request.clone(),
            },
        );
        (epoch, request)
    }

    fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            retries: self.config.read_retries,
            delay: self.config.retry_delay,
        }
    }
}

async fn fetch_listing(
    api: &dyn CatalogApi,
    query: &ListingQuery,
) -> Result<ListingResult, CatalogError> {
    let (page, size) = (query.page, query.page_size);
    match query.route() {
        ListingRoute::All => api.list_products(page, size, None).await,
        ListingRoute::Search(text) => api.list_products(page, size, Some(text)).await,
        ListingRoute::Category(category) => api.list_by_category(category, page, size).await,
    }
}

async fn retry_read<T, F, Fut>(policy: RetryPolicy, mut attempt: F) -> Result<T, CatalogError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, CatalogError>>,
{
    let mut retries_left = policy.retries;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if retries_left > 0 => {
                retries_left -= 1;
                counter!(METRIC_READ_RETRY, "operation" => err.operation().as_str()).increment(1);
                warn!(
                    target: SOURCE,
                    operation = %err.operation(),
                    error = %err,
                    delay_ms = policy.delay.as_millis() as u64,
                    "catalog read failed; retrying"
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
