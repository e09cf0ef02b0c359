//! HTTP adapter for the remote product catalog.

use async_trait::async_trait;
use reqwest::{Client, Method, Response, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use stockroom_api_types::{
    CategoryEntry, DeletedProductResponse, ProductListResponse, ProductRecord,
};
use tracing::{debug, warn};

use crate::application::catalog::{CatalogApi, CatalogError, CatalogOperation};
use crate::config::CatalogSettings;
use crate::domain::categories::CategorySet;
use crate::domain::listing::ListingResult;
use crate::domain::products::{DeletedProduct, Product, ProductFields, ProductId};

use super::error::InfraError;

#[derive(Clone, Debug)]
pub struct CatalogClient {
    client: Client,
    base: Url,
    delay_ms: u64,
}

impl CatalogClient {
    pub fn new(settings: &CatalogSettings) -> Result<Self, InfraError> {
        let mut base = settings.base_url.clone();
        if base.cannot_be_a_base() {
            return Err(InfraError::UnusableBaseUrl {
                url: base.to_string(),
            });
        }
        base.set_query(None);
        base.set_fragment(None);

        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(settings.request_timeout)
            .build()
            .map_err(InfraError::ClientBuild)?;

        Ok(Self {
            client,
            base,
            delay_ms: settings.delay_ms,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("stockroom/", env!("CARGO_PKG_VERSION"))
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, segments: &[&str], query: &[(&str, String)]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        if !query.is_empty() {
            let mut qp = url.query_pairs_mut();
            for (k, v) in query {
                qp.append_pair(k, v);
            }
        }
        url
    }

    fn page_query(&self, page: u32, page_size: u32) -> Vec<(&'static str, String)> {
        let skip = u64::from(page.max(1) - 1) * u64::from(page_size);
        vec![
            ("limit", page_size.to_string()),
            ("skip", skip.to_string()),
            ("delay", self.delay_ms.to_string()),
        ]
    }

    async fn request<T, B>(
        &self,
        operation: CatalogOperation,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<T, CatalogError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        debug!(operation = %operation, method = %method, url = %url, "catalog request");

        let mut req = self.client.request(method, url);
        if let Some(b) = body {
            req = req.json(b);
        }

        let resp = req.send().await.map_err(|err| {
            warn!(operation = %operation, error = %err, "catalog request failed");
            CatalogError::network(operation, err.to_string())
        })?;
        Self::handle(operation, resp).await
    }

    async fn handle<T: DeserializeOwned>(
        operation: CatalogOperation,
        resp: Response,
    ) -> Result<T, CatalogError> {
        let status = resp.status();
        let bytes = resp
            .bytes()
            .await
            .map_err(|err| CatalogError::network(operation, err.to_string()))?;
        if !status.is_success() {
            let text = String::from_utf8_lossy(&bytes).into_owned();
            warn!(
                operation = %operation,
                status = status.as_u16(),
                "catalog responded with failure"
            );
            return Err(CatalogError::server(operation, status.as_u16(), text));
        }
        serde_json::from_slice(&bytes)
            .map_err(|err| CatalogError::decode(operation, format!("failed to parse body: {err}")))
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<ListingResult, CatalogError> {
        let mut query = self.page_query(page, page_size);
        let (operation, url) = match search.filter(|text| !text.is_empty()) {
            Some(text) => {
                query.insert(0, ("q", text.to_string()));
                (
                    CatalogOperation::SearchProducts,
                    self.endpoint(&["products", "search"], &query),
                )
            }
            None => (
                CatalogOperation::ListProducts,
                self.endpoint(&["products"], &query),
            ),
        };

        let body: ProductListResponse = self
            .request(operation, Method::GET, url, None::<&()>)
            .await?;
        Ok(body.into())
    }

    async fn list_by_category(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ListingResult, CatalogError> {
        let query = self.page_query(page, page_size);
        let url = self.endpoint(&["products", "category", category], &query);
        let body: ProductListResponse = self
            .request(CatalogOperation::ListByCategory, Method::GET, url, None::<&()>)
            .await?;
        Ok(body.into())
    }

    async fn list_categories(&self) -> Result<CategorySet, CatalogError> {
        let url = self.endpoint(&["products", "categories"], &[]);
        let entries: Vec<CategoryEntry> = self
            .request(CatalogOperation::ListCategories, Method::GET, url, None::<&()>)
            .await?;
        Ok(entries.into_iter().collect())
    }

    async fn create_product(&self, fields: &ProductFields) -> Result<Product, CatalogError> {
        let url = self.endpoint(&["products", "add"], &[]);
        let record: ProductRecord = self
            .request(
                CatalogOperation::CreateProduct,
                Method::POST,
                url,
                Some(&fields.to_payload(None)),
            )
            .await?;
        Ok(record.into())
    }

    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<Product, CatalogError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["products", &id_segment], &[]);
        let record: ProductRecord = self
            .request(
                CatalogOperation::UpdateProduct,
                Method::PUT,
                url,
                Some(&fields.to_payload(None)),
            )
            .await?;
        Ok(record.into())
    }

    async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, CatalogError> {
        let id_segment = id.to_string();
        let url = self.endpoint(&["products", &id_segment], &[]);
        let response: DeletedProductResponse = self
            .request(CatalogOperation::DeleteProduct, Method::DELETE, url, None::<&()>)
            .await?;
        Ok(response.into())
    }
}
