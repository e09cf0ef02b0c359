//! Port describing the remote product catalog.

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::categories::CategorySet;
use crate::domain::listing::ListingResult;
use crate::domain::products::{DeletedProduct, Product, ProductFields, ProductId};

/// Catalog exchange a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogOperation {
    ListProducts,
    SearchProducts,
    ListByCategory,
    ListCategories,
    CreateProduct,
    UpdateProduct,
    DeleteProduct,
}

impl CatalogOperation {
    pub fn as_str(self) -> &'static str {
        match self {
            CatalogOperation::ListProducts => "fetch products",
            CatalogOperation::SearchProducts => "search products",
            CatalogOperation::ListByCategory => "fetch products by category",
            CatalogOperation::ListCategories => "fetch categories",
            CatalogOperation::CreateProduct => "add product",
            CatalogOperation::UpdateProduct => "update product",
            CatalogOperation::DeleteProduct => "delete product",
        }
    }

    pub fn is_read(self) -> bool {
        matches!(
            self,
            CatalogOperation::ListProducts
                | CatalogOperation::SearchProducts
                | CatalogOperation::ListByCategory
                | CatalogOperation::ListCategories
        )
    }
}

impl fmt::Display for CatalogOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure of a single catalog exchange.
///
/// Cloneable so one in-flight result can be shared by every waiter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("failed to {operation}: network error: {message}")]
    Network {
        operation: CatalogOperation,
        message: String,
    },
    #[error("failed to {operation}: server responded {status}: {body}")]
    Server {
        operation: CatalogOperation,
        status: u16,
        body: String,
    },
    #[error("failed to {operation}: unreadable response: {message}")]
    Decode {
        operation: CatalogOperation,
        message: String,
    },
}

impl CatalogError {
    pub fn network(operation: CatalogOperation, message: impl Into<String>) -> Self {
        Self::Network {
            operation,
            message: message.into(),
        }
    }

    pub fn server(operation: CatalogOperation, status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            operation,
            status,
            body: body.into(),
        }
    }

    pub fn decode(operation: CatalogOperation, message: impl Into<String>) -> Self {
        Self::Decode {
            operation,
            message: message.into(),
        }
    }

    pub fn operation(&self) -> CatalogOperation {
        match self {
            CatalogError::Network { operation, .. }
            | CatalogError::Server { operation, .. }
            | CatalogError::Decode { operation, .. } => *operation,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            CatalogError::Server { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /products`, or `/products/search` when `search` is set.
    async fn list_products(
        &self,
        page: u32,
        page_size: u32,
        search: Option<&str>,
    ) -> Result<ListingResult, CatalogError>;

    async fn list_by_category(
        &self,
        category: &str,
        page: u32,
        page_size: u32,
    ) -> Result<ListingResult, CatalogError>;

    async fn list_categories(&self) -> Result<CategorySet, CatalogError>;

    async fn create_product(&self, fields: &ProductFields) -> Result<Product, CatalogError>;

    async fn update_product(
        &self,
        id: ProductId,
        fields: &ProductFields,
    ) -> Result<Product, CatalogError>;

    async fn delete_product(&self, id: ProductId) -> Result<DeletedProduct, CatalogError>;
}
