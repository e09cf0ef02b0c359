//! Product records and the submissions that create or change them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use stockroom_api_types::{DeletedProductResponse, ProductPayload, ProductRecord};

/// Server-assigned product identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub price: f64,
    pub category: String,
    pub stock: u32,
    pub description: String,
}

impl From<ProductRecord> for Product {
    fn from(record: ProductRecord) -> Self {
        Self {
            id: ProductId(record.id),
            title: record.title,
            price: record.price,
            category: record.category,
            stock: record.stock,
            description: record.description,
        }
    }
}

/// Validated, typed product fields ready to send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub title: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub description: String,
}

impl ProductFields {
    pub fn to_payload(&self, id: Option<ProductId>) -> ProductPayload {
        ProductPayload {
            id: id.map(ProductId::get),
            title: self.title.clone(),
            price: self.price,
            stock: self.stock,
            category: self.category.clone(),
            description: self.description.clone(),
        }
    }
}

/// Outcome of submitting the product form.
///
/// `id` is set when the form was opened for an existing product, which routes
/// the submission to the update endpoint instead of create.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSubmission {
    pub id: Option<ProductId>,
    pub fields: ProductFields,
}

impl ProductSubmission {
    pub fn create(fields: ProductFields) -> Self {
        Self { id: None, fields }
    }

    pub fn update(id: ProductId, fields: ProductFields) -> Self {
        Self {
            id: Some(id),
            fields,
        }
    }

    pub fn payload(&self) -> ProductPayload {
        self.fields.to_payload(self.id)
    }
}

/// Acknowledgement returned by the catalog for a delete.
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedProduct {
    pub product: Product,
    pub is_deleted: bool,
    pub deleted_on: Option<String>,
}

impl From<DeletedProductResponse> for DeletedProduct {
    fn from(response: DeletedProductResponse) -> Self {
        Self {
            product: response.product.into(),
            is_deleted: response.is_deleted,
            deleted_on: response.deleted_on,
        }
    }
}
