//! Request and response shapes for the demo product catalog API.
//!
//! The catalog returns more fields than the dashboard uses (ratings, images,
//! dimensions, ...). Unknown fields are ignored and missing ones fall back to
//! their defaults so partially populated records still decode.

use serde::{Deserialize, Serialize};

/// Product record as returned by every product endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub description: String,
}

/// Body of `GET /products`, `/products/search` and `/products/category/{name}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListResponse {
    #[serde(default)]
    pub products: Vec<ProductRecord>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub skip: u64,
    #[serde(default)]
    pub limit: u64,
}

/// One element of `GET /products/categories`.
///
/// Older deployments return bare slugs, newer ones return objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryEntry {
    Slug(String),
    Detailed {
        slug: String,
        name: String,
        #[serde(default)]
        url: Option<String>,
    },
}

impl CategoryEntry {
    /// Value used in `/products/category/{slug}`.
    pub fn slug(&self) -> &str {
        match self {
            CategoryEntry::Slug(slug) => slug,
            CategoryEntry::Detailed { slug, .. } => slug,
        }
    }

    /// Human label, if the catalog supplied one.
    pub fn name(&self) -> Option<&str> {
        match self {
            CategoryEntry::Slug(_) => None,
            CategoryEntry::Detailed { name, .. } => Some(name),
        }
    }
}

/// Body sent to `POST /products/add` and `PUT /products/{id}`.
///
/// `id` is only present on submissions produced by the edit form; the client
/// strips it before issuing the update since the path already carries it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub title: String,
    pub price: f64,
    pub stock: u32,
    pub category: String,
    pub description: String,
}

/// Body of `DELETE /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletedProductResponse {
    #[serde(flatten)]
    pub product: ProductRecord,
    #[serde(rename = "isDeleted", default)]
    pub is_deleted: bool,
    #[serde(rename = "deletedOn", default)]
    pub deleted_on: Option<String>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_record_ignores_extra_fields() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "title": "Essence Mascara Lash Princess",
            "price": 9.99,
            "category": "beauty",
            "stock": 5,
            "description": "Popular mascara",
            "rating": 4.94,
            "tags": ["beauty", "mascara"]
        }))
        .expect("record decodes");

        assert_eq!(record.id, 1);
        assert_eq!(record.stock, 5);
        assert_eq!(record.category, "beauty");
    }

    #[test]
    fn created_record_without_optional_fields_decodes() {
        let record: ProductRecord =
            serde_json::from_value(json!({"id": 195, "title": "Pen"})).expect("record decodes");

        assert_eq!(record.title, "Pen");
        assert_eq!(record.price, 0.0);
        assert!(record.description.is_empty());
    }

    #[test]
    fn category_entries_accept_both_shapes() {
        let entries: Vec<CategoryEntry> = serde_json::from_value(json!([
            "smartphones",
            {"slug": "home-decoration", "name": "Home Decoration", "url": "https://x/home-decoration"}
        ]))
        .expect("categories decode");

        assert_eq!(entries[0].slug(), "smartphones");
        assert_eq!(entries[0].name(), None);
        assert_eq!(entries[1].slug(), "home-decoration");
        assert_eq!(entries[1].name(), Some("Home Decoration"));
    }

    #[test]
    fn payload_omits_missing_id() {
        let payload = ProductPayload {
            id: None,
            title: "Pen".into(),
            price: 1.5,
            stock: 10,
            category: "office".into(),
            description: "x".into(),
        };

        let value = serde_json::to_value(&payload).expect("payload serializes");
        assert_eq!(
            value,
            json!({"title": "Pen", "price": 1.5, "stock": 10, "category": "office", "description": "x"})
        );
    }

    #[test]
    fn deleted_response_reads_flags() {
        let response: DeletedProductResponse = serde_json::from_value(json!({
            "id": 7,
            "title": "Pen",
            "isDeleted": true,
            "deletedOn": "2024-05-01T10:00:00.000Z"
        }))
        .expect("delete response decodes");

        assert_eq!(response.product.id, 7);
        assert!(response.is_deleted);
        assert_eq!(response.deleted_on.as_deref(), Some("2024-05-01T10:00:00.000Z"));
    }
}
