//! Uncommitted product form state.

use std::fmt;
use std::str::FromStr;

use super::error::ValidationError;
use super::products::{Product, ProductFields, ProductId, ProductSubmission};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Price,
    Stock,
    Category,
    Description,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Title,
        DraftField::Price,
        DraftField::Stock,
        DraftField::Category,
        DraftField::Description,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DraftField::Title => "title",
            DraftField::Price => "price",
            DraftField::Stock => "stock",
            DraftField::Category => "category",
            DraftField::Description => "description",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Price => "Price",
            DraftField::Stock => "Stock",
            DraftField::Category => "Category",
            DraftField::Description => "Description",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            DraftField::Title => "Product title",
            DraftField::Price => "0.00",
            DraftField::Stock => "0",
            DraftField::Category => "Product category",
            DraftField::Description => "Product description",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        DraftField::ALL
            .into_iter()
            .find(|field| field.as_str() == needle)
            .ok_or_else(|| format!("unknown field `{s}`"))
    }
}

/// Text copy of a product's fields while the form is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductDraft {
    pub title: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub description: String,
}

impl ProductDraft {
    pub fn from_product(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: product.price.to_string(),
            stock: product.stock.to_string(),
            category: product.category.clone(),
            description: product.description.clone(),
        }
    }

    pub fn get(&self, field: DraftField) -> &str {
        match field {
            DraftField::Title => &self.title,
            DraftField::Price => &self.price,
            DraftField::Stock => &self.stock,
            DraftField::Category => &self.category,
            DraftField::Description => &self.description,
        }
    }

    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let slot = match field {
            DraftField::Title => &mut self.title,
            DraftField::Price => &mut self.price,
            DraftField::Stock => &mut self.stock,
            DraftField::Category => &mut self.category,
            DraftField::Description => &mut self.description,
        };
        *slot = value.into();
    }

    /// Checks required fields and coerces price and stock to numbers.
    pub fn validate(&self) -> Result<ProductFields, ValidationError> {
        for field in DraftField::ALL {
            if self.get(field).trim().is_empty() {
                return Err(ValidationError::required(field.as_str()));
            }
        }

        let price_raw = self.price.trim();
        let price = price_raw
            .parse::<f64>()
            .ok()
            .filter(|value| value.is_finite() && *value >= 0.0)
            .ok_or_else(|| {
                ValidationError::invalid_number("price", "a non-negative number", price_raw)
            })?;

        let stock_raw = self.stock.trim();
        let stock = stock_raw.parse::<u32>().map_err(|_| {
            ValidationError::invalid_number("stock", "a non-negative whole number", stock_raw)
        })?;

        Ok(ProductFields {
            title: self.title.clone(),
            price,
            stock,
            category: self.category.clone(),
            description: self.description.clone(),
        })
    }

    /// Validates and tags the result with `editing` so edits go to update.
    pub fn submit(&self, editing: Option<ProductId>) -> Result<ProductSubmission, ValidationError> {
        let fields = self.validate()?;
        Ok(match editing {
            Some(id) => ProductSubmission::update(id, fields),
            None => ProductSubmission::create(fields),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn pen_draft() -> ProductDraft {
        ProductDraft {
            title: "Pen".into(),
            price: "1.5".into(),
            stock: "10".into(),
            category: "office".into(),
            description: "x".into(),
        }
    }

    #[test]
    fn add_submission_coerces_numbers() {
        let submission = pen_draft().submit(None).expect("valid draft");

        assert_eq!(
            serde_json::to_value(submission.payload()).expect("payload"),
            json!({
                "title": "Pen",
                "price": 1.5,
                "stock": 10,
                "category": "office",
                "description": "x"
            })
        );
    }

    #[test]
    fn edit_submission_targets_update() {
        let submission = pen_draft()
            .submit(Some(ProductId::new(7)))
            .expect("valid draft");

        assert_eq!(submission.id, Some(ProductId::new(7)));
        assert_eq!(
            serde_json::to_value(submission.payload()).expect("payload")["id"],
            json!(7)
        );
    }

    #[test]
    fn blank_required_field_is_rejected() {
        let mut draft = pen_draft();
        draft.set(DraftField::Category, "  ");

        assert_eq!(
            draft.validate().expect_err("category missing"),
            ValidationError::required("category")
        );
    }

    #[test]
    fn non_numeric_price_is_rejected() {
        let mut draft = pen_draft();
        draft.set(DraftField::Price, "cheap");

        let err = draft.validate().expect_err("bad price");
        assert_eq!(err.field(), "price");
    }

    #[test]
    fn negative_stock_is_rejected() {
        let mut draft = pen_draft();
        draft.set(DraftField::Stock, "-3");

        let err = draft.validate().expect_err("bad stock");
        assert_eq!(err.field(), "stock");
    }

    #[test]
    fn draft_from_product_round_trips_fields() {
        let product = Product {
            id: ProductId::new(7),
            title: "Pen".into(),
            price: 9.99,
            category: "office".into(),
            stock: 3,
            description: "blue ink".into(),
        };

        let draft = ProductDraft::from_product(&product);
        assert_eq!(draft.price, "9.99");
        assert_eq!(draft.stock, "3");
        assert_eq!(draft.get(DraftField::Description), "blue ink");
    }

    #[test]
    fn field_names_parse_case_insensitively() {
        assert_eq!("Price".parse::<DraftField>(), Ok(DraftField::Price));
        assert!("colour".parse::<DraftField>().is_err());
    }
}
