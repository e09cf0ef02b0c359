//! Plain-text output of the one-shot subcommands.

use askama::Template;

use crate::domain::categories::CategorySet;
use crate::domain::listing::{ListingQuery, ListingResult};
use crate::domain::products::{DeletedProduct, Product};

use super::filters::category_label;
use super::pagination::PaginationView;
use super::table::{TableView, format_price};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingReport {
    pub table: TableView,
    pub pagination: PaginationView,
    pub footer: String,
}

impl ListingReport {
    pub fn new(query: &ListingQuery, result: &ListingResult) -> Self {
        let total_pages = result.total_pages(query.page_size);
        let mut pagination =
            PaginationView::new(query.page, query.page_size, result.total, total_pages);
        // A one-shot listing always prints its summary line.
        pagination.visible = true;
        Self {
            table: TableView::new(Some(result), false),
            footer: format!("Page {} of {}", query.page, total_pages),
            pagination,
        }
    }
}

#[derive(Template)]
#[template(path = "listing_report.txt")]
pub struct ListingReportTemplate<'a> {
    pub table: String,
    pub view: &'a ListingReport,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryLineView {
    pub slug: String,
    pub label: String,
}

#[derive(Template)]
#[template(path = "categories_report.txt")]
pub struct CategoriesReportTemplate {
    pub empty: bool,
    pub count: usize,
    pub lines: Vec<CategoryLineView>,
}

impl CategoriesReportTemplate {
    pub fn new(categories: &CategorySet) -> Self {
        Self {
            empty: categories.is_empty(),
            count: categories.len(),
            lines: categories
                .iter()
                .map(|category| CategoryLineView {
                    slug: category.slug.clone(),
                    label: category_label(category),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetailView {
    pub heading: String,
    pub id: String,
    pub title: String,
    pub price: String,
    pub stock: String,
    pub category: String,
    pub description: String,
}

impl ProductDetailView {
    pub fn new(heading: impl Into<String>, product: &Product) -> Self {
        Self {
            heading: heading.into(),
            id: product.id.to_string(),
            title: product.title.clone(),
            price: format_price(product.price),
            stock: product.stock.to_string(),
            category: product.category.clone(),
            description: product.description.clone(),
        }
    }

    pub fn deleted(deleted: &DeletedProduct) -> Self {
        let heading = match (deleted.is_deleted, deleted.deleted_on.as_deref()) {
            (true, Some(on)) => format!("Product deleted on {on}"),
            (true, None) => "Product deleted".to_string(),
            (false, _) => "Delete not acknowledged".to_string(),
        };
        Self::new(heading, &deleted.product)
    }
}

#[derive(Template)]
#[template(path = "product_detail.txt")]
pub struct ProductDetailTemplate<'a> {
    pub view: &'a ProductDetailView,
}
