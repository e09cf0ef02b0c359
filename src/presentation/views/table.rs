use askama::Template;

use crate::domain::listing::ListingResult;
use crate::domain::products::Product;

const TITLE_WIDTH: usize = 32;
const CATEGORY_WIDTH: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub line: String,
    pub actions: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: String,
    pub rows: Vec<RowView>,
    pub loading: bool,
    pub empty: bool,
    pub refreshing: bool,
}

impl TableView {
    /// `result` is the page on screen; `fetching` marks a pending replacement.
    pub fn new(result: Option<&ListingResult>, fetching: bool) -> Self {
        let header = format_line("ID", "PRODUCT", "CATEGORY", "PRICE", "STOCK");
        match result {
            None => Self {
                header,
                rows: Vec::new(),
                loading: true,
                empty: false,
                refreshing: false,
            },
            Some(result) => Self {
                header,
                rows: result.products.iter().map(row).collect(),
                loading: false,
                empty: result.products.is_empty(),
                refreshing: fetching,
            },
        }
    }
}

fn row(product: &Product) -> RowView {
    RowView {
        line: format_line(
            &product.id.to_string(),
            &product.title,
            &product.category,
            &format_price(product.price),
            &product.stock.to_string(),
        ),
        actions: format!("edit {id} | delete {id}", id = product.id),
    }
}

fn format_line(id: &str, title: &str, category: &str, price: &str, stock: &str) -> String {
    format!(
        "{id:>5}  {title:<tw$}  {category:<cw$}  {price:>10}  {stock:>6}",
        title = truncate(title, TITLE_WIDTH),
        category = truncate(category, CATEGORY_WIDTH),
        tw = TITLE_WIDTH,
        cw = CATEGORY_WIDTH,
    )
}

/// Dollar amount with two decimals, e.g. `$12.50`.
pub fn format_price(price: f64) -> String {
    format!("${price:.2}")
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(width.saturating_sub(3)).collect();
    cut.push_str("...");
    cut
}

#[derive(Template)]
#[template(path = "table.txt")]
pub struct TableTemplate<'a> {
    pub view: &'a TableView,
}
