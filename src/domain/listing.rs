//! Listing queries and the pages they resolve to.

use stockroom_api_types::ProductListResponse;

use super::products::Product;

/// Rows per listing page. The dashboard never changes it.
pub const PAGE_SIZE: u32 = 10;

/// Category value meaning "no category filter".
pub const ALL_CATEGORIES: &str = "all";

/// Returns true when `category` selects every category.
pub fn is_all_categories(category: &str) -> bool {
    let trimmed = category.trim();
    trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL_CATEGORIES)
}

/// Normalized listing request; doubles as the listing cache key.
///
/// Search text and category are mutually exclusive: a category filter drops
/// the search text so equivalent requests share one key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListingQuery {
    pub page: u32,
    pub page_size: u32,
    pub search: String,
    pub category: String,
}

/// Endpoint family a listing query resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingRoute<'a> {
    All,
    Search(&'a str),
    Category(&'a str),
}

impl ListingQuery {
    pub fn new(page: u32, search: &str, category: &str) -> Self {
        Self::with_page_size(page, PAGE_SIZE, search, category)
    }

    pub fn with_page_size(page: u32, page_size: u32, search: &str, category: &str) -> Self {
        let (search, category) = if is_all_categories(category) {
            (search.trim().to_string(), ALL_CATEGORIES.to_string())
        } else {
            (String::new(), category.trim().to_string())
        };

        Self {
            page: page.max(1),
            page_size,
            search,
            category,
        }
    }

    pub fn route(&self) -> ListingRoute<'_> {
        if !is_all_categories(&self.category) {
            ListingRoute::Category(&self.category)
        } else if self.search.is_empty() {
            ListingRoute::All
        } else {
            ListingRoute::Search(&self.search)
        }
    }

    /// Offset of the first row, `(page - 1) * page_size`.
    pub fn skip(&self) -> u64 {
        u64::from(self.page.saturating_sub(1)) * u64::from(self.page_size)
    }
}

/// `ceil(total / page_size)`; zero when there is nothing to show.
pub fn total_pages(total: u64, page_size: u32) -> u32 {
    if page_size == 0 {
        return 0;
    }
    u32::try_from(total.div_ceil(u64::from(page_size))).unwrap_or(u32::MAX)
}

#[derive(Debug, Clone, PartialEq)]
pub struct ListingResult {
    pub products: Vec<Product>,
    pub total: u64,
    pub skip: u64,
    pub limit: u64,
}

impl ListingResult {
    pub fn empty() -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            skip: 0,
            limit: 0,
        }
    }

    pub fn total_pages(&self, page_size: u32) -> u32 {
        total_pages(self.total, page_size)
    }
}

impl From<ProductListResponse> for ListingResult {
    fn from(response: ProductListResponse) -> Self {
        Self {
            products: response.products.into_iter().map(Product::from).collect(),
            total: response.total,
            skip: response.skip,
            limit: response.limit,
        }
    }
}
