use askama::Template;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsView {
    pub total_products: String,
    pub categories: String,
    pub current_page: String,
}

impl StatsView {
    pub fn new(total: Option<u64>, categories: Option<usize>, page: u32, total_pages: u32) -> Self {
        Self {
            total_products: total.map_or_else(|| "-".to_string(), |t| t.to_string()),
            categories: categories.map_or_else(|| "-".to_string(), |c| c.to_string()),
            current_page: format!("{page} of {total_pages}"),
        }
    }
}

#[derive(Template)]
#[template(path = "stats.txt")]
pub struct StatsTemplate<'a> {
    pub view: &'a StatsView,
}
