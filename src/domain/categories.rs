use stockroom_api_types::CategoryEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Filter value sent to the catalog.
    pub slug: String,
    /// Display name, when the catalog provides one.
    pub name: Option<String>,
}

impl From<CategoryEntry> for Category {
    fn from(entry: CategoryEntry) -> Self {
        match entry {
            CategoryEntry::Slug(slug) => Self { slug, name: None },
            CategoryEntry::Detailed { slug, name, .. } => Self {
                slug,
                name: Some(name),
            },
        }
    }
}

/// Read-only category reference data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategorySet {
    categories: Vec<Category>,
}

impl CategorySet {
    pub fn new(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }
}

impl FromIterator<CategoryEntry> for CategorySet {
    fn from_iter<I: IntoIterator<Item = CategoryEntry>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Category::from).collect())
    }
}
