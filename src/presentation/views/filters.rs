use askama::Template;

use crate::domain::categories::{Category, CategorySet};
use crate::domain::listing::{ALL_CATEGORIES, is_all_categories};

pub const ALL_CATEGORIES_LABEL: &str = "All Categories";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryOptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FiltersView {
    pub search: String,
    pub selected_label: String,
    pub options: Vec<CategoryOptionView>,
}

impl FiltersView {
    pub fn new(search: &str, category: &str, categories: Option<&CategorySet>) -> Self {
        let all_selected = is_all_categories(category);
        let mut options = vec![CategoryOptionView {
            value: ALL_CATEGORIES.to_string(),
            label: ALL_CATEGORIES_LABEL.to_string(),
            selected: all_selected,
        }];
        options.extend(categories.into_iter().flat_map(|set| set.iter()).map(|entry| {
            CategoryOptionView {
                value: entry.slug.clone(),
                label: category_label(entry),
                selected: !all_selected && entry.slug == category,
            }
        }));

        let selected_label = options
            .iter()
            .find(|option| option.selected)
            .map(|option| option.label.clone())
            .unwrap_or_else(|| capitalize(category));

        Self {
            search: search.to_string(),
            selected_label,
            options,
        }
    }
}

/// Display label: the API's name when present, else the slug, first letter upper-cased.
pub fn category_label(category: &Category) -> String {
    capitalize(category.name.as_deref().unwrap_or(&category.slug))
}

pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[derive(Template)]
#[template(path = "filters.txt")]
pub struct FiltersTemplate<'a> {
    pub view: &'a FiltersView,
}
