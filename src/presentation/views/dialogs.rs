//! Overlays and banners: delete confirmation, notices, the error panel and help.

use askama::Template;

use crate::application::catalog::CatalogError;
use crate::application::dashboard::Notice;
use crate::domain::products::ProductId;

pub const CONFIRM_MESSAGE: &str = "Are you sure you want to delete this product?";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmView {
    pub message: &'static str,
    pub id: String,
    pub confirm_label: &'static str,
    pub deleting: bool,
}

impl ConfirmView {
    pub fn new(id: ProductId, deleting: bool) -> Self {
        Self {
            message: CONFIRM_MESSAGE,
            id: id.to_string(),
            confirm_label: if deleting { "Deleting..." } else { "Delete" },
            deleting,
        }
    }
}

#[derive(Template)]
#[template(path = "confirm.txt")]
pub struct ConfirmTemplate<'a> {
    pub view: &'a ConfirmView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub detail: Option<String>,
}

impl From<&Notice> for NoticeView {
    fn from(notice: &Notice) -> Self {
        Self {
            message: notice.message(),
            detail: notice.detail(),
        }
    }
}

#[derive(Template)]
#[template(path = "notice.txt")]
pub struct NoticeTemplate<'a> {
    pub view: &'a NoticeView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorPanelView {
    pub message: String,
    pub action: &'static str,
}

impl ErrorPanelView {
    pub fn products(err: &CatalogError) -> Self {
        Self {
            message: format!("Error loading products: {err}"),
            action: "Try again",
        }
    }

    pub fn categories(err: &CatalogError) -> Self {
        Self {
            message: format!("Error loading categories: {err}"),
            action: "Try again",
        }
    }
}

#[derive(Template)]
#[template(path = "error_panel.txt")]
pub struct ErrorPanelTemplate<'a> {
    pub view: &'a ErrorPanelView,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpLineView {
    pub usage: &'static str,
    pub summary: &'static str,
}

#[derive(Template)]
#[template(path = "help.txt")]
pub struct HelpTemplate<'a> {
    pub lines: &'a [HelpLineView],
}
