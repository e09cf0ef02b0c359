use askama::Template;

pub const SIDEBAR_TITLE: &str = "Dashboard";
pub const HEADER_TITLE: &str = "Product Management";
const MENU: [&str; 3] = ["Products", "Analytics", "Settings"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItemView {
    pub label: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChromeView {
    pub sidebar_open: bool,
    pub sidebar_title: &'static str,
    pub header: &'static str,
    pub menu: Vec<MenuItemView>,
}

impl ChromeView {
    pub fn new(sidebar_open: bool) -> Self {
        Self {
            sidebar_open,
            sidebar_title: SIDEBAR_TITLE,
            header: HEADER_TITLE,
            menu: MENU
                .into_iter()
                .map(|label| MenuItemView {
                    label,
                    active: label == "Products",
                })
                .collect(),
        }
    }
}

#[derive(Template)]
#[template(path = "chrome.txt")]
pub struct ChromeTemplate<'a> {
    pub view: &'a ChromeView,
}
