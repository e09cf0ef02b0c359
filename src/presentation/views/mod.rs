//! Pure state-to-text views.
//!
//! Each component derives a view model from [`DashboardState`] and renders it
//! through its own askama template; [`DashboardView`] stacks them into a frame.

use askama::Template;
use tracing::error;

use crate::application::dashboard::DashboardState;
use crate::application::error::AppError;

pub mod chrome;
pub mod dialogs;
pub mod filters;
pub mod form;
pub mod pagination;
pub mod reports;
pub mod stats;
pub mod table;

use chrome::{ChromeTemplate, ChromeView};
use dialogs::{
    ConfirmTemplate, ConfirmView, ErrorPanelTemplate, ErrorPanelView, HelpLineView, HelpTemplate,
    NoticeTemplate, NoticeView,
};
use filters::{FiltersTemplate, FiltersView};
use form::{FormTemplate, FormView};
use pagination::{PaginationTemplate, PaginationView};
use stats::{StatsTemplate, StatsView};
use table::{TableTemplate, TableView};

pub fn render_template<T: Template>(template: &T) -> Result<String, AppError> {
    template.render().map_err(|err| {
        error!(
            target: "presentation::views::render_template",
            error = %err,
            "template rendering failed"
        );
        AppError::Render(err)
    })
}

/// Everything one dashboard frame shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub chrome: ChromeView,
    pub notice: Option<NoticeView>,
    /// Replaces stats, filters, table and pagination when set.
    pub error: Option<ErrorPanelView>,
    pub stats: StatsView,
    pub filters: FiltersView,
    pub table: TableView,
    pub pagination: PaginationView,
    pub form: Option<FormView>,
    pub confirm: Option<ConfirmView>,
    pub help: Option<Vec<HelpLineView>>,
}

impl DashboardView {
    pub fn derive(state: &DashboardState, help: &[HelpLineView]) -> Self {
        let result = state.listing.result();
        let total_pages = state.total_pages();

        let error = match (&state.listing.error, &state.categories.error) {
            (Some(err), _) => Some(ErrorPanelView::products(err)),
            (None, Some(err)) => Some(ErrorPanelView::categories(err)),
            (None, None) => None,
        };

        // Rows and summary both describe the last resolved page, which may lag
        // `state.page` while a new page is loading.
        let pagination = match &state.listing.data {
            Some((query, result)) => {
                PaginationView::new(query.page, query.page_size, result.total, total_pages)
            }
            None => PaginationView::hidden(),
        };

        Self {
            chrome: ChromeView::new(state.sidebar_open),
            notice: state.notice.as_ref().map(NoticeView::from),
            error,
            stats: StatsView::new(
                result.map(|result| result.total),
                state.categories.data.as_ref().map(|set| set.len()),
                state.page,
                total_pages,
            ),
            filters: FiltersView::new(
                &state.search_text,
                &state.category,
                state.categories.data.as_ref(),
            ),
            table: TableView::new(result, state.listing.fetching),
            pagination,
            form: state
                .form
                .as_ref()
                .map(|form| FormView::new(form, state.in_flight.saving())),
            confirm: state
                .pending_delete
                .map(|id| ConfirmView::new(id, state.in_flight.deleting)),
            help: state.help_open.then(|| help.to_vec()),
        }
    }

    pub fn render(&self) -> Result<String, AppError> {
        let mut sections = vec![render_template(&ChromeTemplate { view: &self.chrome })?];

        if let Some(notice) = &self.notice {
            sections.push(render_template(&NoticeTemplate { view: notice })?);
        }

        match &self.error {
            Some(panel) => sections.push(render_template(&ErrorPanelTemplate { view: panel })?),
            None => {
                sections.push(render_template(&StatsTemplate { view: &self.stats })?);
                sections.push(render_template(&FiltersTemplate {
                    view: &self.filters,
                })?);
                sections.push(render_template(&TableTemplate { view: &self.table })?);
                if self.pagination.visible {
                    sections.push(render_template(&PaginationTemplate {
                        view: &self.pagination,
                    })?);
                }
            }
        }

        if let Some(form) = &self.form {
            sections.push(render_template(&FormTemplate { view: form })?);
        }
        if let Some(confirm) = &self.confirm {
            sections.push(render_template(&ConfirmTemplate { view: confirm })?);
        }
        if let Some(lines) = &self.help {
            sections.push(render_template(&HelpTemplate { lines })?);
        }

        Ok(sections
            .iter()
            .map(|section| section.trim_end())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
