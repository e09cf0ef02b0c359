//! Dashboard state machine.
//!
//! [`DashboardState::apply`] is a pure transition: it mutates the state and
//! returns the effects the runtime must carry out. Nothing here touches the
//! network or the clock.

use tracing::debug;

use crate::application::catalog::CatalogError;
use crate::domain::categories::CategorySet;
use crate::domain::draft::{DraftField, ProductDraft};
use crate::domain::error::ValidationError;
use crate::domain::listing::{ALL_CATEGORIES, ListingQuery, ListingResult, is_all_categories};
use crate::domain::products::{DeletedProduct, Product, ProductFields, ProductId};

const TARGET: &str = "application::dashboard::state";

/// A listing fetch tagged with the ticket that makes it authoritative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub ticket: u64,
    pub query: ListingQuery,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    Create(ProductFields),
    Update(ProductId, ProductFields),
    Delete(ProductId),
}

impl Mutation {
    pub fn kind(&self) -> MutationKind {
        match self {
            Mutation::Create(_) => MutationKind::Create,
            Mutation::Update(..) => MutationKind::Update,
            Mutation::Delete(_) => MutationKind::Delete,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MutationOutcome {
    Saved(Product),
    Deleted(DeletedProduct),
}

/// Inputs to the controller: user intents, timer expirations and completions.
#[derive(Debug, Clone, PartialEq)]
pub enum DashboardEvent {
    Started,
    SearchChanged(String),
    SearchCommitted(String),
    CategorySelected(String),
    PageSelected(u32),
    NextPage,
    PreviousPage,
    OpenAdd,
    EditRequested(ProductId),
    FieldChanged(DraftField, String),
    Submit,
    CloseForm,
    DeleteRequested(ProductId),
    ConfirmDelete,
    CancelDelete,
    DismissNotice,
    Retry,
    ToggleSidebar,
    ToggleHelp,
    Quit,
    ListingResolved {
        request: ListingRequest,
        result: Result<ListingResult, CatalogError>,
    },
    CategoriesResolved(Result<CategorySet, CatalogError>),
    MutationResolved {
        kind: MutationKind,
        result: Result<MutationOutcome, CatalogError>,
    },
}

/// Work the runtime performs on behalf of the controller.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleSearchCommit(String),
    CancelSearchCommit,
    FetchListing(ListingRequest),
    FetchCategories,
    Submit(Mutation),
}

/// Blocking notification shown above the dashboard until dismissed.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SaveFailed(CatalogError),
    DeleteFailed(CatalogError),
    Invalid(ValidationError),
    NotOnPage(ProductId),
}

impl Notice {
    pub fn message(&self) -> String {
        match self {
            Notice::SaveFailed(_) => "Failed to save product. Please try again.".to_string(),
            Notice::DeleteFailed(_) => "Failed to delete product. Please try again.".to_string(),
            Notice::Invalid(err) => format!("Please fill in all fields: {err}"),
            Notice::NotOnPage(id) => format!("Product {id} is not on the current page."),
        }
    }

    pub fn detail(&self) -> Option<String> {
        match self {
            Notice::SaveFailed(err) | Notice::DeleteFailed(err) => Some(err.to_string()),
            Notice::Invalid(_) | Notice::NotOnPage(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    /// Product being edited; `None` while adding.
    pub editing: Option<Product>,
    pub draft: ProductDraft,
}

impl FormState {
    pub fn is_edit(&self) -> bool {
        self.editing.is_some()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InFlight {
    pub adding: bool,
    pub updating: bool,
    pub deleting: bool,
}

impl InFlight {
    pub fn saving(&self) -> bool {
        self.adding || self.updating
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingSlot {
    /// Query whose resolution will be accepted.
    pub requested: Option<ListingRequest>,
    /// Last resolved page and the query it answers; kept while refetching.
    pub data: Option<(ListingQuery, ListingResult)>,
    pub fetching: bool,
    pub error: Option<CatalogError>,
}

impl ListingSlot {
    pub fn result(&self) -> Option<&ListingResult> {
        self.data.as_ref().map(|(_, result)| result)
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategorySlot {
    pub data: Option<CategorySet>,
    pub fetching: bool,
    pub error: Option<CatalogError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub page: u32,
    pub search_text: String,
    pub debounced_search: String,
    pub category: String,
    pub form: Option<FormState>,
    pub pending_delete: Option<ProductId>,
    pub in_flight: InFlight,
    pub listing: ListingSlot,
    pub categories: CategorySlot,
    pub notice: Option<Notice>,
    pub sidebar_open: bool,
    pub help_open: bool,
    pub running: bool,
    next_ticket: u64,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self {
            page: 1,
            search_text: String::new(),
            debounced_search: String::new(),
            category: ALL_CATEGORIES.to_string(),
            form: None,
            pending_delete: None,
            in_flight: InFlight::default(),
            listing: ListingSlot::default(),
            categories: CategorySlot::default(),
            notice: None,
            sidebar_open: true,
            help_open: false,
            running: true,
            next_ticket: 0,
        }
    }
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Listing query implied by the current page, committed search and category.
    pub fn effective_query(&self) -> ListingQuery {
        ListingQuery::new(self.page, &self.debounced_search, &self.category)
    }

    /// Page count of the displayed listing; zero before anything resolved.
    pub fn total_pages(&self) -> u32 {
        self.listing
            .data
            .as_ref()
            .map(|(query, result)| result.total_pages(query.page_size))
            .unwrap_or(0)
    }

    pub fn apply(&mut self, event: DashboardEvent) -> Vec<Effect> {
        let mut effects = Vec::new();

        match event {
            DashboardEvent::Started => {
                self.fetch_categories(&mut effects);
            }
            DashboardEvent::SearchChanged(text) => {
                self.search_text = text.clone();
                effects.push(Effect::ScheduleSearchCommit(text));
            }
            DashboardEvent::SearchCommitted(text) => {
                if text != self.debounced_search {
                    self.debounced_search = text;
                    self.page = 1;
                }
            }
            DashboardEvent::CategorySelected(category) => {
                self.category = if is_all_categories(&category) {
                    ALL_CATEGORIES.to_string()
                } else {
                    category.trim().to_string()
                };
                self.page = 1;
                self.search_text.clear();
                self.debounced_search.clear();
                effects.push(Effect::CancelSearchCommit);
            }
            DashboardEvent::PageSelected(page) => {
                self.page = page.max(1);
            }
            DashboardEvent::NextPage => {
                if self.page < self.total_pages() {
                    self.page += 1;
                }
            }
            DashboardEvent::PreviousPage => {
                if self.page > 1 {
                    self.page -= 1;
                }
            }
            DashboardEvent::OpenAdd | DashboardEvent::EditRequested(_) | DashboardEvent::CloseForm
                if self.in_flight.saving() =>
            {
                debug!(target: TARGET, "form is locked while a save is in flight");
            }
            DashboardEvent::OpenAdd => {
                self.form = Some(FormState {
                    editing: None,
                    draft: ProductDraft::default(),
                });
            }
            DashboardEvent::EditRequested(id) => self.open_edit(id),
            DashboardEvent::FieldChanged(field, value) => {
                if self.in_flight.saving() {
                    debug!(
                        target: TARGET,
                        field = field.as_str(),
                        "field edit ignored while saving"
                    );
                } else if let Some(form) = self.form.as_mut() {
                    form.draft.set(field, value);
                }
            }
            DashboardEvent::Submit => self.submit(&mut effects),
            DashboardEvent::CloseForm => {
                self.form = None;
            }
            DashboardEvent::DeleteRequested(id) => {
                self.pending_delete = Some(id);
            }
            DashboardEvent::ConfirmDelete => {
                match self.pending_delete {
                    Some(id) if !self.in_flight.deleting => {
                        self.in_flight.deleting = true;
                        effects.push(Effect::Submit(Mutation::Delete(id)));
                    }
                    _ => {}
                }
            }
            DashboardEvent::CancelDelete => {
                if !self.in_flight.deleting {
                    self.pending_delete = None;
                }
            }
            DashboardEvent::DismissNotice => {
                self.notice = None;
            }
            DashboardEvent::Retry => {
                if self.categories.error.is_some() {
                    self.fetch_categories(&mut effects);
                }
                self.refresh_listing(&mut effects);
            }
            DashboardEvent::ToggleSidebar => {
                self.sidebar_open = !self.sidebar_open;
            }
            DashboardEvent::ToggleHelp => {
                self.help_open = !self.help_open;
            }
            DashboardEvent::Quit => {
                self.running = false;
                effects.push(Effect::CancelSearchCommit);
                return effects;
            }
            DashboardEvent::ListingResolved { request, result } => {
                self.resolve_listing(request, result);
            }
            DashboardEvent::CategoriesResolved(result) => {
                self.categories.fetching = false;
                match result {
                    Ok(categories) => {
                        self.categories.data = Some(categories);
                        self.categories.error = None;
                    }
                    Err(err) => {
                        self.categories.error = Some(err);
                    }
                }
            }
            DashboardEvent::MutationResolved { kind, result } => {
                self.resolve_mutation(kind, result, &mut effects);
            }
        }

        self.sync_listing(&mut effects);
        effects
    }

    fn open_edit(&mut self, id: ProductId) {
        let product = self
            .listing
            .result()
            .and_then(|result| result.products.iter().find(|product| product.id == id))
            .cloned();

        match product {
            Some(product) => {
                self.form = Some(FormState {
                    draft: ProductDraft::from_product(&product),
                    editing: Some(product),
                });
            }
            None => {
                self.notice = Some(Notice::NotOnPage(id));
            }
        }
    }

    fn submit(&mut self, effects: &mut Vec<Effect>) {
        if self.in_flight.saving() {
            return;
        }
        let Some(form) = self.form.as_ref() else {
            return;
        };

        let editing = form.editing.as_ref().map(|product| product.id);
        match form.draft.submit(editing) {
            Ok(submission) => {
                let mutation = match submission.id {
                    Some(id) => {
                        self.in_flight.updating = true;
                        Mutation::Update(id, submission.fields)
                    }
                    None => {
                        self.in_flight.adding = true;
                        Mutation::Create(submission.fields)
                    }
                };
                effects.push(Effect::Submit(mutation));
            }
            Err(err) => {
                debug!(target: TARGET, field = err.field(), "draft rejected before submission");
                self.notice = Some(Notice::Invalid(err));
            }
        }
    }

    fn resolve_listing(
        &mut self,
        request: ListingRequest,
        result: Result<ListingResult, CatalogError>,
    ) {
        if self.listing.requested.as_ref() != Some(&request) {
            debug!(
                target: TARGET,
                ticket = request.ticket,
                page = request.query.page,
                "discarding listing for a query no longer requested"
            );
            return;
        }

        self.listing.fetching = false;
        match result {
            Ok(result) => {
                self.listing.data = Some((request.query, result));
                self.listing.error = None;
            }
            Err(err) => {
                self.listing.error = Some(err);
            }
        }
    }

    fn resolve_mutation(
        &mut self,
        kind: MutationKind,
        result: Result<MutationOutcome, CatalogError>,
        effects: &mut Vec<Effect>,
    ) {
        match kind {
            MutationKind::Create => self.in_flight.adding = false,
            MutationKind::Update => self.in_flight.updating = false,
            MutationKind::Delete => self.in_flight.deleting = false,
        }

        match (kind, result) {
            (MutationKind::Delete, Ok(_)) => {
                self.pending_delete = None;
                self.refresh_listing(effects);
            }
            (MutationKind::Delete, Err(err)) => {
                self.notice = Some(Notice::DeleteFailed(err));
            }
            (_, Ok(_)) => {
                self.form = None;
                self.refresh_listing(effects);
            }
            (_, Err(err)) => {
                self.notice = Some(Notice::SaveFailed(err));
            }
        }
    }

    fn fetch_categories(&mut self, effects: &mut Vec<Effect>) {
        self.categories.fetching = true;
        self.categories.error = None;
        effects.push(Effect::FetchCategories);
    }

    /// Request the effective query when it differs from the one in flight.
    fn sync_listing(&mut self, effects: &mut Vec<Effect>) {
        let query = self.effective_query();
        let current = self.listing.requested.as_ref().map(|request| &request.query);
        if current != Some(&query) {
            self.request_listing(query, effects);
        }
    }

    /// Request the effective query even if it is already the requested one.
    fn refresh_listing(&mut self, effects: &mut Vec<Effect>) {
        let query = self.effective_query();
        self.request_listing(query, effects);
    }

    fn request_listing(&mut self, query: ListingQuery, effects: &mut Vec<Effect>) {
        self.next_ticket += 1;
        let request = ListingRequest {
            ticket: self.next_ticket,
            query,
        };
        self.listing.requested = Some(request.clone());
        self.listing.fetching = true;
        self.listing.error = None;
        effects.push(Effect::FetchListing(request));
    }
}

#[cfg(test)]
mod tests {
    use crate::application::catalog::CatalogOperation;

    use super::*;

    fn product(id: u64) -> Product {
        Product {
            id: ProductId::new(id),
            title: format!("Product {id}"),
            price: 9.99,
            category: "beauty".to_string(),
            stock: 5,
            description: "desc".to_string(),
        }
    }

    fn page_of(total: u64, ids: &[u64]) -> ListingResult {
        ListingResult {
            products: ids.iter().copied().map(product).collect(),
            total,
            skip: 0,
            limit: 10,
        }
    }

    fn fetched(effects: &[Effect]) -> Vec<ListingRequest> {
        effects
            .iter()
            .filter_map(|effect| match effect {
                Effect::FetchListing(request) => Some(request.clone()),
                _ => None,
            })
            .collect()
    }

    /// Start the dashboard and resolve the first listing.
    fn started(total: u64, ids: &[u64]) -> DashboardState {
        let mut state = DashboardState::new();
        let effects = state.apply(DashboardEvent::Started);
        let request = fetched(&effects).pop().expect("initial fetch");
        state.apply(DashboardEvent::ListingResolved {
            request,
            result: Ok(page_of(total, ids)),
        });
        state
    }

    #[test]
    fn start_fetches_categories_and_first_page() {
        let mut state = DashboardState::new();
        let effects = state.apply(DashboardEvent::Started);

        assert!(effects.contains(&Effect::FetchCategories));
        let requests = fetched(&effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, ListingQuery::new(1, "", "all"));
        assert!(state.listing.fetching);
    }

    #[test]
    fn search_change_schedules_commit_without_fetching() {
        let mut state = started(30, &[1, 2]);
        let effects = state.apply(DashboardEvent::SearchChanged("phone".to_string()));

        assert_eq!(
            effects,
            vec![Effect::ScheduleSearchCommit("phone".to_string())]
        );
        assert_eq!(state.debounced_search, "");
    }

    #[test]
    fn committed_search_resets_page_and_fetches_once() {
        let mut state = started(30, &[1, 2]);
        state.apply(DashboardEvent::PageSelected(3));
        state.apply(DashboardEvent::SearchChanged("phone".to_string()));

        let effects = state.apply(DashboardEvent::SearchCommitted("phone".to_string()));

        assert_eq!(state.page, 1);
        let requests = fetched(&effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, ListingQuery::new(1, "phone", "all"));
    }

    #[test]
    fn category_resets_page_and_clears_search() {
        let mut state = started(30, &[1]);
        state.apply(DashboardEvent::SearchChanged("lip".to_string()));
        state.apply(DashboardEvent::SearchCommitted("lip".to_string()));
        state.apply(DashboardEvent::PageSelected(2));

        let effects = state.apply(DashboardEvent::CategorySelected("beauty".to_string()));

        assert_eq!(state.page, 1);
        assert_eq!(state.search_text, "");
        assert_eq!(state.debounced_search, "");
        assert!(effects.contains(&Effect::CancelSearchCommit));
        assert_eq!(
            fetched(&effects)[0].query,
            ListingQuery::new(1, "", "beauty")
        );
    }

    #[test]
    fn stale_resolution_is_discarded() {
        let mut state = started(30, &[1]);
        let first = fetched(&state.apply(DashboardEvent::PageSelected(2)))
            .pop()
            .expect("page 2 fetch");
        let second = fetched(&state.apply(DashboardEvent::PageSelected(3)))
            .pop()
            .expect("page 3 fetch");

        state.apply(DashboardEvent::ListingResolved {
            request: first,
            result: Ok(page_of(30, &[11, 12])),
        });
        assert_eq!(state.listing.result().map(|r| r.products[0].id.get()), Some(1));
        assert!(state.listing.fetching);

        state.apply(DashboardEvent::ListingResolved {
            request: second,
            result: Ok(page_of(30, &[21])),
        });
        assert_eq!(state.listing.result().map(|r| r.products[0].id.get()), Some(21));
        assert!(!state.listing.fetching);
    }

    #[test]
    fn previous_data_stays_while_next_page_loads() {
        let mut state = started(30, &[1, 2]);
        state.apply(DashboardEvent::NextPage);

        assert_eq!(state.page, 2);
        assert!(state.listing.fetching);
        assert_eq!(state.listing.result().map(|r| r.products.len()), Some(2));
    }

    #[test]
    fn next_and_previous_stop_at_boundaries() {
        let mut state = started(10, &[1]);
        assert!(fetched(&state.apply(DashboardEvent::NextPage)).is_empty());
        assert_eq!(state.page, 1);

        state.apply(DashboardEvent::PreviousPage);
        assert_eq!(state.page, 1);
    }

    #[test]
    fn explicit_page_is_not_range_checked() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::PageSelected(40));
        assert_eq!(state.page, 40);

        state.apply(DashboardEvent::PageSelected(0));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn invalid_draft_raises_notice_without_request() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        state.apply(DashboardEvent::FieldChanged(DraftField::Title, "Pen".to_string()));

        let effects = state.apply(DashboardEvent::Submit);

        assert!(effects.is_empty());
        assert!(matches!(state.notice, Some(Notice::Invalid(_))));
        assert!(state.form.is_some());
    }

    fn fill(state: &mut DashboardState) {
        for (field, value) in [
            (DraftField::Title, "Pen"),
            (DraftField::Price, "1.5"),
            (DraftField::Stock, "10"),
            (DraftField::Category, "office"),
            (DraftField::Description, "x"),
        ] {
            state.apply(DashboardEvent::FieldChanged(field, value.to_string()));
        }
    }

    #[test]
    fn add_submits_create_and_ignores_double_submit() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        fill(&mut state);

        let effects = state.apply(DashboardEvent::Submit);
        assert_eq!(
            effects,
            vec![Effect::Submit(Mutation::Create(ProductFields {
                title: "Pen".to_string(),
                price: 1.5,
                stock: 10,
                category: "office".to_string(),
                description: "x".to_string(),
            }))]
        );
        assert!(state.in_flight.adding);
        assert!(state.apply(DashboardEvent::Submit).is_empty());
    }

    #[test]
    fn edit_prefills_draft_and_targets_update() {
        let mut state = started(10, &[7]);
        state.apply(DashboardEvent::EditRequested(ProductId::new(7)));

        let form = state.form.as_ref().expect("form open");
        assert!(form.is_edit());
        assert_eq!(form.draft.title, "Product 7");

        let effects = state.apply(DashboardEvent::Submit);
        assert!(matches!(
            effects.as_slice(),
            [Effect::Submit(Mutation::Update(id, _))] if id.get() == 7
        ));
        assert!(state.in_flight.updating);
    }

    #[test]
    fn failed_save_keeps_form_and_draft() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        fill(&mut state);
        state.apply(DashboardEvent::Submit);

        let effects = state.apply(DashboardEvent::MutationResolved {
            kind: MutationKind::Create,
            result: Err(CatalogError::server(
                CatalogOperation::CreateProduct,
                500,
                "boom",
            )),
        });

        assert!(fetched(&effects).is_empty());
        assert!(!state.in_flight.adding);
        assert_eq!(
            state.form.as_ref().map(|form| form.draft.title.as_str()),
            Some("Pen")
        );
        assert_eq!(
            state.notice.as_ref().map(Notice::message),
            Some("Failed to save product. Please try again.".to_string())
        );
    }

    #[test]
    fn form_is_locked_while_save_is_in_flight() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        fill(&mut state);
        state.apply(DashboardEvent::Submit);

        state.apply(DashboardEvent::CloseForm);
        state.apply(DashboardEvent::OpenAdd);
        state.apply(DashboardEvent::EditRequested(ProductId::new(1)));
        state.apply(DashboardEvent::FieldChanged(
            DraftField::Title,
            "Second draft".to_string(),
        ));

        let form = state.form.as_ref().expect("submitted form stays open");
        assert!(!form.is_edit());
        assert_eq!(form.draft.title, "Pen");

        state.apply(DashboardEvent::MutationResolved {
            kind: MutationKind::Create,
            result: Err(CatalogError::server(
                CatalogOperation::CreateProduct,
                500,
                "boom",
            )),
        });
        assert_eq!(
            state.form.as_ref().map(|form| form.draft.title.as_str()),
            Some("Pen")
        );

        state.apply(DashboardEvent::CloseForm);
        assert!(state.form.is_none());
    }

    #[test]
    fn successful_save_closes_form_and_refetches_current_query() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        fill(&mut state);
        state.apply(DashboardEvent::Submit);

        let effects = state.apply(DashboardEvent::MutationResolved {
            kind: MutationKind::Create,
            result: Ok(MutationOutcome::Saved(product(101))),
        });

        assert!(state.form.is_none());
        let requests = fetched(&effects);
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].query, ListingQuery::new(1, "", "all"));
    }

    #[test]
    fn save_completion_does_not_close_a_form_opened_after_cancel() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::OpenAdd);
        fill(&mut state);
        state.apply(DashboardEvent::Submit);

        state.apply(DashboardEvent::CloseForm);
        state.apply(DashboardEvent::OpenAdd);
        state.apply(DashboardEvent::FieldChanged(
            DraftField::Title,
            "Second draft".to_string(),
        ));

        state.apply(DashboardEvent::MutationResolved {
            kind: MutationKind::Create,
            result: Ok(MutationOutcome::Saved(product(101))),
        });

        assert!(state.form.is_none());
        assert!(!state.in_flight.saving());

        state.apply(DashboardEvent::OpenAdd);
        assert_eq!(
            state.form.as_ref().map(|form| form.draft.title.as_str()),
            Some("")
        );
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut state = started(10, &[3]);
        let effects = state.apply(DashboardEvent::DeleteRequested(ProductId::new(3)));
        assert!(effects.is_empty());
        assert_eq!(state.pending_delete, Some(ProductId::new(3)));

        let effects = state.apply(DashboardEvent::ConfirmDelete);
        assert_eq!(
            effects,
            vec![Effect::Submit(Mutation::Delete(ProductId::new(3)))]
        );
        assert!(state.in_flight.deleting);
    }

    #[test]
    fn cancelled_delete_sends_nothing() {
        let mut state = started(10, &[3]);
        state.apply(DashboardEvent::DeleteRequested(ProductId::new(3)));
        state.apply(DashboardEvent::CancelDelete);

        assert!(state.apply(DashboardEvent::ConfirmDelete).is_empty());
        assert_eq!(state.pending_delete, None);
    }

    #[test]
    fn failed_delete_keeps_dialog_open() {
        let mut state = started(10, &[3]);
        state.apply(DashboardEvent::DeleteRequested(ProductId::new(3)));
        state.apply(DashboardEvent::ConfirmDelete);

        state.apply(DashboardEvent::MutationResolved {
            kind: MutationKind::Delete,
            result: Err(CatalogError::network(
                CatalogOperation::DeleteProduct,
                "refused",
            )),
        });

        assert_eq!(state.pending_delete, Some(ProductId::new(3)));
        assert!(matches!(state.notice, Some(Notice::DeleteFailed(_))));
    }

    #[test]
    fn listing_error_is_kept_until_retry() {
        let mut state = DashboardState::new();
        let request = fetched(&state.apply(DashboardEvent::Started))
            .pop()
            .expect("fetch");
        state.apply(DashboardEvent::ListingResolved {
            request,
            result: Err(CatalogError::network(
                CatalogOperation::ListProducts,
                "refused",
            )),
        });
        assert!(state.listing.error.is_some());

        let effects = state.apply(DashboardEvent::Retry);
        assert_eq!(fetched(&effects).len(), 1);
        assert!(state.listing.error.is_none());
        assert!(state.listing.fetching);
    }

    #[test]
    fn edit_of_unknown_row_raises_notice() {
        let mut state = started(10, &[1]);
        state.apply(DashboardEvent::EditRequested(ProductId::new(99)));

        assert!(state.form.is_none());
        assert_eq!(state.notice, Some(Notice::NotOnPage(ProductId::new(99))));
    }
}
