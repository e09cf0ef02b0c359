//! Dashboard event loop.
//!
//! One task owns the [`DashboardState`]. It selects over user intents,
//! request completions and the search debouncer, feeds each event to the
//! controller, executes the resulting effects and re-renders.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument};

use crate::application::error::AppError;
use crate::cache::QueryCache;

use super::debounce::Debouncer;
use super::state::{
    DashboardEvent, DashboardState, Effect, ListingRequest, Mutation, MutationOutcome,
};

const TARGET: &str = "application::dashboard::runtime";

/// Receives a frame after every transition.
pub trait Frontend: Send {
    fn frame(&mut self, state: &DashboardState) -> Result<(), AppError>;
}

enum Step {
    Event(DashboardEvent),
    IntentsClosed,
}

pub struct DashboardRuntime<F> {
    cache: Arc<QueryCache>,
    state: DashboardState,
    debouncer: Debouncer,
    completions_tx: mpsc::UnboundedSender<DashboardEvent>,
    completions: mpsc::UnboundedReceiver<DashboardEvent>,
    frontend: F,
}

impl<F: Frontend> DashboardRuntime<F> {
    pub fn new(cache: Arc<QueryCache>, debouncer: Debouncer, frontend: F) -> Self {
        let (completions_tx, completions) = mpsc::unbounded_channel();
        Self {
            cache,
            state: DashboardState::new(),
            debouncer,
            completions_tx,
            completions,
            frontend,
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Drive the dashboard until `quit` or until the intent channel closes.
    ///
    /// Returns the final state and the frontend.
    #[instrument(skip_all, target = "application::dashboard::runtime")]
    pub async fn run(
        mut self,
        mut intents: mpsc::Receiver<DashboardEvent>,
    ) -> Result<(DashboardState, F), AppError> {
        self.dispatch(DashboardEvent::Started)?;

        while self.state.running {
            let step = tokio::select! {
                intent = intents.recv() => match intent {
                    Some(event) => Step::Event(event),
                    None => Step::IntentsClosed,
                },
                Some(event) = self.completions.recv() => Step::Event(event),
                text = self.debouncer.fired() => Step::Event(DashboardEvent::SearchCommitted(text)),
            };

            match step {
                Step::Event(event) => self.dispatch(event)?,
                Step::IntentsClosed => {
                    debug!(target: TARGET, "intent channel closed");
                    break;
                }
            }
        }

        self.debouncer.cancel();
        info!(target: TARGET, "dashboard stopped");
        Ok((self.state, self.frontend))
    }

    /// Apply `event` and every follow-up it produces, then render once.
    fn dispatch(&mut self, event: DashboardEvent) -> Result<(), AppError> {
        let mut queue = VecDeque::from([event]);
        while let Some(event) = queue.pop_front() {
            for effect in self.state.apply(event) {
                if let Some(follow_up) = self.execute(effect) {
                    queue.push_back(follow_up);
                }
            }
        }
        self.frontend.frame(&self.state)
    }

    /// Run one effect. Cache hits resolve synchronously as a follow-up event.
    fn execute(&mut self, effect: Effect) -> Option<DashboardEvent> {
        match effect {
            Effect::ScheduleSearchCommit(text) => {
                self.debouncer.schedule(text);
                None
            }
            Effect::CancelSearchCommit => {
                self.debouncer.cancel();
                None
            }
            Effect::FetchListing(request) => match self.cache.cached_listing(&request.query) {
                Some(result) => Some(DashboardEvent::ListingResolved {
                    request,
                    result: Ok(result),
                }),
                None => {
                    self.spawn_listing(request);
                    None
                }
            },
            Effect::FetchCategories => match self.cache.cached_categories() {
                Some(categories) => Some(DashboardEvent::CategoriesResolved(Ok(categories))),
                None => {
                    self.spawn_categories();
                    None
                }
            },
            Effect::Submit(mutation) => {
                self.spawn_mutation(mutation);
                None
            }
        }
    }

    fn spawn_listing(&self, request: ListingRequest) {
        let cache = Arc::clone(&self.cache);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = cache.listing(&request.query).await;
            let _ = tx.send(DashboardEvent::ListingResolved { request, result });
        });
    }

    fn spawn_categories(&self) {
        let cache = Arc::clone(&self.cache);
        let tx = self.completions_tx.clone();
        tokio::spawn(async move {
            let result = cache.categories().await;
            let _ = tx.send(DashboardEvent::CategoriesResolved(result));
        });
    }

    fn spawn_mutation(&self, mutation: Mutation) {
        let cache = Arc::clone(&self.cache);
        let tx = self.completions_tx.clone();
        let kind = mutation.kind();
        tokio::spawn(async move {
            let result = match mutation {
                Mutation::Create(fields) => cache
                    .create_product(&fields)
                    .await
                    .map(MutationOutcome::Saved),
                Mutation::Update(id, fields) => cache
                    .update_product(id, &fields)
                    .await
                    .map(MutationOutcome::Saved),
                Mutation::Delete(id) => cache
                    .delete_product(id)
                    .await
                    .map(MutationOutcome::Deleted),
            };
            let _ = tx.send(DashboardEvent::MutationResolved { kind, result });
        });
    }
}
