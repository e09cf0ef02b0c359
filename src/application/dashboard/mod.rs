//! Interactive dashboard: controller state machine, debouncer and event loop.

mod debounce;
mod runtime;
mod state;

pub use debounce::Debouncer;
pub use runtime::{DashboardRuntime, Frontend};
pub use state::{
    CategorySlot, DashboardEvent, DashboardState, Effect, FormState, InFlight, ListingRequest,
    ListingSlot, Mutation, MutationKind, MutationOutcome, Notice,
};
