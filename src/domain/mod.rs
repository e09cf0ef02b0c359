//! Domain layer types and invariants.

pub mod categories;
pub mod draft;
pub mod error;
pub mod listing;
pub mod products;
