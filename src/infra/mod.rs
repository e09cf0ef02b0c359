//! Adapters to the outside world: the catalog over HTTP and process telemetry.

pub mod catalog;
pub mod error;
pub mod telemetry;
