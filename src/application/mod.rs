//! Application layer: the catalog port, the dashboard controller and errors.

pub mod catalog;
pub mod dashboard;
pub mod error;
