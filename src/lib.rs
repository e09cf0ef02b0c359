//! Stockroom: a terminal product-management dashboard over a remote catalog API.

pub mod application;
pub mod cache;
pub mod config;
pub mod domain;
pub mod infra;
pub mod presentation;
