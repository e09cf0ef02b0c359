//! Presentation layer: text views and the terminal front-end.

pub mod terminal;
pub mod views;
