//! Command-line presentation layer

pub mod compare;
pub mod setup;
pub mod ui;
