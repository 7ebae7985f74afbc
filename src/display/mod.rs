//! Terminal output formatting
//!
//! Plain-text formatters kept separate from the command handlers so they
//! can be tested without touching a terminal.

pub mod budget;
pub mod category;
pub mod expense;
pub mod report;
