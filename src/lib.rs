//! Outlay - AI-assisted expense tracking from the command line
//!
//! This library provides the core functionality for the Outlay CLI: a
//! personal expense tracker whose data lives in a remote relational store
//! and whose free-text, photo, and voice capture flows are parsed by an
//! external generative-AI model.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration, credentials, and path management
//! - `error`: Custom error types
//! - `models`: Core data models (expenses, categories, budgets)
//! - `store`: The data-access seam (HTTP client + in-memory implementation)
//! - `ai`: The expense-parsing gateway
//! - `state`: The per-session aggregate of loaded collections
//! - `reports`: Derived views computed from the aggregate
//! - `cli` / `display`: Command handlers and terminal formatting
//!
//! # Example
//!
//! ```rust,ignore
//! use outlay::config::{paths::OutlayPaths, settings::Settings};
//!
//! let paths = OutlayPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! ```

pub mod ai;
pub mod cli;
pub mod config;
pub mod demo;
pub mod display;
pub mod error;
pub mod models;
pub mod reports;
pub mod state;
pub mod store;

pub use error::{OutlayError, OutlayResult};
