//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::OutlayPaths;
pub use settings::{Session, Settings};
