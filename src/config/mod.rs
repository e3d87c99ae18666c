//! Configuration module for fintrack
//!
//! - path resolution for the data directory
//! - settings persistence

pub mod paths;
pub mod settings;

pub use paths::FintrackPaths;
pub use settings::Settings;
