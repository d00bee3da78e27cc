//! Configuration module for BudgetView
//!
//! This module provides configuration management including:
//! - Base directory resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::BudgetViewPaths;
pub use settings::{is_valid_date_format, Settings, StorageBackend};
