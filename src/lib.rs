//! BudgetView - personal budget dashboard
//!
//! This library provides the core of the BudgetView dashboard: a ledger of
//! income and expense entries, per-category monthly budget goals and a
//! starting balance, with every displayed figure derived from that state.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Path resolution and persisted settings
//! - `error`: Custom error types
//! - `logging`: Diagnostic tracing setup
//! - `models`: Core data models (transactions, categories, goals, periods)
//! - `services`: The ledger aggregator and the persisted session around it
//! - `storage`: Local and cloud persistence providers with change feeds
//! - `advice`: Snapshot and prompt building for generated financial tips
//! - `reports`: Summary, spending, progress and trend reports
//! - `audit`: Audit logging of ledger mutations
//! - `export`: CSV, JSON and YAML export
//! - `display`, `cli`: Terminal front end
//!
//! # Example
//!
//! ```rust,ignore
//! use budgetview::config::{BudgetViewPaths, Settings};
//! use budgetview::models::CategoryRegistry;
//! use budgetview::services::LedgerSession;
//!
//! let paths = BudgetViewPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let store = budgetview::storage::open_store(&settings, &paths)?;
//! let session = LedgerSession::open(*CategoryRegistry::builtin(), store)?;
//! println!("{}", session.aggregator().current_balance());
//! ```

pub mod advice;
pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{BudgetError, BudgetResult};
