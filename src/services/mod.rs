//! Service layer for BudgetView
//!
//! The aggregator answers queries over in-memory ledger state; the session
//! keeps that state in step with a persistence backend.

pub mod aggregator;
pub mod session;

pub use aggregator::{CategorySpending, LedgerAggregator, TrendPoint};
pub use session::{LedgerSession, RestoreSummary};
