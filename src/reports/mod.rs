//! Reports for the dashboard
//!
//! Each report is generated from a `LedgerAggregator`, formats itself for the
//! terminal, and where tabular, exports to CSV.

pub mod progress;
pub mod spending;
pub mod summary;
pub mod trends;

pub use progress::{BudgetProgressReport, GoalProgressRow};
pub use spending::{SpendingByCategory, SpendingReport};
pub use summary::DashboardSummary;
pub use trends::TrendReport;
