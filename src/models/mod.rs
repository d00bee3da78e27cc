//! Core data models for BudgetView
//!
//! Ledger entries, budget goals, the static category registry and the
//! calendar periods aggregation is scoped by.

pub mod budget;
pub mod category;
pub mod ids;
pub mod ledger;
pub mod money;
pub mod period;
pub mod transaction;

pub use budget::{BudgetGoal, BudgetGoals};
pub use category::{Category, CategoryRegistry, FALLBACK_CATEGORY_ID, INCOME_CATEGORY_ID};
pub use ids::{TransactionId, UserId};
pub use ledger::Ledger;
pub use money::Money;
pub use period::{Granularity, MonthPeriod};
pub use transaction::{NewTransaction, Transaction, TransactionKind};
