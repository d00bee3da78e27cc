//! Ledger state
//!
//! The in-memory state the aggregator works over: transactions in display
//! order (newest first), the reconciled goal set and the starting balance.

use serde::{Deserialize, Serialize};

use super::budget::{BudgetGoal, BudgetGoals};
use super::category::CategoryRegistry;
use super::money::Money;
use super::transaction::Transaction;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub budget_goals: BudgetGoals,
    pub starting_balance: Money,
}

impl Ledger {
    /// Empty ledger with a zero goal for every category
    pub fn new(registry: &CategoryRegistry) -> Self {
        Self {
            transactions: Vec::new(),
            budget_goals: BudgetGoals::empty_for(registry),
            starting_balance: Money::zero(),
        }
    }

    /// Assemble a ledger from raw persisted parts
    ///
    /// Transactions are put into display order (stable, so entries on the same
    /// day keep their stored order) and goals are reconciled to the registry.
    pub fn from_parts(
        mut transactions: Vec<Transaction>,
        goals: Vec<BudgetGoal>,
        starting_balance: Money,
        registry: &CategoryRegistry,
    ) -> Self {
        sort_for_display(&mut transactions);
        Self {
            transactions,
            budget_goals: BudgetGoals::reconcile(goals, registry),
            starting_balance,
        }
    }
}

/// Newest first; `sort_by` is stable so same-day entries keep insertion order
pub fn sort_for_display(transactions: &mut [Transaction]) {
    transactions.sort_by(|a, b| b.occurred_on.cmp(&a.occurred_on));
}
