//! Advice snapshot
//!
//! The aggregated view of a ledger that an advice generator is given: flow
//! totals for one month, the category breakdown and active goals by name,
//! balances, and a bounded sample of recent entries.

use serde::Serialize;

use crate::models::{Money, MonthPeriod, Transaction};
use crate::services::LedgerAggregator;

/// Default number of recent transactions included in a snapshot
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedAmount {
    pub category_id: String,
    pub category_name: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdviceSnapshot {
    /// Month the flow totals cover, as `YYYY-MM`
    pub period: String,
    pub total_income: Money,
    pub total_expenses: Money,
    pub expenses_by_category: Vec<NamedAmount>,
    /// Only goals with a positive amount
    pub budget_goals: Vec<NamedAmount>,
    pub current_balance: Money,
    pub starting_balance: Money,
    pub recent_transactions: Vec<Transaction>,
}

impl AdviceSnapshot {
    pub fn build(aggregator: &LedgerAggregator, period: MonthPeriod, sample_size: usize) -> Self {
        let registry = aggregator.registry();

        let expenses_by_category = aggregator
            .expenses_by_category(Some(period))
            .into_iter()
            .map(|spending| NamedAmount {
                category_name: spending.category.name.to_string(),
                category_id: spending.category_id,
                amount: spending.amount,
            })
            .collect();

        let budget_goals = aggregator
            .budget_goals()
            .active()
            .map(|goal| NamedAmount {
                category_id: goal.category_id.clone(),
                category_name: registry.resolve(&goal.category_id).name.to_string(),
                amount: goal.amount,
            })
            .collect();

        Self {
            period: period.to_string(),
            total_income: aggregator.total_income(Some(period)),
            total_expenses: aggregator.total_expenses(Some(period)),
            expenses_by_category,
            budget_goals,
            current_balance: aggregator.current_balance(),
            starting_balance: aggregator.starting_balance(),
            recent_transactions: aggregator.recent_transactions(sample_size).to_vec(),
        }
    }

    /// False when income, expenses and current balance are all zero
    pub fn has_data(&self) -> bool {
        !(self.total_income.is_zero()
            && self.total_expenses.is_zero()
            && self.current_balance.is_zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRegistry, NewTransaction};
    use chrono::NaiveDate;

    fn june(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    #[test]
    fn test_build_snapshot() {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        agg.update_starting_balance(Money::from_units(100));
        agg.update_budget_goal("food", Money::from_units(300));
        agg.add_transaction(NewTransaction::income("Salary", Money::from_units(2_000), june(1)));
        agg.add_transaction(NewTransaction::expense("Market", Money::from_units(80), june(3), "food"));
        agg.add_transaction(NewTransaction::expense("Old", Money::from_units(5), june(3) - chrono::Duration::days(60), "food"));

        let snapshot = AdviceSnapshot::build(&agg, MonthPeriod::new(2025, 6).unwrap(), 2);

        assert_eq!(snapshot.period, "2025-06");
        assert_eq!(snapshot.total_income, Money::from_units(2_000));
        assert_eq!(snapshot.total_expenses, Money::from_units(80));
        assert_eq!(snapshot.expenses_by_category.len(), 1);
        assert_eq!(snapshot.expenses_by_category[0].category_name, "Food & Dining");
        assert_eq!(snapshot.budget_goals.len(), 1);
        assert_eq!(snapshot.budget_goals[0].amount, Money::from_units(300));
        assert_eq!(snapshot.current_balance, Money::from_units(2_015));
        assert_eq!(snapshot.recent_transactions.len(), 2);
        assert!(snapshot.has_data());
    }

    #[test]
    fn test_empty_ledger_has_no_data() {
        let agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        let snapshot = AdviceSnapshot::build(&agg, MonthPeriod::new(2025, 6).unwrap(), DEFAULT_SAMPLE_SIZE);
        assert!(!snapshot.has_data());
        assert!(snapshot.budget_goals.is_empty());
    }
}
