//! Dashboard summary
//!
//! The headline figures: the all-time balance next to this month's flow.

use serde::Serialize;

use crate::models::{Money, MonthPeriod};
use crate::services::LedgerAggregator;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardSummary {
    pub period: MonthPeriod,
    pub starting_balance: Money,
    /// All-time, not limited to `period`
    pub current_balance: Money,
    pub income: Money,
    pub expenses: Money,
    /// `income - expenses` for the period
    pub net: Money,
}

impl DashboardSummary {
    pub fn generate(aggregator: &LedgerAggregator, period: MonthPeriod) -> Self {
        let income = aggregator.total_income(Some(period));
        let expenses = aggregator.total_expenses(Some(period));

        Self {
            period,
            starting_balance: aggregator.starting_balance(),
            current_balance: aggregator.current_balance(),
            income,
            expenses,
            net: income - expenses,
        }
    }

    pub fn format_terminal(&self, currency: &str) -> String {
        let line = |label: &str, value: Money| {
            format!("  {:<20} {:>14}\n", label, value.format_with_symbol(currency))
        };

        let mut output = format!("Dashboard - {}\n", self.period);
        output.push_str(&"=".repeat(40));
        output.push('\n');
        output.push_str(&line("Starting Balance:", self.starting_balance));
        output.push_str(&line("Current Balance:", self.current_balance));
        output.push('\n');
        output.push_str(&line("Income:", self.income));
        output.push_str(&line("Expenses:", self.expenses));
        output.push_str(&line("Net:", self.net));
        output
    }
}
