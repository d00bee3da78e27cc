//! Budget Progress Report
//!
//! Spending against each active goal for one month. Goals of zero, goals on
//! the fallback category and goals for unknown categories are not tracked.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, MonthPeriod};
use crate::services::LedgerAggregator;

/// Progress for a single category goal
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoalProgressRow {
    pub category_id: String,
    pub category_name: String,
    pub goal: Money,
    pub spent: Money,
    /// Never negative; zero once the goal is exceeded
    pub remaining: Money,
    /// How far spending is past the goal, zero if within it
    pub over_by: Money,
    /// Share of the goal used, capped at 100
    pub percent: f64,
}

impl GoalProgressRow {
    fn new(category_id: &str, category_name: &str, goal: Money, spent: Money) -> Self {
        let percent = if goal.is_positive() {
            (spent.cents() as f64 / goal.cents() as f64 * 100.0).min(100.0)
        } else {
            0.0
        };

        Self {
            category_id: category_id.to_string(),
            category_name: category_name.to_string(),
            goal,
            spent,
            remaining: (goal - spent).clamp_non_negative(),
            over_by: (spent - goal).clamp_non_negative(),
            percent,
        }
    }

    pub fn is_over_budget(&self) -> bool {
        self.spent > self.goal
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetProgressReport {
    pub period: MonthPeriod,
    pub rows: Vec<GoalProgressRow>,
    pub total_goal: Money,
    pub total_spent: Money,
}

impl BudgetProgressReport {
    pub fn generate(aggregator: &LedgerAggregator, period: MonthPeriod) -> Self {
        let spending = aggregator.expenses_by_category(Some(period));

        let rows: Vec<GoalProgressRow> = aggregator
            .budget_goals()
            .trackable(aggregator.registry())
            .map(|goal| {
                let spent = spending
                    .iter()
                    .find(|s| s.category_id == goal.category_id)
                    .map(|s| s.amount)
                    .unwrap_or_default();
                let name = aggregator.registry().resolve(&goal.category_id).name;
                GoalProgressRow::new(&goal.category_id, name, goal.amount, spent)
            })
            .collect();

        Self {
            period,
            total_goal: rows.iter().map(|r| r.goal).sum(),
            total_spent: rows.iter().map(|r| r.spent).sum(),
            rows,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn over_budget_rows(&self) -> Vec<&GoalProgressRow> {
        self.rows.iter().filter(|r| r.is_over_budget()).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Budget Progress - {}\n", self.period));
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budget goals set.\n");
            output.push_str("Set one with `budgetview goal set <category> <amount>`.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>11} {:>11} {:>14} {:>8}\n",
            "Category", "Spent", "Goal", "Status", "Used"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let status = if row.is_over_budget() {
                format!("over {}", row.over_by)
            } else {
                format!("{} left", row.remaining)
            };
            output.push_str(&format!(
                "{:<22} {:>11} {:>11} {:>14} {:>7.0}%\n",
                row.category_name,
                row.spent.to_string(),
                row.goal.to_string(),
                status,
                row.percent
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>11} {:>11}\n",
            "TOTAL",
            self.total_spent.to_string(),
            self.total_goal.to_string()
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Period", "Category", "Goal", "Spent", "Remaining", "Over By", "Percent"])
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        for row in &self.rows {
            csv.write_record([
                self.period.to_string(),
                row.category_name.clone(),
                row.goal.to_decimal_string(),
                row.spent.to_decimal_string(),
                row.remaining.to_decimal_string(),
                row.over_by.to_decimal_string(),
                format!("{:.1}", row.percent),
            ])
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }
}
