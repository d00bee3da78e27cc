//! Spending Report
//!
//! Expense breakdown by category for one month, with each category's share
//! of the total.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, MonthPeriod};
use crate::services::LedgerAggregator;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpendingByCategory {
    /// Id as recorded on the transactions
    pub category_id: String,
    pub category_name: String,
    pub color: &'static str,
    pub total_spending: Money,
    pub transaction_count: usize,
    /// Percentage of total spending
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpendingReport {
    pub period: MonthPeriod,
    /// Largest first
    pub categories: Vec<SpendingByCategory>,
    pub total_spending: Money,
    pub total_income: Money,
    pub total_transactions: usize,
}

impl SpendingReport {
    pub fn generate(aggregator: &LedgerAggregator, period: MonthPeriod) -> Self {
        let breakdown = aggregator.expenses_by_category(Some(period));
        let total_spending: Money = breakdown.iter().map(|s| s.amount).sum();

        let mut categories: Vec<SpendingByCategory> = breakdown
            .into_iter()
            .map(|s| SpendingByCategory {
                percentage: if total_spending.is_zero() {
                    0.0
                } else {
                    s.amount.cents() as f64 / total_spending.cents() as f64 * 100.0
                },
                category_name: s.category.name.to_string(),
                color: s.category.color,
                category_id: s.category_id,
                total_spending: s.amount,
                transaction_count: s.transaction_count,
            })
            .collect();

        // Stable, so equal amounts keep first-appearance order
        categories.sort_by(|a, b| b.total_spending.cmp(&a.total_spending));

        Self {
            period,
            total_transactions: categories.iter().map(|c| c.transaction_count).sum(),
            categories,
            total_spending,
            total_income: aggregator.total_income(Some(period)),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Spending Report - {}\n", self.period));
        output.push_str(&"=".repeat(64));
        output.push('\n');
        output.push_str(&format!("Total Spending: {}\n", self.total_spending));
        output.push_str(&format!("Total Income: {}\n\n", self.total_income));

        if self.categories.is_empty() {
            output.push_str("No expenses recorded for this month.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<28} {:>12} {:>8} {:>8}\n",
            "Category", "Amount", "Count", "%"
        ));
        output.push_str(&"-".repeat(64));
        output.push('\n');

        for category in &self.categories {
            output.push_str(&format!(
                "{:<28} {:>12} {:>8} {:>7.1}%\n",
                category.category_name,
                category.total_spending.to_string(),
                category.transaction_count,
                category.percentage
            ));
        }

        output.push_str(&"-".repeat(64));
        output.push('\n');
        output.push_str(&format!(
            "{:<28} {:>12} {:>8}\n",
            "TOTAL SPENDING",
            self.total_spending.to_string(),
            self.total_transactions
        ));

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> BudgetResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(["Period", "Category", "Amount", "Transaction Count", "Percentage"])
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        for category in &self.categories {
            csv.write_record([
                self.period.to_string(),
                category.category_name.clone(),
                category.total_spending.to_decimal_string(),
                category.transaction_count.to_string(),
                format!("{:.2}", category.percentage),
            ])
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        }

        csv.flush().map_err(|e| BudgetError::Export(e.to_string()))?;
        Ok(())
    }

    pub fn top_categories(&self, limit: usize) -> &[SpendingByCategory] {
        &self.categories[..limit.min(self.categories.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRegistry, NewTransaction};
    use chrono::NaiveDate;

    fn report() -> SpendingReport {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        agg.add_transaction(NewTransaction::expense("Lunch", Money::from_units(30), d(10), "food"));
        agg.add_transaction(NewTransaction::expense("Dinner", Money::from_units(20), d(11), "food"));
        agg.add_transaction(NewTransaction::expense("Rent", Money::from_units(150), d(1), "housing"));
        agg.add_transaction(NewTransaction::income("Pay", Money::from_units(900), d(1)));
        SpendingReport::generate(&agg, MonthPeriod::new(2025, 1).unwrap())
    }

    #[test]
    fn test_generate_spending_report() {
        let report = report();

        assert_eq!(report.total_spending, Money::from_units(200));
        assert_eq!(report.total_income, Money::from_units(900));
        assert_eq!(report.total_transactions, 3);
        assert_eq!(report.categories[0].category_id, "housing");
        assert!((report.categories[0].percentage - 75.0).abs() < 1e-9);
        assert_eq!(report.categories[1].transaction_count, 2);
        assert_eq!(report.top_categories(1).len(), 1);
        assert_eq!(report.top_categories(10).len(), 2);
    }

    #[test]
    fn test_terminal_format() {
        let output = report().format_terminal();
        assert!(output.contains("Spending Report - 2025-01"));
        assert!(output.contains("Housing & Utilities"));
        assert!(output.contains("TOTAL SPENDING"));
    }

    #[test]
    fn test_csv_export() {
        let mut buffer = Vec::new();
        report().export_csv(&mut buffer).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert!(text.starts_with("Period,Category,Amount,Transaction Count,Percentage\n"));
        assert!(text.contains("2025-01,Housing & Utilities,150.00,1,75.00\n"));
    }
}
