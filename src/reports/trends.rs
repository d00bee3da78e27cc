//! Spending trends
//!
//! Income and expense per day of the month or per month of the year, as a
//! text table with bar sparklines.

use serde::Serialize;

use crate::models::{Granularity, Money};
use crate::services::{LedgerAggregator, TrendPoint};

const BAR_WIDTH: usize = 24;

#[derive(Debug, Clone, Serialize)]
pub struct TrendReport {
    pub granularity: Granularity,
    pub points: Vec<TrendPoint>,
}

impl TrendReport {
    pub fn generate(aggregator: &LedgerAggregator, granularity: Granularity) -> Self {
        Self {
            granularity,
            points: aggregator.spending_over_time(granularity),
        }
    }

    pub fn from_points(granularity: Granularity, points: Vec<TrendPoint>) -> Self {
        Self { granularity, points }
    }

    pub fn total_income(&self) -> Money {
        self.points.iter().map(|p| p.income).sum()
    }

    pub fn total_expense(&self) -> Money {
        self.points.iter().map(|p| p.expense).sum()
    }

    /// Format the series for terminal display
    ///
    /// With `skip_empty`, points with no activity are left out of the table.
    pub fn format_terminal(&self, skip_empty: bool) -> String {
        let title = match self.granularity {
            Granularity::Month => "Daily Income vs Expenses (this month)",
            Granularity::Year => "Monthly Income vs Expenses (this year)",
        };
        let peak = self
            .points
            .iter()
            .map(|p| p.expense)
            .max()
            .unwrap_or_default();

        let mut output = format!("{}\n{}\n", title, "=".repeat(72));
        output.push_str(&format!(
            "{:<6} {:>11} {:>11}  {}\n",
            "", "Income", "Expense", "Expense bar"
        ));

        for point in &self.points {
            if skip_empty && point.income.is_zero() && point.expense.is_zero() {
                continue;
            }
            output.push_str(&format!(
                "{:<6} {:>11} {:>11}  {}\n",
                point.label,
                point.income.to_string(),
                point.expense.to_string(),
                bar(point.expense, peak)
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<6} {:>11} {:>11}\n",
            "Total",
            self.total_income().to_string(),
            self.total_expense().to_string()
        ));
        output
    }
}

fn bar(value: Money, peak: Money) -> String {
    if !peak.is_positive() || !value.is_positive() {
        return String::new();
    }
    let len = ((value.cents() as f64 / peak.cents() as f64) * BAR_WIDTH as f64).ceil() as usize;
    "#".repeat(len.clamp(1, BAR_WIDTH))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRegistry, NewTransaction};
    use chrono::NaiveDate;

    fn report() -> TrendReport {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        agg.add_transaction(NewTransaction::expense("a", Money::from_units(50), d(3, 2), "food"));
        agg.add_transaction(NewTransaction::expense("b", Money::from_units(100), d(7, 9), "food"));
        agg.add_transaction(NewTransaction::income("c", Money::from_units(400), d(7, 1)));
        TrendReport::from_points(
            Granularity::Year,
            agg.spending_over_time_on(Granularity::Year, d(8, 1)),
        )
    }

    #[test]
    fn test_totals() {
        let report = report();
        assert_eq!(report.points.len(), 12);
        assert_eq!(report.total_income(), Money::from_units(400));
        assert_eq!(report.total_expense(), Money::from_units(150));
    }

    #[test]
    fn test_terminal_format_skips_empty() {
        let report = report();
        let full = report.format_terminal(false);
        let compact = report.format_terminal(true);

        assert!(full.contains("Jan"));
        assert!(!compact.contains("Jan"));
        assert!(compact.contains("Mar"));
        // July holds the largest expense
        assert!(compact.contains(&format!("{}\n", "#".repeat(BAR_WIDTH))));
        let march = compact.lines().find(|l| l.starts_with("Mar")).unwrap();
        assert!(march.ends_with(&format!(" {}", "#".repeat(BAR_WIDTH / 2))));
    }

    #[test]
    fn test_bar_scaling() {
        assert_eq!(bar(Money::zero(), Money::from_units(10)), "");
        assert_eq!(bar(Money::from_units(5), Money::from_units(10)).len(), BAR_WIDTH / 2);
        assert_eq!(bar(Money::from_cents(1), Money::from_units(1_000)).len(), 1);
    }
}
