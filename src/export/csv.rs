//! CSV Export functionality
//!
//! Exports transactions and budget goals to spreadsheet-friendly CSV.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::services::LedgerAggregator;

#[derive(Serialize)]
struct TransactionRow<'a> {
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Type")]
    kind: String,
    #[serde(rename = "Description")]
    description: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Amount")]
    amount: String,
}

#[derive(Serialize)]
struct GoalRow<'a> {
    #[serde(rename = "Category ID")]
    category_id: &'a str,
    #[serde(rename = "Category")]
    category: &'static str,
    #[serde(rename = "Goal")]
    goal: String,
}

fn export_error(e: csv::Error) -> BudgetError {
    BudgetError::Export(e.to_string())
}

/// Export all transactions to CSV, newest first
///
/// Amounts are signed: expenses are written negative so the column sums to
/// the all-time net.
pub fn export_transactions_csv<W: Write>(aggregator: &LedgerAggregator, writer: W) -> BudgetResult<()> {
    let registry = aggregator.registry();
    let mut csv = csv::Writer::from_writer(writer);

    for txn in aggregator.transactions() {
        csv.serialize(TransactionRow {
            id: txn.id.as_uuid().to_string(),
            date: txn.occurred_on.to_string(),
            kind: txn.kind.to_string(),
            description: &txn.description,
            category: registry.display_name(&txn.category_id),
            amount: txn.signed_amount().to_decimal_string(),
        })
        .map_err(export_error)?;
    }

    // An empty ledger still gets a header row
    if aggregator.transactions().is_empty() {
        csv.write_record(["ID", "Date", "Type", "Description", "Category", "Amount"])
            .map_err(export_error)?;
    }

    csv.flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Export every category's budget goal to CSV, in registry order
pub fn export_budget_goals_csv<W: Write>(aggregator: &LedgerAggregator, writer: W) -> BudgetResult<()> {
    let registry = aggregator.registry();
    let mut csv = csv::Writer::from_writer(writer);

    for goal in aggregator.budget_goals() {
        csv.serialize(GoalRow {
            category_id: &goal.category_id,
            category: registry.display_name(&goal.category_id),
            goal: goal.amount.to_decimal_string(),
        })
        .map_err(export_error)?;
    }

    csv.flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRegistry, Money, NewTransaction};
    use chrono::NaiveDate;

    #[test]
    fn test_export_transactions_csv() {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        let d = |day| NaiveDate::from_ymd_opt(2025, 1, day).unwrap();
        agg.add_transaction(NewTransaction::income("Paycheck", Money::from_units(1_200), d(1)));
        let lunch = agg.add_transaction(NewTransaction::expense(
            "Lunch, with \"team\"",
            Money::from_cents(1_875),
            d(15),
            "food",
        ));

        let mut csv_output = Vec::new();
        export_transactions_csv(&agg, &mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();
        let lines: Vec<&str> = csv_string.lines().collect();

        assert_eq!(lines[0], "ID,Date,Type,Description,Category,Amount");
        assert_eq!(
            lines[1],
            format!(
                "{},2025-01-15,Expense,\"Lunch, with \"\"team\"\"\",Food & Dining,-18.75",
                lunch.id.as_uuid()
            )
        );
        assert!(lines[2].ends_with(",2025-01-01,Income,Paycheck,Income,1200.00"));
    }

    #[test]
    fn test_empty_ledger_has_header() {
        let agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        let mut csv_output = Vec::new();
        export_transactions_csv(&agg, &mut csv_output).unwrap();
        assert_eq!(
            String::from_utf8(csv_output).unwrap(),
            "ID,Date,Type,Description,Category,Amount\n"
        );
    }

    #[test]
    fn test_export_budget_goals_csv() {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        agg.update_budget_goal("housing", Money::from_units(1_000));

        let mut csv_output = Vec::new();
        export_budget_goals_csv(&agg, &mut csv_output).unwrap();
        let csv_string = String::from_utf8(csv_output).unwrap();

        assert!(csv_string.starts_with("Category ID,Category,Goal\nfood,Food & Dining,0.00\n"));
        assert!(csv_string.contains("housing,Housing & Utilities,1000.00\n"));
        assert_eq!(csv_string.lines().count(), 7);
    }
}
