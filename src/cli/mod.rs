//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the session and reports.

pub mod advice;
pub mod audit;
pub mod budget;
pub mod category;
pub mod config;
pub mod export;
pub mod report;
pub mod transaction;

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use chrono::NaiveDate;

use crate::error::{BudgetError, BudgetResult};
use crate::models::period::today;
use crate::models::{Money, MonthPeriod};

pub use advice::{handle_tips_command, TipsArgs};
pub use audit::{handle_audit_command, AuditArgs};
pub use budget::{handle_balance_command, handle_goal_command, BalanceCommands, GoalCommands};
pub use category::handle_categories_command;
pub use config::{handle_config_command, handle_init_command, ConfigArgs};
pub use export::{handle_export_command, ExportCommands};
pub use report::{
    handle_breakdown_command, handle_progress_command, handle_summary_command,
    handle_trends_command, ReportArgs, TrendsArgs,
};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Resolve a period argument; absent means the current month
pub(crate) fn parse_period(input: Option<&str>) -> BudgetResult<MonthPeriod> {
    match input {
        None => Ok(MonthPeriod::current()),
        Some(s) => MonthPeriod::parse_relative(s, today())
            .map_err(|e| BudgetError::Validation(e.to_string())),
    }
}

pub(crate) fn parse_money(input: &str) -> BudgetResult<Money> {
    Money::parse(input).map_err(|e| BudgetError::Validation(e.to_string()))
}

/// Parse a `YYYY-MM-DD` date; absent means today
pub(crate) fn parse_date(input: Option<&str>) -> BudgetResult<NaiveDate> {
    match input {
        None => Ok(today()),
        Some(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|_| {
            BudgetError::Validation(format!("Invalid date '{}'. Use YYYY-MM-DD", s))
        }),
    }
}

pub(crate) fn create_output_file(output: &Path) -> BudgetResult<BufWriter<File>> {
    let file = File::create(output).map_err(|e| {
        BudgetError::Export(format!("Failed to create file {}: {}", output.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_period() {
        assert_eq!(parse_period(None).unwrap(), MonthPeriod::current());
        assert_eq!(
            parse_period(Some("2024-02")).unwrap(),
            MonthPeriod::new(2024, 2).unwrap()
        );
        assert!(parse_period(Some("Feb")).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date_and_money() {
        assert_eq!(
            parse_date(Some("2025-06-30")).unwrap(),
            NaiveDate::from_ymd_opt(2025, 6, 30).unwrap()
        );
        assert!(parse_date(Some("30/06/2025")).is_err());
        assert_eq!(parse_money("$12.5").unwrap(), Money::from_cents(1_250));
        assert!(parse_money("twelve").unwrap_err().is_validation());
    }
}
