//! CLI commands for reports
//!
//! Dashboard summary, category breakdown, budget progress and trends.

use std::path::PathBuf;

use clap::Args;

use crate::config::Settings;
use crate::error::{BudgetError, BudgetResult};
use crate::models::Granularity;
use crate::reports::{BudgetProgressReport, DashboardSummary, SpendingReport, TrendReport};
use crate::services::LedgerSession;

use super::{create_output_file, parse_period};

/// Arguments shared by the month-scoped reports
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Month to report on (e.g., "2025-01", "current", "last")
    #[arg(short, long)]
    pub period: Option<String>,

    /// Export to CSV file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct TrendsArgs {
    /// "month" for daily points this month, "year" for monthly points this year
    #[arg(short, long, default_value = "month")]
    pub granularity: String,

    /// Include days or months without activity
    #[arg(long)]
    pub all: bool,
}

pub fn handle_summary_command(
    session: &LedgerSession,
    settings: &Settings,
    args: ReportArgs,
) -> BudgetResult<()> {
    let period = parse_period(args.period.as_deref())?;
    let summary = DashboardSummary::generate(session.aggregator(), period);

    if let Some(output) = args.output {
        let writer = create_output_file(&output)?;
        serde_json::to_writer_pretty(writer, &summary)
            .map_err(|e| BudgetError::Export(e.to_string()))?;
        println!("Summary exported to: {}", output.display());
    } else {
        print!("{}", summary.format_terminal(&settings.currency_symbol));
    }
    Ok(())
}

pub fn handle_breakdown_command(session: &LedgerSession, args: ReportArgs) -> BudgetResult<()> {
    let period = parse_period(args.period.as_deref())?;
    let report = SpendingReport::generate(session.aggregator(), period);

    if let Some(output) = args.output {
        let mut writer = create_output_file(&output)?;
        report.export_csv(&mut writer)?;
        println!("Spending report exported to: {}", output.display());
    } else {
        print!("{}", report.format_terminal());
    }
    Ok(())
}

pub fn handle_progress_command(session: &LedgerSession, args: ReportArgs) -> BudgetResult<()> {
    let period = parse_period(args.period.as_deref())?;
    let report = BudgetProgressReport::generate(session.aggregator(), period);

    if let Some(output) = args.output {
        let mut writer = create_output_file(&output)?;
        report.export_csv(&mut writer)?;
        println!("Budget progress exported to: {}", output.display());
        return Ok(());
    }

    print!("{}", report.format_terminal());
    let over = report.over_budget_rows();
    if !over.is_empty() {
        println!(
            "\n{} categor{} over budget.",
            over.len(),
            if over.len() == 1 { "y is" } else { "ies are" }
        );
    }
    Ok(())
}

pub fn handle_trends_command(session: &LedgerSession, args: TrendsArgs) -> BudgetResult<()> {
    let granularity: Granularity = args.granularity.parse().map_err(BudgetError::Validation)?;
    let report = TrendReport::generate(session.aggregator(), granularity);
    print!("{}", report.format_terminal(!args.all));
    Ok(())
}
