//! CLI commands for data export
//!
//! Provides commands for exporting the ledger in various formats.

use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};

use crate::error::{BudgetError, BudgetResult};
use crate::export::{csv, json, yaml};
use crate::services::LedgerSession;

use super::create_output_file;

/// Export format options
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    /// CSV format (transactions only)
    Csv,
    /// JSON format (full ledger)
    Json,
    /// YAML format (full ledger, human-readable)
    Yaml,
}

/// Export subcommands
#[derive(Subcommand, Debug)]
pub enum ExportCommands {
    /// Export the whole ledger to a file
    All {
        /// Output file path
        output: PathBuf,

        /// Export format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ExportFormat,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// Export transactions to CSV
    Transactions {
        /// Output file path
        output: PathBuf,
    },

    /// Export budget goals to CSV
    Goals {
        /// Output file path
        output: PathBuf,
    },

    /// Check that a JSON or YAML export can be restored
    Verify {
        /// Export file to check
        input: PathBuf,
    },

    /// Replace the ledger with the contents of a JSON or YAML export
    Restore {
        /// Export file to restore from
        input: PathBuf,
    },

    /// Show export information without writing files
    Info,
}

/// Handle export commands
pub fn handle_export_command(session: &mut LedgerSession, cmd: ExportCommands) -> BudgetResult<()> {
    // Restore is the only export command that writes to the ledger
    let cmd = match cmd {
        ExportCommands::Restore { input } => return restore_export(session, &input),
        other => other,
    };

    let aggregator = session.aggregator();
    match cmd {
        ExportCommands::All {
            output,
            format,
            pretty,
        } => {
            let mut writer = create_output_file(&output)?;
            match format {
                ExportFormat::Csv => {
                    csv::export_transactions_csv(aggregator, &mut writer)?;
                    println!("Transactions exported to: {}", output.display());
                    println!("Note: CSV format exports transactions only. Use JSON or YAML for a full ledger export.");
                }
                ExportFormat::Json => {
                    json::export_full_json(aggregator, &mut writer, pretty)?;
                    println!("Full ledger exported to: {}", output.display());
                }
                ExportFormat::Yaml => {
                    yaml::export_full_yaml(aggregator, &mut writer)?;
                    println!("Full ledger exported to: {}", output.display());
                }
            }
        }

        ExportCommands::Transactions { output } => {
            let mut writer = create_output_file(&output)?;
            csv::export_transactions_csv(aggregator, &mut writer)?;
            println!(
                "Exported {} transactions to: {}",
                aggregator.transactions().len(),
                output.display()
            );
        }

        ExportCommands::Goals { output } => {
            let mut writer = create_output_file(&output)?;
            csv::export_budget_goals_csv(aggregator, &mut writer)?;
            println!("Budget goals exported to: {}", output.display());
        }

        ExportCommands::Verify { input } => {
            let export = read_export(&input)?;
            println!("{} is a valid export", input.display());
            println!("  Schema version: {}", export.schema_version);
            println!("  Exported at:    {}", export.exported_at);
            println!("  Transactions:   {}", export.transactions.len());
            println!("  Starting balance: {}", export.starting_balance);
        }

        ExportCommands::Info => {
            let export = json::FullExport::from_aggregator(aggregator);
            let meta = &export.metadata;
            println!("Export Information");
            println!("==================");
            println!("Schema version:  {}", export.schema_version);
            println!("Backend:         {}", session.store_name());
            println!(
                "Transactions:    {} ({} income, {} expense)",
                meta.transaction_count, meta.income_count, meta.expense_count
            );
            println!("Active goals:    {}", meta.active_goal_count);
            println!("Current balance: {}", meta.current_balance);
            if let (Some(first), Some(last)) = (&meta.earliest_transaction, &meta.latest_transaction) {
                println!("Date range:      {} to {}", first, last);
            }
        }

        ExportCommands::Restore { .. } => {}
    }

    Ok(())
}

fn restore_export(session: &mut LedgerSession, input: &Path) -> BudgetResult<()> {
    let export = read_export(input)?;
    let transactions = export.transactions.len();
    let ledger = export.into_ledger(session.aggregator().registry());
    let summary = session.restore(ledger)?;

    println!("Restored ledger from: {}", input.display());
    println!("  Transactions:    {}", transactions);
    println!("  Added:           {}", summary.inserted);
    println!("  Removed:         {}", summary.removed);
    println!("  Current balance: {}", session.aggregator().current_balance());
    Ok(())
}

/// Read and validate an export, YAML by extension and JSON otherwise
fn read_export(input: &Path) -> BudgetResult<json::FullExport> {
    let contents = std::fs::read_to_string(input)
        .map_err(|e| BudgetError::Import(format!("Failed to read {}: {}", input.display(), e)))?;
    let is_yaml = input
        .extension()
        .is_some_and(|ext| ext == "yaml" || ext == "yml");
    if is_yaml {
        yaml::import_from_yaml(&contents)
    } else {
        json::import_from_json(&contents)
    }
}
