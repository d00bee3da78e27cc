//! Transaction CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_transaction_details, format_transaction_register};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{NewTransaction, Transaction};
use crate::services::LedgerSession;

use super::{parse_date, parse_money, parse_period};

/// Transaction subcommands
#[derive(Subcommand, Debug)]
pub enum TransactionCommands {
    /// Record an expense or income entry
    Add {
        /// What the money was for
        description: String,

        /// Amount (e.g., "42", "42.50", "$42.50")
        amount: String,

        /// Expense category id or name (e.g., "food", "Shopping")
        #[arg(short, long, required_unless_present = "income")]
        category: Option<String>,

        /// Record as income instead of an expense
        #[arg(long, conflicts_with = "category")]
        income: bool,

        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Only this month (e.g., "2025-01", "current", "last")
        #[arg(short, long)]
        period: Option<String>,

        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show one transaction
    Show {
        /// Transaction id, full or short (e.g., "txn-1a2b3c4d")
        id: String,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id, full or short
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    session: &mut LedgerSession,
    settings: &Settings,
    cmd: TransactionCommands,
) -> BudgetResult<()> {
    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            category,
            income,
            date,
        } => {
            let amount = parse_money(&amount)?;
            let occurred_on = parse_date(date.as_deref())?;

            let input = match category {
                Some(query) if !income => {
                    let category = session
                        .aggregator()
                        .registry()
                        .find(&query)
                        .ok_or_else(|| BudgetError::category_not_found(query.as_str()))?;
                    NewTransaction::expense(description, amount, occurred_on, category.id)
                }
                _ => NewTransaction::income(description, amount, occurred_on),
            };
            input
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;

            let txn = session.add_transaction(input)?;
            println!("Added {} ({})", txn.id, txn);
            println!(
                "Current balance: {}",
                session
                    .aggregator()
                    .current_balance()
                    .format_with_symbol(&settings.currency_symbol)
            );
        }

        TransactionCommands::List { period, limit } => {
            let aggregator = session.aggregator();
            let period = period.as_deref().map(|p| parse_period(Some(p))).transpose()?;

            let matching: Vec<Transaction> = aggregator
                .transactions()
                .iter()
                .filter(|t| period.map_or(true, |p| p.contains(t.occurred_on)))
                .take(limit)
                .cloned()
                .collect();

            if let Some(period) = period {
                println!("Transactions for {}\n", period);
            }
            print!(
                "{}",
                format_transaction_register(&matching, aggregator.registry(), &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let aggregator = session.aggregator();
            let txn = aggregator
                .find_transaction(&id)
                .ok_or_else(|| BudgetError::transaction_not_found(id.as_str()))?;
            print!(
                "{}",
                format_transaction_details(txn, aggregator.registry(), &settings.date_format)
            );
        }

        TransactionCommands::Delete { id } => {
            let txn_id = session
                .aggregator()
                .find_transaction(&id)
                .map(|t| t.id)
                .ok_or_else(|| BudgetError::transaction_not_found(id.as_str()))?;

            match session.delete_transaction(txn_id)? {
                Some(txn) => println!("Deleted {} ({})", txn.id, txn),
                None => return Err(BudgetError::transaction_not_found(id)),
            }
        }
    }

    Ok(())
}
