//! Budget CLI commands
//!
//! Monthly budget goals per category and the ledger's starting balance.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_goal_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::FALLBACK_CATEGORY_ID;
use crate::services::LedgerSession;

use super::parse_money;

/// Budget goal subcommands
#[derive(Subcommand, Debug)]
pub enum GoalCommands {
    /// List the active monthly goals
    List,

    /// Set the monthly goal for a category (0 clears it)
    Set {
        /// Category id or name
        category: String,
        /// Amount (e.g., "300" or "300.00")
        amount: String,
    },
}

/// Starting balance subcommands
#[derive(Subcommand, Debug)]
pub enum BalanceCommands {
    /// Show the starting and current balance
    Show,

    /// Set the balance the ledger starts from (may be negative)
    Set {
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
}

/// Handle a goal command
pub fn handle_goal_command(session: &mut LedgerSession, cmd: GoalCommands) -> BudgetResult<()> {
    match cmd {
        GoalCommands::List => {
            let aggregator = session.aggregator();
            print!(
                "{}",
                format_goal_list(aggregator.registry(), aggregator.budget_goals())
            );
        }

        GoalCommands::Set { category, amount } => {
            let amount = parse_money(&amount)?;
            if amount.is_negative() {
                return Err(BudgetError::Validation(
                    "Budget goal cannot be negative".into(),
                ));
            }
            let category = session
                .aggregator()
                .registry()
                .find(&category)
                .ok_or_else(|| BudgetError::category_not_found(category.as_str()))?;

            match session.update_budget_goal(category.id, amount)? {
                Some(previous) => {
                    println!("{} goal: {} -> {}", category.name, previous, amount);
                    if category.id == FALLBACK_CATEGORY_ID {
                        println!("Note: spending in '{}' is not tracked against its goal.", category.name);
                    }
                }
                None => return Err(BudgetError::category_not_found(category.id)),
            }
        }
    }

    Ok(())
}

/// Handle a balance command
pub fn handle_balance_command(
    session: &mut LedgerSession,
    settings: &Settings,
    cmd: BalanceCommands,
) -> BudgetResult<()> {
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BalanceCommands::Show => {
            let aggregator = session.aggregator();
            println!(
                "Starting balance: {}",
                aggregator.starting_balance().format_with_symbol(currency)
            );
            println!(
                "Current balance:  {}",
                aggregator.current_balance().format_with_symbol(currency)
            );
        }

        BalanceCommands::Set { amount } => {
            let amount = parse_money(&amount)?;
            let previous = session.update_starting_balance(amount)?;
            println!(
                "Starting balance: {} -> {}",
                previous.format_with_symbol(currency),
                amount.format_with_symbol(currency)
            );
        }
    }

    Ok(())
}
