//! Category CLI commands

use crate::display::format_category_list;
use crate::error::BudgetResult;
use crate::services::LedgerSession;

/// List the built-in categories with their goals
pub fn handle_categories_command(session: &LedgerSession) -> BudgetResult<()> {
    let aggregator = session.aggregator();
    print!(
        "{}",
        format_category_list(aggregator.registry(), aggregator.budget_goals())
    );
    println!("\nIncome entries are filed under 'income' and carry no goal.");
    Ok(())
}
