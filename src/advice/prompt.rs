//! Prompt rendering for advice generators

use super::snapshot::AdviceSnapshot;
use crate::models::CategoryRegistry;

/// Render the Markdown request sent to an advice generator
///
/// The reply is expected as JSON with `unnecessary_spending_areas`,
/// `savings_suggestions` (both string arrays) and `general_advice`.
pub fn render_prompt(snapshot: &AdviceSnapshot, registry: &CategoryRegistry, currency: &str) -> String {
    let money = |m: crate::models::Money| m.format_with_symbol(currency);
    let mut out = String::new();

    out.push_str(&format!(
        "You are a friendly financial advisor. Review this budget data for {} and give personalised tips.\n\n",
        snapshot.period
    ));

    out.push_str("**Financial Data:**\n");
    out.push_str(&format!("* **Starting Balance:** {}\n", money(snapshot.starting_balance)));
    out.push_str(&format!("* **Total Income:** {}\n", money(snapshot.total_income)));
    out.push_str(&format!("* **Total Expenses:** {}\n", money(snapshot.total_expenses)));
    out.push_str(&format!("* **Current Balance:** {}\n\n", money(snapshot.current_balance)));

    out.push_str("**Expenses Breakdown:**\n");
    if snapshot.expenses_by_category.is_empty() {
        out.push_str("* No expenses recorded\n");
    }
    for entry in &snapshot.expenses_by_category {
        out.push_str(&format!("* **{}:** {}\n", entry.category_name, money(entry.amount)));
    }

    if !snapshot.budget_goals.is_empty() {
        out.push_str("\n**Budget Goals:**\n");
        for goal in &snapshot.budget_goals {
            out.push_str(&format!("* **{}:** Budget {}\n", goal.category_name, money(goal.amount)));
        }
    }

    if !snapshot.recent_transactions.is_empty() {
        out.push_str("\n**Recent Transactions:**\n");
        for txn in &snapshot.recent_transactions {
            out.push_str(&format!(
                "* {} | {} | {} | {} | Category: {}\n",
                txn.occurred_on.format("%Y-%m-%d"),
                txn.kind,
                txn.description,
                money(txn.amount),
                registry.display_name(&txn.category_id)
            ));
        }
    }

    out.push_str(
        "\n**Task:**\n\
         1. List categories where spending looks high against income or exceeds its budget goal \
         in `unnecessary_spending_areas`.\n\
         2. Give concrete ways to cut costs or save in `savings_suggestions`.\n\
         3. Comment briefly on overall financial health in `general_advice`.\n\n\
         Base the analysis only on the numbers above. Reply with a single JSON object.\n",
    );

    out
}
