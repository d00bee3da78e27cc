//! Category display formatting
//!
//! Formats the category registry together with the budget goal set.

use crate::models::{BudgetGoals, CategoryRegistry, Money};

/// Format every category with its goal, in registry order
pub fn format_category_list(registry: &CategoryRegistry, goals: &BudgetGoals) -> String {
    let categories = registry.all();
    if categories.is_empty() {
        return "No categories found.".to_string();
    }

    let name_width = categories
        .iter()
        .map(|c| c.name.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<10}  {:<width$}  {:>10}  {}\n",
        "ID",
        "Category",
        "Goal",
        "Color",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<10}  {:-<width$}  {:->10}  {:-<7}\n",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for category in categories {
        let goal_str = goals
            .get(category.id)
            .filter(|g| g.is_set())
            .map(|g| g.amount.to_string())
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<10}  {:<width$}  {:>10}  {}\n",
            category.id,
            category.name,
            goal_str,
            category.color,
            width = name_width
        ));
    }

    output
}

/// Format the goal set alone, with the monthly total of active goals
pub fn format_goal_list(registry: &CategoryRegistry, goals: &BudgetGoals) -> String {
    let active: Vec<_> = goals.active().collect();
    if active.is_empty() {
        return "No budget goals set.\n".to_string();
    }

    let mut output = String::from("Monthly budget goals:\n");
    for goal in &active {
        output.push_str(&format!(
            "  {:<22} {:>12}\n",
            registry.display_name(&goal.category_id),
            goal.amount.to_string()
        ));
    }
    let total: Money = active.iter().map(|g| g.amount).sum();
    output.push_str(&format!("  {:<22} {:>12}\n", "Total", total.to_string()));
    output
}
