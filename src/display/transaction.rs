//! Transaction display formatting
//!
//! Register rows and detail views for ledger entries.

use crate::models::{CategoryRegistry, Money, Transaction};

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, registry: &CategoryRegistry, date_format: &str) -> String {
    let kind_icon = if txn.is_income() { "+" } else { "-" };

    format!(
        "{} {:12} {:10}  {} {} {:>12}",
        kind_icon,
        txn.id.to_string(),
        txn.occurred_on.format(date_format).to_string(),
        truncate(&txn.description, 24),
        truncate(registry.display_name(&txn.category_id), 20),
        txn.signed_amount().to_string()
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[Transaction],
    registry: &CategoryRegistry,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "  {:12} {:10}  {:<24} {:<20} {:>12}\n",
        "ID", "Date", "Description", "Category", "Amount"
    ));
    output.push_str(&"-".repeat(86));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, registry, date_format));
        output.push('\n');
    }

    let net: Money = transactions.iter().map(Transaction::signed_amount).sum();
    output.push_str(&"-".repeat(86));
    output.push('\n');
    output.push_str(&format!(
        "{:>72} {:>12}\n",
        format!("Net ({} entries):", transactions.len()),
        net.to_string()
    ));

    output
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    registry: &CategoryRegistry,
    date_format: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Full ID:     {}\n", txn.id.as_uuid()));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.occurred_on.format(date_format)));
    output.push_str(&format!("Amount:      {}\n", txn.amount));
    output.push_str(&format!("Description: {}\n", txn.description));

    let category = registry.display_name(&txn.category_id);
    if txn.is_expense() && registry.get(&txn.category_id).is_none() {
        output.push_str(&format!("Category:    {} (recorded as '{}')\n", category, txn.category_id));
    } else {
        output.push_str(&format!("Category:    {}\n", category));
    }

    output
}

/// Pad or cut a string to exactly `max_len` characters
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:width$}", s, width = max_len)
    } else {
        let cut: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", cut)
    }
}
