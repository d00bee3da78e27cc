//! JSON Export functionality
//!
//! Exports the complete ledger to JSON format with schema versioning.

use std::collections::HashSet;
use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetGoal, CategoryRegistry, Ledger, Money, Transaction};
use crate::services::LedgerAggregator;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Full ledger export structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Newest first
    pub transactions: Vec<Transaction>,

    pub budget_goals: Vec<BudgetGoal>,

    pub starting_balance: Money,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub income_count: usize,
    pub expense_count: usize,

    /// Goals with a non-zero amount
    pub active_goal_count: usize,

    pub current_balance: Money,

    /// Date range of transactions (earliest)
    pub earliest_transaction: Option<String>,

    /// Date range of transactions (latest)
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot the aggregator's ledger
    pub fn from_aggregator(aggregator: &LedgerAggregator) -> Self {
        let ledger = aggregator.ledger();
        let transactions = ledger.transactions.clone();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            income_count: transactions.iter().filter(|t| t.is_income()).count(),
            expense_count: transactions.iter().filter(|t| t.is_expense()).count(),
            active_goal_count: ledger.budget_goals.active().count(),
            current_balance: aggregator.current_balance(),
            earliest_transaction: transactions
                .iter()
                .map(|t| t.occurred_on)
                .min()
                .map(|d| d.to_string()),
            latest_transaction: transactions
                .iter()
                .map(|t| t.occurred_on)
                .max()
                .map(|d| d.to_string()),
        };

        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            transactions,
            budget_goals: ledger.budget_goals.as_slice().to_vec(),
            starting_balance: ledger.starting_balance,
            metadata,
        }
    }

    /// Validate the export structure
    pub fn validate(&self) -> Result<(), String> {
        if self.schema_version != EXPORT_SCHEMA_VERSION {
            return Err(format!(
                "Schema version mismatch: expected {}, got {}",
                EXPORT_SCHEMA_VERSION, self.schema_version
            ));
        }

        let mut seen = HashSet::new();
        for txn in &self.transactions {
            if !seen.insert(txn.id) {
                return Err(format!("Duplicate transaction id {}", txn.id));
            }
            if !txn.amount.is_positive() {
                return Err(format!(
                    "Transaction {} has non-positive amount {}",
                    txn.id, txn.amount
                ));
            }
        }

        if let Some(goal) = self.budget_goals.iter().find(|g| g.amount.is_negative()) {
            return Err(format!(
                "Budget goal for {} is negative: {}",
                goal.category_id, goal.amount
            ));
        }

        if self.metadata.transaction_count != self.transactions.len() {
            return Err(format!(
                "Metadata lists {} transactions but the export holds {}",
                self.metadata.transaction_count,
                self.transactions.len()
            ));
        }

        Ok(())
    }

    /// Rebuild a ledger, reconciling goals to the registry
    pub fn into_ledger(self, registry: &CategoryRegistry) -> Ledger {
        Ledger::from_parts(
            self.transactions,
            self.budget_goals,
            self.starting_balance,
            registry,
        )
    }
}

/// Export the full ledger to JSON
pub fn export_full_json<W: Write>(
    aggregator: &LedgerAggregator,
    writer: &mut W,
    pretty: bool,
) -> BudgetResult<()> {
    let export = FullExport::from_aggregator(aggregator);

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a JSON export (for verification/restore)
pub fn import_from_json(json_str: &str) -> BudgetResult<FullExport> {
    let export: FullExport =
        serde_json::from_str(json_str).map_err(|e| BudgetError::Import(e.to_string()))?;

    export.validate().map_err(BudgetError::Import)?;

    Ok(export)
}
