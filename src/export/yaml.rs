//! YAML Export functionality
//!
//! Exports the complete ledger to YAML format for a human-readable backup.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::FullExport;
use crate::services::LedgerAggregator;

/// Export the full ledger to YAML format
pub fn export_full_yaml<W: Write>(aggregator: &LedgerAggregator, writer: &mut W) -> BudgetResult<()> {
    let export = FullExport::from_aggregator(aggregator);

    let header = format!(
        "# BudgetView Ledger Export\n\
         # Generated: {}\n\
         # App Version: {}\n\
         #\n\
         # Contains every transaction, budget goal and the starting balance.\n\n",
        export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}

/// Import from a YAML export
///
/// Header comments are ignored by the YAML parser.
pub fn import_from_yaml(yaml_str: &str) -> BudgetResult<FullExport> {
    let export: FullExport =
        serde_yaml::from_str(yaml_str).map_err(|e| BudgetError::Import(e.to_string()))?;

    export.validate().map_err(BudgetError::Import)?;

    Ok(export)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryRegistry, Money, NewTransaction};
    use chrono::NaiveDate;

    #[test]
    fn test_yaml_export() {
        let mut agg = LedgerAggregator::empty(*CategoryRegistry::builtin());
        agg.add_transaction(NewTransaction::expense(
            "Bus pass",
            Money::from_units(40),
            NaiveDate::from_ymd_opt(2025, 3, 3).unwrap(),
            "transport",
        ));
        agg.update_starting_balance(Money::from_cents(-1_500));

        let mut yaml_output = Vec::new();
        export_full_yaml(&agg, &mut yaml_output).unwrap();
        let yaml_string = String::from_utf8(yaml_output).unwrap();

        assert!(yaml_string.starts_with("# BudgetView Ledger Export"));
        assert!(yaml_string.contains("Bus pass"));
        assert!(yaml_string.contains("starting_balance: -1500"));

        let imported = import_from_yaml(&yaml_string).unwrap();
        assert_eq!(imported.transactions, agg.transactions());
        assert_eq!(imported.starting_balance, Money::from_cents(-1_500));
    }
}
