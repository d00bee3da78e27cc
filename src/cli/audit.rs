//! CLI command for reading the audit log

use clap::Args;

use crate::audit::AuditLogger;
use crate::config::BudgetViewPaths;
use crate::error::BudgetResult;

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Number of most recent entries to show
    #[arg(short, long, default_value_t = 20)]
    pub limit: usize,
}

/// Print the most recent audit entries, oldest first
pub fn handle_audit_command(paths: &BudgetViewPaths, args: AuditArgs) -> BudgetResult<()> {
    let logger = AuditLogger::new(paths.audit_log());
    if !logger.exists() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let entries = logger.read_recent(args.limit)?;
    println!("Audit log: {}", logger.path().display());
    println!("Showing the last {} entries", entries.len());
    println!();
    for entry in &entries {
        println!("{}", entry.format_human_readable());
    }
    Ok(())
}
