use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::debug;

use budgetview::audit::AuditLogger;
use budgetview::cli::{
    handle_audit_command, handle_balance_command, handle_breakdown_command,
    handle_categories_command, handle_config_command, handle_export_command, handle_goal_command,
    handle_init_command, handle_progress_command, handle_summary_command, handle_tips_command,
    handle_transaction_command, handle_trends_command, AuditArgs, BalanceCommands, ConfigArgs,
    ExportCommands, GoalCommands, ReportArgs, TipsArgs, TransactionCommands, TrendsArgs,
};
use budgetview::config::{BudgetViewPaths, Settings};
use budgetview::models::CategoryRegistry;
use budgetview::services::LedgerSession;
use budgetview::storage::open_store;

#[derive(Parser)]
#[command(
    name = "budgetview",
    version,
    about = "Personal budget dashboard for the terminal",
    long_about = "BudgetView keeps a ledger of income and expenses, tracks monthly \
                  budget goals per category and derives balances, breakdowns and \
                  spending trends from it."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Transaction management commands
    #[command(subcommand, alias = "transaction")]
    Txn(TransactionCommands),

    /// Monthly budget goals
    #[command(subcommand)]
    Goal(GoalCommands),

    /// Starting balance
    #[command(subcommand)]
    Balance(BalanceCommands),

    /// Balance, income, expenses and net for a month
    Summary(ReportArgs),

    /// List categories with their goals
    Categories,

    /// Expense breakdown by category for a month
    Breakdown(ReportArgs),

    /// Income and expense over the current month or year
    Trends(TrendsArgs),

    /// Spending against budget goals for a month
    Progress(ReportArgs),

    /// Financial tips: prints the model prompt, or renders a saved reply
    Tips(TipsArgs),

    /// Export ledger data
    #[command(subcommand)]
    Export(ExportCommands),

    /// Show recent ledger changes from the audit log
    Audit(AuditArgs),

    /// Initialize the data directory
    Init,

    /// Show or change settings and paths
    Config(ConfigArgs),
}

fn main() -> Result<()> {
    budgetview::logging::init_tracing();
    let cli = Cli::parse();

    let paths = BudgetViewPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;

    let Some(command) = cli.command else {
        println!("BudgetView - personal budget dashboard");
        println!();
        println!("Run 'budgetview --help' for usage information.");
        println!("Run 'budgetview summary' to see this month at a glance.");
        return Ok(());
    };

    // Setup commands and the audit log don't need a ledger
    let command = match command {
        Commands::Init => return Ok(handle_init_command(&paths, &settings)?),
        Commands::Config(args) => return Ok(handle_config_command(&paths, &mut settings, args)?),
        Commands::Audit(args) => return Ok(handle_audit_command(&paths, args)?),
        other => other,
    };

    let store = open_store(&settings, &paths)?;
    let mut session = LedgerSession::open(*CategoryRegistry::builtin(), store)?
        .with_audit(AuditLogger::new(paths.audit_log()));
    debug!(backend = session.store_name(), "ledger loaded");

    match command {
        Commands::Txn(cmd) => handle_transaction_command(&mut session, &settings, cmd)?,
        Commands::Goal(cmd) => handle_goal_command(&mut session, cmd)?,
        Commands::Balance(cmd) => handle_balance_command(&mut session, &settings, cmd)?,
        Commands::Summary(args) => handle_summary_command(&session, &settings, args)?,
        Commands::Categories => handle_categories_command(&session)?,
        Commands::Breakdown(args) => handle_breakdown_command(&session, args)?,
        Commands::Trends(args) => handle_trends_command(&session, args)?,
        Commands::Progress(args) => handle_progress_command(&session, args)?,
        Commands::Tips(args) => handle_tips_command(&session, &settings, args)?,
        Commands::Export(cmd) => handle_export_command(&mut session, cmd)?,
        Commands::Init | Commands::Config(_) | Commands::Audit(_) => {}
    }

    Ok(())
}
