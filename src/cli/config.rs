//! Setup and configuration commands
//!
//! These run before a ledger is opened, so they only touch paths and settings.

use clap::Args;

use crate::config::{is_valid_date_format, BudgetViewPaths, Settings, StorageBackend};
use crate::error::{BudgetError, BudgetResult};
use crate::models::UserId;

#[derive(Args, Debug, Default)]
pub struct ConfigArgs {
    /// Storage backend: "local" or "cloud"
    #[arg(long)]
    pub backend: Option<String>,

    /// Signed-in user id for the cloud backend
    #[arg(long)]
    pub cloud_user: Option<String>,

    /// Forget the signed-in user
    #[arg(long, conflicts_with = "cloud_user")]
    pub sign_out: bool,

    /// Currency symbol used in output
    #[arg(long)]
    pub currency: Option<String>,

    /// Date format for transaction lists (chrono syntax, e.g. "%d/%m/%Y")
    #[arg(long)]
    pub date_format: Option<String>,
}

impl ConfigArgs {
    fn is_empty(&self) -> bool {
        self.backend.is_none()
            && self.cloud_user.is_none()
            && !self.sign_out
            && self.currency.is_none()
            && self.date_format.is_none()
    }
}

/// Create the directory layout and a settings file
pub fn handle_init_command(paths: &BudgetViewPaths, settings: &Settings) -> BudgetResult<()> {
    let was_initialized = paths.is_initialized();
    paths.ensure_directories()?;
    settings.save(paths)?;

    if was_initialized {
        println!("BudgetView already initialized at: {}", paths.base_dir().display());
    } else {
        println!("Initialized BudgetView at: {}", paths.base_dir().display());
    }
    println!("Data directory: {}", paths.data_dir().display());
    println!();
    println!("Record your first entry with 'budgetview txn add <description> <amount> -c <category>'.");
    Ok(())
}

/// Show, and optionally change, the settings
pub fn handle_config_command(
    paths: &BudgetViewPaths,
    settings: &mut Settings,
    args: ConfigArgs,
) -> BudgetResult<()> {
    if !args.is_empty() {
        apply_config(settings, args)?;
        paths.ensure_directories()?;
        settings.save(paths)?;
        println!("Settings saved.\n");
    }

    println!("BudgetView Configuration");
    println!("========================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Audit log:       {}", paths.audit_log().display());
    println!();
    println!("Settings:");
    println!("  Backend:       {}", settings.backend);
    println!(
        "  Cloud user:    {}",
        settings.cloud_user.as_deref().unwrap_or("(signed out)")
    );
    println!("  Currency:      {}", settings.currency_symbol);
    println!("  Date format:   {}", settings.date_format);
    println!("  Advice sample: {}", settings.advice_sample_size);
    Ok(())
}

fn apply_config(settings: &mut Settings, args: ConfigArgs) -> BudgetResult<()> {
    if let Some(backend) = args.backend {
        settings.backend = backend.parse::<StorageBackend>()?;
    }
    if let Some(user) = args.cloud_user {
        let user = UserId::new(user.as_str())
            .ok_or_else(|| {
                BudgetError::Validation(format!(
                    "Invalid user id '{}': use letters, digits and '-_.@' only",
                    user
                ))
            })?;
        settings.cloud_user = Some(user.as_str().to_string());
    }
    if args.sign_out {
        settings.cloud_user = None;
    }
    if let Some(currency) = args.currency {
        settings.currency_symbol = currency;
    }
    if let Some(format) = args.date_format {
        if !is_valid_date_format(&format) {
            return Err(BudgetError::Validation(format!(
                "Invalid date format '{}'",
                format
            )));
        }
        settings.date_format = format;
    }
    Ok(())
}
