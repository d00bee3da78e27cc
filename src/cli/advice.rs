//! CLI command for financial tips
//!
//! Without a saved response the command prints the prompt built from this
//! month's snapshot, ready to hand to a language model. With `--response`
//! the model's JSON reply is normalised and rendered.

use std::path::PathBuf;

use clap::Args;

use crate::advice::{generate_tips, render_prompt, AdviceSnapshot, FinancialTips, StoredResponse};
use crate::config::Settings;
use crate::error::BudgetResult;
use crate::services::LedgerSession;

use super::parse_period;

#[derive(Args, Debug)]
pub struct TipsArgs {
    /// Month to analyse (e.g., "2025-01", "current", "last")
    #[arg(short, long)]
    pub period: Option<String>,

    /// JSON reply from the model to render as tips
    #[arg(short, long)]
    pub response: Option<PathBuf>,

    /// Print the snapshot as JSON instead of the prompt
    #[arg(long, conflicts_with = "response")]
    pub json: bool,
}

pub fn handle_tips_command(
    session: &LedgerSession,
    settings: &Settings,
    args: TipsArgs,
) -> BudgetResult<()> {
    let aggregator = session.aggregator();
    let period = parse_period(args.period.as_deref())?;
    let snapshot = AdviceSnapshot::build(aggregator, period, settings.advice_sample_size);

    if let Some(path) = args.response {
        let tips = generate_tips(
            &snapshot,
            aggregator.registry(),
            &settings.currency_symbol,
            &StoredResponse::new(path),
        )?;
        print!("{}", tips.to_markdown());
        return Ok(());
    }

    // An empty snapshot is still valid JSON output
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    if !snapshot.has_data() {
        print!("{}", FinancialTips::insufficient_data().to_markdown());
    } else {
        print!(
            "{}",
            render_prompt(&snapshot, aggregator.registry(), &settings.currency_symbol)
        );
    }
    Ok(())
}
