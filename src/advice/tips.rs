//! Financial tips flow
//!
//! The language-model call itself sits behind [`AdviceGenerator`]. This
//! module decides when to call it and normalises what comes back.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::prompt::render_prompt;
use super::snapshot::AdviceSnapshot;
use crate::error::{BudgetError, BudgetResult};
use crate::models::CategoryRegistry;

const NO_ADVICE: &str = "No specific advice generated based on the current data.";

/// Tips as shown to the user; every field is always present
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialTips {
    pub unnecessary_spending_areas: Vec<String>,
    pub savings_suggestions: Vec<String>,
    pub general_advice: String,
}

/// A generator's reply, where any field may be missing
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct GeneratedTips {
    #[serde(default)]
    pub unnecessary_spending_areas: Option<Vec<String>>,
    #[serde(default)]
    pub savings_suggestions: Option<Vec<String>>,
    #[serde(default)]
    pub general_advice: Option<String>,
}

/// Something that turns a prompt into tips, typically a hosted model
pub trait AdviceGenerator {
    fn generate(&self, prompt: &str, snapshot: &AdviceSnapshot) -> BudgetResult<GeneratedTips>;
}

/// Replays a generator reply saved as JSON
#[derive(Debug, Clone)]
pub struct StoredResponse {
    path: PathBuf,
}

impl StoredResponse {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl AdviceGenerator for StoredResponse {
    fn generate(&self, _prompt: &str, _snapshot: &AdviceSnapshot) -> BudgetResult<GeneratedTips> {
        let contents = std::fs::read_to_string(&self.path).map_err(|e| {
            BudgetError::Advice(format!("Failed to read {}: {}", self.path.display(), e))
        })?;
        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Advice(format!("Malformed advice response: {}", e)))
    }
}

impl FinancialTips {
    /// Canned reply for a ledger with nothing to analyse
    pub fn insufficient_data() -> Self {
        Self {
            unnecessary_spending_areas: vec!["Not enough data provided.".to_string()],
            savings_suggestions: vec!["Add income, expenses, or balance details for tips.".to_string()],
            general_advice: "Please add some financial data (income, expenses, current balance) so I can provide personalized tips."
                .to_string(),
        }
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::from("## Areas to Review\n");
        push_list(&mut out, &self.unnecessary_spending_areas);
        out.push_str("\n## Savings Suggestions\n");
        push_list(&mut out, &self.savings_suggestions);
        out.push_str("\n## General Advice\n");
        out.push_str(&self.general_advice);
        out.push('\n');
        out
    }
}

fn push_list(out: &mut String, items: &[String]) {
    if items.is_empty() {
        out.push_str("- Nothing to report\n");
    }
    for item in items {
        out.push_str("- ");
        out.push_str(item);
        out.push('\n');
    }
}

impl From<GeneratedTips> for FinancialTips {
    fn from(generated: GeneratedTips) -> Self {
        Self {
            unnecessary_spending_areas: generated.unnecessary_spending_areas.unwrap_or_default(),
            savings_suggestions: generated.savings_suggestions.unwrap_or_default(),
            general_advice: generated
                .general_advice
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| NO_ADVICE.to_string()),
        }
    }
}

/// Produce tips for `snapshot`
///
/// An empty ledger short-circuits to [`FinancialTips::insufficient_data`]
/// without calling the generator.
pub fn generate_tips(
    snapshot: &AdviceSnapshot,
    registry: &CategoryRegistry,
    currency: &str,
    generator: &dyn AdviceGenerator,
) -> BudgetResult<FinancialTips> {
    if !snapshot.has_data() {
        debug!("no ledger data, skipping advice generator");
        return Ok(FinancialTips::insufficient_data());
    }

    let prompt = render_prompt(snapshot, registry, currency);
    generator.generate(&prompt, snapshot).map(FinancialTips::from)
}
