//! Financial advice support
//!
//! Builds the aggregated snapshot an external language model is given,
//! renders it as a prompt, and normalises the tips that come back.

pub mod prompt;
pub mod snapshot;
pub mod tips;

pub use prompt::render_prompt;
pub use snapshot::{AdviceSnapshot, NamedAmount, DEFAULT_SAMPLE_SIZE};
pub use tips::{generate_tips, AdviceGenerator, FinancialTips, GeneratedTips, StoredResponse};
