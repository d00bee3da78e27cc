//! Display formatting for terminal output
//!
//! Register views of ledger entries and tables of categories and goals.

pub mod category;
pub mod transaction;

pub use category::{format_category_list, format_goal_list};
pub use transaction::{format_transaction_details, format_transaction_register, format_transaction_row};
