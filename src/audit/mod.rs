//! Audit logging for ledger mutations
//!
//! Every transaction add/delete, goal change and starting balance change
//! made through a session is appended to `audit.log` as one JSON line with
//! the record's state before and after.

mod entry;
mod logger;

pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
