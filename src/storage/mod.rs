//! Storage layer for BudgetView
//!
//! The ledger is persisted through a [`LedgerStore`], an adapter with two
//! providers: [`LocalStore`] keeps JSON files in the data directory and
//! [`CloudStore`] keeps per-user documents in a [`DocumentStore`]. Both push
//! change notifications so a session can pick up writes made elsewhere.

pub mod cloud;
pub mod documents;
pub mod file_io;
pub mod local;
pub mod notify;

pub use cloud::CloudStore;
pub use documents::{DocumentChange, DocumentChangeKind, DocumentStore, FsDocumentStore};
pub use file_io::{read_json, read_json_or_default, write_json_atomic};
pub use local::LocalStore;
pub use notify::{ChangeFeed, ChangeNotifier};

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::{BudgetViewPaths, Settings, StorageBackend};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetGoal, BudgetGoals, CategoryRegistry, Ledger, Money, Transaction, TransactionId};

/// Which part of the persisted ledger changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerChange {
    Transactions,
    /// Budget goals or starting balance
    Settings,
}

/// The ledger as it comes out of a store, before reconciliation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredLedger {
    pub transactions: Vec<Transaction>,
    pub budget_goals: Vec<BudgetGoal>,
    pub starting_balance: Money,
}

impl StoredLedger {
    /// Order transactions for display and reconcile goals to `registry`
    pub fn into_ledger(self, registry: &CategoryRegistry) -> Ledger {
        Ledger::from_parts(
            self.transactions,
            self.budget_goals,
            self.starting_balance,
            registry,
        )
    }
}

/// Persistence adapter for one user's ledger
///
/// Writes are per record for transactions and whole-value for goals and
/// the starting balance. Implementations must tolerate malformed stored data
/// by logging it and falling back to an empty value.
pub trait LedgerStore: Send + Sync {
    /// Short provider name for logs and `config` output
    fn name(&self) -> &'static str;

    fn load(&self) -> BudgetResult<StoredLedger>;

    fn insert_transaction(&self, transaction: &Transaction) -> BudgetResult<()>;

    /// Removing an id the store doesn't hold is not an error
    fn remove_transaction(&self, id: TransactionId) -> BudgetResult<()>;

    fn save_budget_goals(&self, goals: &BudgetGoals) -> BudgetResult<()>;

    fn save_starting_balance(&self, balance: Money) -> BudgetResult<()>;

    /// Feed of changes written to this ledger by any writer
    fn subscribe(&self) -> ChangeFeed;
}

/// Open the store selected in `settings`
pub fn open_store(settings: &Settings, paths: &BudgetViewPaths) -> BudgetResult<Box<dyn LedgerStore>> {
    match settings.backend {
        StorageBackend::Local => Ok(Box::new(LocalStore::new(paths.clone()))),
        StorageBackend::Cloud => {
            let user = settings.user_id().ok_or_else(|| {
                BudgetError::Config(
                    "The cloud backend needs a signed-in user; set one with `budgetview config --cloud-user <id>`"
                        .into(),
                )
            })?;
            let documents = FsDocumentStore::new(paths.cloud_dir());
            Ok(Box::new(CloudStore::new(Arc::new(documents), user)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_local_store() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());

        let store = open_store(&Settings::default(), &paths).unwrap();
        assert_eq!(store.name(), "local");
    }

    #[test]
    fn test_cloud_store_requires_user() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());
        let settings = Settings {
            backend: StorageBackend::Cloud,
            ..Settings::default()
        };

        let err = open_store(&settings, &paths).err().unwrap();
        assert!(matches!(err, BudgetError::Config(_)));

        let settings = Settings {
            cloud_user: Some("alice".into()),
            ..settings
        };
        assert_eq!(open_store(&settings, &paths).unwrap().name(), "cloud");
    }

    #[test]
    fn test_stored_ledger_reconciles_goals() {
        let registry = CategoryRegistry::builtin();
        let stored = StoredLedger {
            budget_goals: vec![
                BudgetGoal::new("food", Money::from_units(200)),
                BudgetGoal::new("gadgets", Money::from_units(50)),
            ],
            ..StoredLedger::default()
        };

        let ledger = stored.into_ledger(registry);
        assert_eq!(ledger.budget_goals.len(), registry.all().len());
        assert!(ledger.budget_goals.get("gadgets").is_none());
        assert_eq!(
            ledger.budget_goals.get("food").unwrap().amount,
            Money::from_units(200)
        );
    }
}
