//! Local JSON file provider
//!
//! Three files under the data directory: `transactions.json` (array),
//! `budget_goals.json` (array) and `starting_balance.json` (cents). The
//! transaction list is cached after the first read so each insert or delete
//! rewrites the file from memory.

use std::sync::RwLock;

use tracing::debug;

use super::file_io::{read_json_or_default, write_json_atomic};
use super::notify::{ChangeFeed, ChangeNotifier};
use super::{LedgerChange, LedgerStore, StoredLedger};
use crate::config::BudgetViewPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetGoals, Money, Transaction, TransactionId};

pub struct LocalStore {
    paths: BudgetViewPaths,
    transactions: RwLock<Option<Vec<Transaction>>>,
    notifier: ChangeNotifier<LedgerChange>,
}

impl LocalStore {
    pub fn new(paths: BudgetViewPaths) -> Self {
        Self {
            paths,
            transactions: RwLock::new(None),
            notifier: ChangeNotifier::new(),
        }
    }

    pub fn paths(&self) -> &BudgetViewPaths {
        &self.paths
    }

    /// Run `f` against the cached transaction list, reading it on first use
    fn with_cache<R>(&self, f: impl FnOnce(&mut Vec<Transaction>) -> BudgetResult<R>) -> BudgetResult<R> {
        let mut guard = self
            .transactions
            .write()
            .map_err(|e| BudgetError::Storage(format!("Lock poisoned: {}", e)))?;
        let cached = guard.get_or_insert_with(|| read_json_or_default(self.paths.transactions_file()));
        f(cached)
    }

    fn write_transactions(&self, transactions: &[Transaction]) -> BudgetResult<()> {
        write_json_atomic(self.paths.transactions_file(), transactions)
    }
}

impl LedgerStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    fn load(&self) -> BudgetResult<StoredLedger> {
        let transactions: Vec<Transaction> = read_json_or_default(self.paths.transactions_file());
        let budget_goals = read_json_or_default(self.paths.budget_goals_file());
        let starting_balance = read_json_or_default(self.paths.starting_balance_file());

        debug!(
            transactions = transactions.len(),
            "loaded ledger from {}",
            self.paths.data_dir().display()
        );

        let mut guard = self
            .transactions
            .write()
            .map_err(|e| BudgetError::Storage(format!("Lock poisoned: {}", e)))?;
        *guard = Some(transactions.clone());

        Ok(StoredLedger {
            transactions,
            budget_goals,
            starting_balance,
        })
    }

    fn insert_transaction(&self, transaction: &Transaction) -> BudgetResult<()> {
        self.with_cache(|list| {
            list.push(transaction.clone());
            if let Err(e) = self.write_transactions(list) {
                list.pop();
                return Err(e);
            }
            Ok(())
        })?;
        self.notifier.notify(LedgerChange::Transactions);
        Ok(())
    }

    fn remove_transaction(&self, id: TransactionId) -> BudgetResult<()> {
        let removed = self.with_cache(|list| {
            let Some(index) = list.iter().position(|t| t.id == id) else {
                return Ok(false);
            };
            let txn = list.remove(index);
            if let Err(e) = self.write_transactions(list) {
                list.insert(index, txn);
                return Err(e);
            }
            Ok(true)
        })?;

        if removed {
            self.notifier.notify(LedgerChange::Transactions);
        }
        Ok(())
    }

    fn save_budget_goals(&self, goals: &BudgetGoals) -> BudgetResult<()> {
        write_json_atomic(self.paths.budget_goals_file(), goals)?;
        self.notifier.notify(LedgerChange::Settings);
        Ok(())
    }

    fn save_starting_balance(&self, balance: Money) -> BudgetResult<()> {
        write_json_atomic(self.paths.starting_balance_file(), &balance)?;
        self.notifier.notify(LedgerChange::Settings);
        Ok(())
    }

    fn subscribe(&self) -> ChangeFeed {
        ChangeFeed::from_receiver(self.notifier.subscribe())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetGoal, CategoryRegistry, NewTransaction};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn create_store() -> (LocalStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetViewPaths::with_base_dir(temp_dir.path().to_path_buf());
        (LocalStore::new(paths), temp_dir)
    }

    fn expense(desc: &str, cents: i64, day: u32) -> Transaction {
        NewTransaction::expense(
            desc,
            Money::from_cents(cents),
            NaiveDate::from_ymd_opt(2025, 4, day).unwrap(),
            "food",
        )
        .into_transaction()
    }

    #[test]
    fn test_empty_directory_loads_defaults() {
        let (store, _temp) = create_store();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, StoredLedger::default());
    }

    #[test]
    fn test_insert_and_remove_persist() {
        let (store, temp) = create_store();
        let lunch = expense("Lunch", 1_200, 2);
        let dinner = expense("Dinner", 3_400, 3);

        store.insert_transaction(&lunch).unwrap();
        store.insert_transaction(&dinner).unwrap();
        store.remove_transaction(lunch.id).unwrap();

        let reopened = LocalStore::new(BudgetViewPaths::with_base_dir(temp.path().to_path_buf()));
        let loaded = reopened.load().unwrap();
        assert_eq!(loaded.transactions, vec![dinner]);
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let (store, _temp) = create_store();
        let coffee = expense("Coffee", 450, 1);
        store.insert_transaction(&coffee).unwrap();

        let mut feed = store.subscribe();
        store.remove_transaction(TransactionId::new()).unwrap();

        assert!(feed.pending().is_empty());
        assert_eq!(store.load().unwrap().transactions.len(), 1);
    }

    #[test]
    fn test_goals_and_balance_persist() {
        let (store, _temp) = create_store();
        let registry = CategoryRegistry::builtin();
        let mut goals = BudgetGoals::empty_for(registry);
        goals.set("transport", Money::from_units(120));

        store.save_budget_goals(&goals).unwrap();
        store.save_starting_balance(Money::from_cents(-2_500)).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded
            .budget_goals
            .contains(&BudgetGoal::new("transport", Money::from_units(120))));
        assert_eq!(loaded.starting_balance, Money::from_cents(-2_500));
    }

    #[test]
    fn test_malformed_files_fall_back() {
        let (store, _temp) = create_store();
        let paths = store.paths().clone();
        paths.ensure_directories().unwrap();
        std::fs::write(paths.transactions_file(), "{\"oops\": true}").unwrap();
        std::fs::write(paths.budget_goals_file(), "[{\"category_id\": 5}]").unwrap();
        std::fs::write(paths.starting_balance_file(), "\"lots\"").unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.transactions.is_empty());
        assert!(loaded.budget_goals.is_empty());
        assert_eq!(loaded.starting_balance, Money::zero());
    }

    #[test]
    fn test_writes_notify_subscribers() {
        let (store, _temp) = create_store();
        let mut feed = store.subscribe();

        store.insert_transaction(&expense("Snacks", 300, 5)).unwrap();
        store.save_starting_balance(Money::from_units(5)).unwrap();

        assert_eq!(
            feed.pending(),
            vec![LedgerChange::Transactions, LedgerChange::Settings]
        );
    }

    #[test]
    fn test_failed_write_leaves_cache_unchanged() {
        let (store, _temp) = create_store();
        let paths = store.paths().clone();
        store.load().unwrap();

        // A directory where the file should be makes the rename fail
        std::fs::create_dir_all(paths.transactions_file()).unwrap();
        std::fs::write(paths.transactions_file().join("blocker"), "x").unwrap();

        assert!(store.insert_transaction(&expense("Rent", 90_000, 1)).is_err());

        let cached = store.transactions.read().unwrap();
        assert!(cached.as_ref().unwrap().is_empty());
    }
}
