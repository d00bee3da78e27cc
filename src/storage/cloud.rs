//! Cloud provider
//!
//! Stores one user's ledger in a [`DocumentStore`]: one document per
//! transaction in the `transactions` collection (keyed by the full id), and
//! a single `settings/budget` document holding the goals and the starting
//! balance. Change events from other writers are filtered to this user.

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::documents::{DocumentChange, DocumentStore};
use super::notify::ChangeFeed;
use super::{LedgerChange, LedgerStore, StoredLedger};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetGoal, BudgetGoals, Money, Transaction, TransactionId, UserId};

const TRANSACTIONS: &str = "transactions";
const SETTINGS: &str = "settings";
const BUDGET_DOC: &str = "budget";

/// Contents of `settings/budget`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
struct SettingsDocument {
    #[serde(default)]
    budget_goals: Vec<BudgetGoal>,
    #[serde(default)]
    starting_balance: Money,
}

pub struct CloudStore {
    documents: Arc<dyn DocumentStore>,
    user: UserId,
    /// Last known settings document; every write sends the whole document
    settings: Mutex<SettingsDocument>,
}

impl CloudStore {
    pub fn new(documents: Arc<dyn DocumentStore>, user: UserId) -> Self {
        Self {
            documents,
            user,
            settings: Mutex::new(SettingsDocument::default()),
        }
    }

    pub fn user(&self) -> &UserId {
        &self.user
    }

    fn read_settings(&self) -> BudgetResult<SettingsDocument> {
        let Some(doc) = self.documents.get(&self.user, SETTINGS, BUDGET_DOC)? else {
            return Ok(SettingsDocument::default());
        };
        Ok(serde_json::from_value(doc).unwrap_or_else(|e| {
            warn!(user = %self.user, error = %e, "discarding malformed budget settings");
            SettingsDocument::default()
        }))
    }

    /// Apply `change` to the cached settings document and write it out
    fn update_settings(&self, change: impl FnOnce(&mut SettingsDocument)) -> BudgetResult<()> {
        let mut cached = self
            .settings
            .lock()
            .map_err(|e| BudgetError::Storage(format!("Lock poisoned: {}", e)))?;

        let mut next = cached.clone();
        change(&mut next);
        self.documents
            .put(&self.user, SETTINGS, BUDGET_DOC, &serde_json::to_value(&next)?)?;
        *cached = next;
        Ok(())
    }
}

impl LedgerStore for CloudStore {
    fn name(&self) -> &'static str {
        "cloud"
    }

    fn load(&self) -> BudgetResult<StoredLedger> {
        let transactions: Vec<Transaction> = self
            .documents
            .list(&self.user, TRANSACTIONS)?
            .into_iter()
            .filter_map(|(key, doc)| match serde_json::from_value::<Transaction>(doc) {
                Ok(txn) => Some(txn),
                Err(e) => {
                    warn!(key = %key, error = %e, "skipping malformed transaction document");
                    None
                }
            })
            .collect();

        let settings = self.read_settings()?;
        debug!(user = %self.user, transactions = transactions.len(), "loaded cloud ledger");

        let ledger = StoredLedger {
            transactions,
            budget_goals: settings.budget_goals.clone(),
            starting_balance: settings.starting_balance,
        };

        if let Ok(mut cached) = self.settings.lock() {
            *cached = settings;
        }
        Ok(ledger)
    }

    fn insert_transaction(&self, transaction: &Transaction) -> BudgetResult<()> {
        let doc: Value = serde_json::to_value(transaction)?;
        self.documents
            .put(&self.user, TRANSACTIONS, &transaction.id.to_key(), &doc)
    }

    fn remove_transaction(&self, id: TransactionId) -> BudgetResult<()> {
        self.documents
            .delete(&self.user, TRANSACTIONS, &id.to_key())
            .map(|_| ())
    }

    fn save_budget_goals(&self, goals: &BudgetGoals) -> BudgetResult<()> {
        let goals = goals.as_slice().to_vec();
        self.update_settings(|doc| doc.budget_goals = goals)
    }

    fn save_starting_balance(&self, balance: Money) -> BudgetResult<()> {
        self.update_settings(|doc| doc.starting_balance = balance)
    }

    fn subscribe(&self) -> ChangeFeed {
        let user = self.user.clone();
        ChangeFeed::mapped(self.documents.subscribe(), move |change: DocumentChange| {
            if change.user != user {
                return None;
            }
            match change.collection.as_str() {
                TRANSACTIONS => Some(LedgerChange::Transactions),
                SETTINGS => Some(LedgerChange::Settings),
                _ => None,
            }
        })
    }
}
