//! Ledger session
//!
//! Binds a [`LedgerAggregator`] to a [`LedgerStore`]. Every mutation is
//! applied to memory first and then persisted; if the write fails the
//! previous value is put back and the error returned, so memory never claims
//! a change the store doesn't have. Successful mutations are audited.

use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger, EntityType};
use crate::error::BudgetResult;
use crate::models::{CategoryRegistry, Ledger, Money, NewTransaction, Transaction, TransactionId};
use crate::storage::{ChangeFeed, LedgerStore};

use super::aggregator::LedgerAggregator;

/// Entity id used in audit entries for the starting balance
const LEDGER_ENTITY: &str = "ledger";

/// What a [`LedgerSession::restore`] changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestoreSummary {
    pub inserted: usize,
    pub removed: usize,
}

pub struct LedgerSession {
    aggregator: LedgerAggregator,
    store: Box<dyn LedgerStore>,
    changes: ChangeFeed,
    audit: Option<AuditLogger>,
}

impl LedgerSession {
    /// Load the ledger from `store`
    ///
    /// The change feed is opened before the first load so no write made in
    /// between is missed.
    pub fn open(registry: CategoryRegistry, store: Box<dyn LedgerStore>) -> BudgetResult<Self> {
        let changes = store.subscribe();
        let ledger = store.load()?.into_ledger(&registry);
        debug!(
            store = store.name(),
            transactions = ledger.transactions.len(),
            "session opened"
        );

        Ok(Self {
            aggregator: LedgerAggregator::new(registry, ledger),
            store,
            changes,
            audit: None,
        })
    }

    /// Record successful mutations in `logger`
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    pub fn aggregator(&self) -> &LedgerAggregator {
        &self.aggregator
    }

    pub fn store_name(&self) -> &'static str {
        self.store.name()
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> BudgetResult<Transaction> {
        let txn = self.aggregator.add_transaction(input);

        if let Err(e) = self.store.insert_transaction(&txn) {
            warn!(id = %txn.id, error = %e, "insert failed, rolling back");
            self.aggregator.delete_transaction(txn.id);
            return Err(e);
        }

        self.audit(AuditEntry::create(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        ));
        Ok(txn)
    }

    /// Delete a transaction; `Ok(None)` when the id is unknown
    pub fn delete_transaction(&mut self, id: TransactionId) -> BudgetResult<Option<Transaction>> {
        let Some((index, txn)) = self.aggregator.take_transaction(id) else {
            return Ok(None);
        };

        if let Err(e) = self.store.remove_transaction(id) {
            warn!(%id, error = %e, "delete failed, rolling back");
            self.aggregator.restore_transaction(index, txn);
            return Err(e);
        }

        self.audit(AuditEntry::delete(
            EntityType::Transaction,
            txn.id.to_string(),
            Some(txn.description.clone()),
            &txn,
        ));
        Ok(Some(txn))
    }

    /// Set a category goal (clamped at zero)
    ///
    /// Returns the previous amount; `Ok(None)` and no write when the category
    /// has no goal entry.
    pub fn update_budget_goal(&mut self, category_id: &str, amount: Money) -> BudgetResult<Option<Money>> {
        let Some(previous) = self.aggregator.update_budget_goal(category_id, amount) else {
            return Ok(None);
        };

        if let Err(e) = self.store.save_budget_goals(self.aggregator.budget_goals()) {
            warn!(category_id, error = %e, "goal save failed, rolling back");
            self.aggregator.update_budget_goal(category_id, previous);
            return Err(e);
        }

        let current = self
            .aggregator
            .budget_goals()
            .get(category_id)
            .map(|g| g.amount)
            .unwrap_or_default();
        self.audit(AuditEntry::update(
            EntityType::BudgetGoal,
            category_id,
            Some(self.aggregator.registry().display_name(category_id).to_string()),
            &previous,
            &current,
        ));
        Ok(Some(previous))
    }

    /// Overwrite the starting balance, returning the previous one
    pub fn update_starting_balance(&mut self, value: Money) -> BudgetResult<Money> {
        let previous = self.aggregator.update_starting_balance(value);

        if let Err(e) = self.store.save_starting_balance(value) {
            warn!(error = %e, "starting balance save failed, rolling back");
            self.aggregator.update_starting_balance(previous);
            return Err(e);
        }

        self.audit(AuditEntry::update(
            EntityType::StartingBalance,
            LEDGER_ENTITY,
            None,
            &previous,
            &value,
        ));
        Ok(previous)
    }

    /// Replace the whole ledger, e.g. with an imported export
    ///
    /// Only the differences are written. If a write fails part way, memory
    /// is reloaded from whatever the store now holds and the error returned.
    pub fn restore(&mut self, ledger: Ledger) -> BudgetResult<RestoreSummary> {
        let summary = match self.write_ledger(&ledger) {
            Ok(summary) => summary,
            Err(e) => {
                warn!(error = %e, "restore failed, reloading from store");
                if let Err(reload_err) = self.reload() {
                    warn!(error = %reload_err, "reload after failed restore also failed");
                }
                return Err(e);
            }
        };

        let previous = self.aggregator.replace_ledger(ledger);
        self.audit_replaced(&previous);
        info!(
            inserted = summary.inserted,
            removed = summary.removed,
            "ledger restored"
        );
        Ok(summary)
    }

    fn write_ledger(&self, ledger: &Ledger) -> BudgetResult<RestoreSummary> {
        let current = self.aggregator.transactions();
        let mut summary = RestoreSummary::default();

        for txn in current.iter().filter(|t| !ledger.transactions.contains(t)) {
            self.store.remove_transaction(txn.id)?;
            summary.removed += 1;
        }
        for txn in ledger.transactions.iter().filter(|t| !current.contains(t)) {
            self.store.insert_transaction(txn)?;
            summary.inserted += 1;
        }

        if &ledger.budget_goals != self.aggregator.budget_goals() {
            self.store.save_budget_goals(&ledger.budget_goals)?;
        }
        if ledger.starting_balance != self.aggregator.starting_balance() {
            self.store.save_starting_balance(ledger.starting_balance)?;
        }
        Ok(summary)
    }

    /// Audit every record that differs between `previous` and the current ledger
    fn audit_replaced(&self, previous: &Ledger) {
        let current = self.aggregator.ledger();

        for txn in previous.transactions.iter().filter(|t| !current.transactions.contains(t)) {
            self.audit(AuditEntry::delete(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                txn,
            ));
        }
        for txn in current.transactions.iter().filter(|t| !previous.transactions.contains(t)) {
            self.audit(AuditEntry::create(
                EntityType::Transaction,
                txn.id.to_string(),
                Some(txn.description.clone()),
                txn,
            ));
        }

        for goal in current.budget_goals.iter() {
            let before = previous
                .budget_goals
                .get(&goal.category_id)
                .map(|g| g.amount)
                .unwrap_or_default();
            if before != goal.amount {
                self.audit(AuditEntry::update(
                    EntityType::BudgetGoal,
                    goal.category_id.as_str(),
                    Some(self.aggregator.registry().display_name(&goal.category_id).to_string()),
                    &before,
                    &goal.amount,
                ));
            }
        }

        if previous.starting_balance != current.starting_balance {
            self.audit(AuditEntry::update(
                EntityType::StartingBalance,
                LEDGER_ENTITY,
                None,
                &previous.starting_balance,
                &current.starting_balance,
            ));
        }
    }

    /// Replace in-memory state with a fresh load from the store
    pub fn reload(&mut self) -> BudgetResult<()> {
        let ledger = self.store.load()?.into_ledger(self.aggregator.registry());
        self.aggregator.replace_ledger(ledger);
        Ok(())
    }

    /// Pick up changes written since the last sync
    ///
    /// Returns whether anything was reloaded. This session's own writes are
    /// also delivered here; reloading after them is harmless.
    pub fn sync(&mut self) -> BudgetResult<bool> {
        let pending = self.changes.pending();
        if pending.is_empty() {
            return Ok(false);
        }
        info!(changes = pending.len(), "ledger changed in store, reloading");
        self.reload()?;
        Ok(true)
    }

    fn audit(&self, entry: AuditEntry) {
        if let Some(logger) = &self.audit {
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }
}
