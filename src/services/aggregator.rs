//! Ledger aggregator
//!
//! Owns the ledger state and answers derived-value queries over it: monthly
//! flow totals, the per-category expense breakdown, chart series and the
//! all-time running balance. Everything here is an immediate computation over
//! memory; persistence is the session's concern.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::models::period::{month_abbreviation, today};
use crate::models::{
    BudgetGoals, Category, CategoryRegistry, Granularity, Ledger, Money, MonthPeriod,
    NewTransaction, Transaction, TransactionId, TransactionKind,
};

/// Summed expenses for one category within a period
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpending {
    /// The id as stored on the transactions, which may be unknown
    pub category_id: String,
    /// Resolved display category ("Other" for unknown ids)
    pub category: &'static Category,
    pub amount: Money,
    pub transaction_count: usize,
}

/// One point of the income/expense chart series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub income: Money,
    pub expense: Money,
}

impl TrendPoint {
    fn empty(label: String) -> Self {
        Self {
            label,
            income: Money::zero(),
            expense: Money::zero(),
        }
    }

    fn record(&mut self, txn: &Transaction) {
        match txn.kind {
            TransactionKind::Income => self.income += txn.amount,
            TransactionKind::Expense => self.expense += txn.amount,
        }
    }
}

/// Query and mutation surface over a [`Ledger`]
#[derive(Debug, Clone)]
pub struct LedgerAggregator {
    registry: CategoryRegistry,
    ledger: Ledger,
}

impl LedgerAggregator {
    pub fn new(registry: CategoryRegistry, ledger: Ledger) -> Self {
        Self { registry, ledger }
    }

    /// Aggregator over an empty ledger
    pub fn empty(registry: CategoryRegistry) -> Self {
        let ledger = Ledger::new(&registry);
        Self { registry, ledger }
    }

    pub fn registry(&self) -> &CategoryRegistry {
        &self.registry
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Transactions in display order (newest first)
    pub fn transactions(&self) -> &[Transaction] {
        &self.ledger.transactions
    }

    pub fn budget_goals(&self) -> &BudgetGoals {
        &self.ledger.budget_goals
    }

    pub fn starting_balance(&self) -> Money {
        self.ledger.starting_balance
    }

    /// Swap in freshly loaded state, returning the old one
    pub fn replace_ledger(&mut self, ledger: Ledger) -> Ledger {
        std::mem::replace(&mut self.ledger, ledger)
    }

    // ----- mutations -----

    /// Record a new transaction under a fresh id
    ///
    /// The entry goes after any existing entries on the same day, keeping the
    /// collection sorted newest first. No validation happens here.
    pub fn add_transaction(&mut self, input: NewTransaction) -> Transaction {
        let txn = input.into_transaction();
        let position = self
            .ledger
            .transactions
            .partition_point(|t| t.occurred_on >= txn.occurred_on);
        self.ledger.transactions.insert(position, txn.clone());
        debug!(id = %txn.id, position, "transaction added");
        txn
    }

    /// Remove a transaction; unknown ids are a no-op
    pub fn delete_transaction(&mut self, id: TransactionId) -> Option<Transaction> {
        self.take_transaction(id).map(|(_, txn)| txn)
    }

    /// Remove a transaction and report where it was
    pub(crate) fn take_transaction(&mut self, id: TransactionId) -> Option<(usize, Transaction)> {
        let index = self.ledger.transactions.iter().position(|t| t.id == id)?;
        let txn = self.ledger.transactions.remove(index);
        debug!(%id, index, "transaction removed");
        Some((index, txn))
    }

    /// Put a previously removed transaction back where it was
    pub(crate) fn restore_transaction(&mut self, index: usize, txn: Transaction) {
        let index = index.min(self.ledger.transactions.len());
        self.ledger.transactions.insert(index, txn);
    }

    /// Overwrite a category goal; negative amounts are stored as zero
    ///
    /// Returns the previous amount, or `None` if the category has no goal entry.
    pub fn update_budget_goal(&mut self, category_id: &str, amount: Money) -> Option<Money> {
        self.ledger.budget_goals.set(category_id, amount)
    }

    /// Overwrite the starting balance. Any value is accepted, including negative.
    pub fn update_starting_balance(&mut self, value: Money) -> Money {
        std::mem::replace(&mut self.ledger.starting_balance, value)
    }

    // ----- queries -----

    /// Income within a calendar month (current month when `None`)
    pub fn total_income(&self, period: Option<MonthPeriod>) -> Money {
        self.total_for(TransactionKind::Income, resolve_period(period))
    }

    /// Expenses within a calendar month (current month when `None`)
    pub fn total_expenses(&self, period: Option<MonthPeriod>) -> Money {
        self.total_for(TransactionKind::Expense, resolve_period(period))
    }

    fn total_for(&self, kind: TransactionKind, period: MonthPeriod) -> Money {
        self.ledger
            .transactions
            .iter()
            .filter(|t| t.kind == kind && period.contains(t.occurred_on))
            .map(|t| t.amount)
            .sum()
    }

    /// Expenses within the period grouped by category id
    ///
    /// Only categories with at least one matching expense are listed, in order
    /// of first appearance in display order. Unknown ids resolve to "Other" but
    /// keep their own group.
    pub fn expenses_by_category(&self, period: Option<MonthPeriod>) -> Vec<CategorySpending> {
        let period = resolve_period(period);
        let mut groups: Vec<CategorySpending> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for txn in self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.is_expense() && period.contains(t.occurred_on))
        {
            let slot = *index.entry(txn.category_id.as_str()).or_insert_with(|| {
                groups.push(CategorySpending {
                    category_id: txn.category_id.clone(),
                    category: self.registry.resolve(&txn.category_id),
                    amount: Money::zero(),
                    transaction_count: 0,
                });
                groups.len() - 1
            });
            groups[slot].amount += txn.amount;
            groups[slot].transaction_count += 1;
        }

        groups
    }

    /// Chart series anchored to today
    pub fn spending_over_time(&self, granularity: Granularity) -> Vec<TrendPoint> {
        self.spending_over_time_on(granularity, today())
    }

    /// Chart series anchored to an explicit "today"
    ///
    /// `Month` yields one zero-filled point per day of today's month labelled
    /// "<month>/<day>"; `Year` yields twelve points for today's year labelled
    /// with month abbreviations.
    pub fn spending_over_time_on(&self, granularity: Granularity, today: NaiveDate) -> Vec<TrendPoint> {
        match granularity {
            Granularity::Month => {
                let period = MonthPeriod::containing(today);
                let mut points: Vec<TrendPoint> = (1..=period.days_in_month())
                    .map(|day| TrendPoint::empty(format!("{}/{}", period.month(), day)))
                    .collect();
                for txn in self
                    .ledger
                    .transactions
                    .iter()
                    .filter(|t| period.contains(t.occurred_on))
                {
                    points[txn.occurred_on.day0() as usize].record(txn);
                }
                points
            }
            Granularity::Year => {
                let mut points: Vec<TrendPoint> = (1..=12)
                    .map(|month| TrendPoint::empty(month_abbreviation(month).to_string()))
                    .collect();
                for txn in self
                    .ledger
                    .transactions
                    .iter()
                    .filter(|t| t.occurred_on.year() == today.year())
                {
                    points[txn.occurred_on.month0() as usize].record(txn);
                }
                points
            }
        }
    }

    /// Starting balance plus all-time income minus all-time expenses
    ///
    /// Deliberately not period-scoped, unlike the flow totals.
    pub fn current_balance(&self) -> Money {
        self.ledger.starting_balance + self.all_time_net()
    }

    /// All-time income minus all-time expenses
    pub fn all_time_net(&self) -> Money {
        self.ledger
            .transactions
            .iter()
            .map(Transaction::signed_amount)
            .sum()
    }

    /// The newest `limit` entries
    pub fn recent_transactions(&self, limit: usize) -> &[Transaction] {
        let end = limit.min(self.ledger.transactions.len());
        &self.ledger.transactions[..end]
    }

    /// Look up a category without fallback
    pub fn category(&self, id: &str) -> Option<&'static Category> {
        self.registry.get(id)
    }

    /// Find a transaction by full id or by its short `txn-xxxxxxxx` form
    ///
    /// A short form matching more than one entry finds nothing.
    pub fn find_transaction(&self, query: &str) -> Option<&Transaction> {
        let query = query.trim();
        if let Ok(id) = query.parse::<TransactionId>() {
            return self.ledger.transactions.iter().find(|t| t.id == id);
        }

        let short = query.strip_prefix("txn-").unwrap_or(query).to_lowercase();
        if short.is_empty() {
            return None;
        }
        let mut matches = self
            .ledger
            .transactions
            .iter()
            .filter(|t| t.id.to_key().starts_with(&short));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Some(txn),
            _ => None,
        }
    }
}

fn resolve_period(period: Option<MonthPeriod>) -> MonthPeriod {
    period.unwrap_or_else(MonthPeriod::current)
}
