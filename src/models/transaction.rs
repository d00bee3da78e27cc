//! Transaction model
//!
//! A ledger entry is either income or an expense. The amount is always a
//! positive magnitude; the direction comes from [`TransactionKind`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::INCOME_CATEGORY_ID;
use super::ids::TransactionId;
use super::money::Money;

/// Direction of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    /// Parse "income"/"expense" (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A transaction before it has been assigned an id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Money,
    pub occurred_on: NaiveDate,
    pub category_id: String,
}

impl NewTransaction {
    /// An expense in the given category
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        occurred_on: NaiveDate,
        category_id: impl Into<String>,
    ) -> Self {
        Self {
            kind: TransactionKind::Expense,
            description: description.into(),
            amount,
            occurred_on,
            category_id: category_id.into(),
        }
    }

    /// An income entry, filed under the reserved income pseudo-category
    pub fn income(description: impl Into<String>, amount: Money, occurred_on: NaiveDate) -> Self {
        Self {
            kind: TransactionKind::Income,
            description: description.into(),
            amount,
            occurred_on,
            category_id: INCOME_CATEGORY_ID.to_string(),
        }
    }

    /// Check the record invariants
    ///
    /// This is the form layer's job; the aggregator accepts whatever it is given.
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        if self.category_id.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        Ok(())
    }

    /// Assign a fresh id
    pub fn into_transaction(self) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            kind: self.kind,
            description: self.description,
            amount: self.amount,
            occurred_on: self.occurred_on,
            category_id: self.category_id,
        }
    }
}

/// A recorded ledger entry. Entries are never edited in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    #[serde(default)]
    pub description: String,
    /// Positive magnitude
    pub amount: Money,
    pub occurred_on: NaiveDate,
    pub category_id: String,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Amount with the sign implied by the kind
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.occurred_on.format("%Y-%m-%d"),
            self.description,
            self.signed_amount()
        )
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    EmptyDescription,
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::MissingCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}
